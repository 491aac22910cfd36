//! Composition-time wiring of adapters into their registries.
//!
//! Adapters are supplied as an explicit registration list, each with an
//! optional priority and alias. Wiring orders them by priority (highest first,
//! discovery order within a priority), drops the ones whose alias is disabled
//! in the configuration table, pushes name and configuration into the rest and
//! registers them.

use crate::adapter::locale_provider::{LocaleProvider, SystemLocaleProvider};
use crate::adapter::path_generator::{DocumentPathGenerator, PathGenerator, RoutePathGenerator};
use crate::adapter::redirector::{FallbackRedirector, LanguageRedirector, Redirector};
use crate::adapter::{Adapter, AdapterKind, AdapterOptions};
use crate::config::{AdapterTable, RegistryConfig};
use crate::definitions::{ROUTE_TYPE_DOCUMENT, ROUTE_TYPE_ROUTE, ROUTE_TYPE_STATIC_ROUTE};
use crate::error::RegistryError;
use crate::registry::{
    AdapterRegistry, LocaleProviderRegistry, PathGeneratorRegistry, RedirectorRegistry,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// One adapter offered for registration.
pub struct AdapterRegistration<T: ?Sized> {
    pub priority: i32,
    pub alias: Option<String>,
    pub adapter: Box<T>,
}

impl<T: ?Sized> AdapterRegistration<T> {
    pub fn new(priority: i32, alias: Option<&str>, adapter: Box<T>) -> Self {
        Self {
            priority,
            alias: alias.map(str::to_string),
            adapter,
        }
    }
}

/// Order registrations by priority, highest first.
///
/// Registrations sharing a priority keep their relative order.
pub fn order_by_priority<T: ?Sized>(
    registrations: Vec<AdapterRegistration<T>>,
) -> Vec<AdapterRegistration<T>> {
    let mut groups: BTreeMap<i32, Vec<AdapterRegistration<T>>> = BTreeMap::new();
    for registration in registrations {
        groups.entry(registration.priority).or_default().push(registration);
    }
    groups.into_values().rev().flatten().collect()
}

/// Build a registry of `kind` from `registrations`, gated by `table`.
///
/// Aliases missing from the table count as enabled. Disabled adapters are
/// dropped without ever receiving a name or configuration. Adapters without
/// an alias are always registered and receive an empty configuration.
pub fn wire_adapters<T: Adapter + ?Sized>(
    kind: AdapterKind,
    registrations: Vec<AdapterRegistration<T>>,
    table: &AdapterTable,
) -> Result<AdapterRegistry<T>, RegistryError> {
    let mut registry = AdapterRegistry::new(kind);

    for registration in order_by_priority(registrations) {
        let AdapterRegistration {
            priority,
            alias,
            mut adapter,
        } = registration;

        let settings = alias.as_deref().and_then(|alias| table.get(alias));
        if settings.is_some_and(|settings| !settings.enabled) {
            info!(
                "Skipping disabled {} adapter {}",
                kind,
                alias.as_deref().unwrap_or_default()
            );
            continue;
        }

        if let Some(alias) = alias.as_deref() {
            adapter.set_name(alias);
        }
        adapter.set_config(
            settings
                .map(|settings| settings.config.clone())
                .unwrap_or_else(AdapterOptions::new),
        );

        registry.register(Arc::from(adapter), alias.as_deref())?;
        info!(
            "Registered {} adapter {} (priority {})",
            kind,
            alias.as_deref().unwrap_or("<unnamed>"),
            priority
        );
    }

    Ok(registry)
}

/// Explicit adapter registration list for all kinds, assembled at startup.
#[derive(Default)]
pub struct AdapterRegistrations {
    locale_providers: Vec<AdapterRegistration<dyn LocaleProvider>>,
    path_generators: Vec<AdapterRegistration<dyn PathGenerator>>,
    redirectors: Vec<AdapterRegistration<dyn Redirector>>,
}

impl AdapterRegistrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// The adapters shipped with this crate.
    pub fn builtin() -> Self {
        Self::new()
            .locale_provider(0, Some("system"), SystemLocaleProvider::new())
            .path_generator(0, Some(ROUTE_TYPE_ROUTE), RoutePathGenerator::new())
            .path_generator(0, Some(ROUTE_TYPE_STATIC_ROUTE), RoutePathGenerator::new())
            .path_generator(0, Some(ROUTE_TYPE_DOCUMENT), DocumentPathGenerator::new())
            .redirector(100, Some("lang"), LanguageRedirector::new())
            .redirector(-255, Some("fallback"), FallbackRedirector::new())
    }

    pub fn locale_provider(
        mut self,
        priority: i32,
        alias: Option<&str>,
        adapter: impl LocaleProvider + 'static,
    ) -> Self {
        self.locale_providers
            .push(AdapterRegistration::new(priority, alias, Box::new(adapter)));
        self
    }

    pub fn path_generator(
        mut self,
        priority: i32,
        alias: Option<&str>,
        adapter: impl PathGenerator + 'static,
    ) -> Self {
        self.path_generators
            .push(AdapterRegistration::new(priority, alias, Box::new(adapter)));
        self
    }

    pub fn redirector(
        mut self,
        priority: i32,
        alias: Option<&str>,
        adapter: impl Redirector + 'static,
    ) -> Self {
        self.redirectors
            .push(AdapterRegistration::new(priority, alias, Box::new(adapter)));
        self
    }
}

/// The three production registries, composed once and then read-only.
pub struct AdapterRegistries {
    locale_providers: LocaleProviderRegistry,
    path_generators: PathGeneratorRegistry,
    redirectors: RedirectorRegistry,
}

impl AdapterRegistries {
    /// Wire every registration list against its table in `config`.
    pub fn compose(
        registrations: AdapterRegistrations,
        config: &RegistryConfig,
    ) -> Result<Self, RegistryError> {
        let AdapterRegistrations {
            locale_providers,
            path_generators,
            redirectors,
        } = registrations;

        Ok(Self {
            locale_providers: wire_adapters(
                AdapterKind::LocaleProvider,
                locale_providers,
                config.table(AdapterKind::LocaleProvider),
            )?,
            path_generators: wire_adapters(
                AdapterKind::PathGenerator,
                path_generators,
                config.table(AdapterKind::PathGenerator),
            )?,
            redirectors: wire_adapters(
                AdapterKind::Redirector,
                redirectors,
                config.table(AdapterKind::Redirector),
            )?,
        })
    }

    pub fn locale_providers(&self) -> &LocaleProviderRegistry {
        &self.locale_providers
    }

    pub fn path_generators(&self) -> &PathGeneratorRegistry {
        &self.path_generators
    }

    pub fn redirectors(&self) -> &RedirectorRegistry {
        &self.redirectors
    }
}

impl fmt::Debug for AdapterRegistries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistries")
            .field("locale_providers", &self.locale_providers)
            .field("path_generators", &self.path_generators)
            .field("redirectors", &self.redirectors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::redirector::{RedirectTarget, RedirectorBag};
    use crate::adapter::AdapterIdentity;
    use crate::config::AdapterSettings;
    use serde_json::json;

    #[derive(Default)]
    struct Stub {
        identity: AdapterIdentity,
        label: &'static str,
    }

    impl Stub {
        fn boxed(label: &'static str) -> Box<dyn Redirector> {
            Box::new(Stub {
                label,
                ..Default::default()
            })
        }
    }

    impl Adapter for Stub {
        fn identity(&self) -> &AdapterIdentity {
            &self.identity
        }

        fn identity_mut(&mut self) -> &mut AdapterIdentity {
            &mut self.identity
        }
    }

    impl Redirector for Stub {
        fn make_decision(&self, _bag: &RedirectorBag<'_>) -> Option<RedirectTarget> {
            Some(RedirectTarget {
                url: self.label.to_string(),
                locale: String::new(),
            })
        }
    }

    fn registration(priority: i32, alias: &'static str) -> AdapterRegistration<dyn Redirector> {
        AdapterRegistration::new(priority, Some(alias), Stub::boxed(alias))
    }

    fn settings(enabled: bool, config: serde_json::Value) -> AdapterSettings {
        AdapterSettings {
            enabled,
            config: config.as_object().cloned().unwrap_or_default(),
        }
    }

    // ==================== Priority Tests ====================

    #[test]
    fn test_higher_priority_registers_first_and_ties_keep_order() {
        let registrations = vec![
            registration(5, "five-a"),
            registration(5, "five-b"),
            registration(10, "ten"),
            registration(0, "zero"),
        ];

        let registry =
            wire_adapters(AdapterKind::Redirector, registrations, &AdapterTable::new()).unwrap();

        let aliases: Vec<_> = registry.aliases().collect();
        assert_eq!(aliases, vec!["ten", "five-a", "five-b", "zero"]);
    }

    #[test]
    fn test_negative_priorities_sort_last() {
        let ordered = order_by_priority(vec![
            registration(-255, "fallback"),
            registration(0, "plain"),
            registration(100, "lang"),
        ]);

        let aliases: Vec<_> = ordered.iter().filter_map(|r| r.alias.as_deref()).collect();
        assert_eq!(aliases, vec!["lang", "plain", "fallback"]);
    }

    // ==================== Gating Tests ====================

    #[test]
    fn test_disabled_alias_is_never_registered() {
        let mut table = AdapterTable::new();
        table.insert("geo".to_string(), settings(false, json!({})));

        let registry = wire_adapters(
            AdapterKind::Redirector,
            vec![registration(0, "geo"), registration(0, "lang")],
            &table,
        )
        .unwrap();

        assert!(!registry.has("geo"));
        assert!(registry.has("lang"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_enabled_adapter_receives_name_and_config() {
        let mut table = AdapterTable::new();
        table.insert("lang".to_string(), settings(true, json!({ "cookie": "_lang" })));

        let registry =
            wire_adapters(AdapterKind::Redirector, vec![registration(0, "lang")], &table).unwrap();

        let adapter = registry.get("lang").unwrap();
        assert_eq!(adapter.name(), Some("lang"));
        assert_eq!(adapter.config()["cookie"], json!("_lang"));
    }

    #[test]
    fn test_alias_missing_from_table_is_enabled_with_empty_config() {
        let registry = wire_adapters(
            AdapterKind::Redirector,
            vec![registration(0, "custom")],
            &AdapterTable::new(),
        )
        .unwrap();

        let adapter = registry.get("custom").unwrap();
        assert_eq!(adapter.name(), Some("custom"));
        assert!(adapter.config().is_empty());
    }

    #[test]
    fn test_unaliased_adapter_is_registered_without_name() {
        let registry = wire_adapters(
            AdapterKind::Redirector,
            vec![AdapterRegistration::new(0, None, Stub::boxed("anon"))],
            &AdapterTable::new(),
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        let adapter = registry.iter().next().unwrap();
        assert_eq!(adapter.name(), None);
    }

    #[test]
    fn test_duplicate_alias_aborts_wiring() {
        let err = wire_adapters(
            AdapterKind::Redirector,
            vec![registration(10, "lang"), registration(0, "lang")],
            &AdapterTable::new(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateAlias {
                kind: AdapterKind::Redirector,
                alias: "lang".to_string()
            }
        );
    }

    #[test]
    fn test_disabled_duplicate_does_not_conflict() {
        let mut table = AdapterTable::new();
        table.insert("lang".to_string(), settings(false, json!({})));

        let registry = wire_adapters(
            AdapterKind::Redirector,
            vec![registration(10, "lang"), registration(0, "lang")],
            &table,
        )
        .unwrap();

        assert!(registry.is_empty());
    }

    // ==================== Composition Tests ====================

    #[test]
    fn test_builtin_composition() {
        let registries =
            AdapterRegistries::compose(AdapterRegistrations::builtin(), &RegistryConfig::default())
                .unwrap();

        assert!(registries.locale_providers().has("system"));
        assert!(registries.path_generators().has("route"));
        assert!(registries.path_generators().has("static_route"));
        assert!(registries.path_generators().has("document"));
        assert_eq!(
            registries.redirectors().aliases().collect::<Vec<_>>(),
            vec!["lang", "fallback"]
        );
    }

    #[test]
    fn test_composition_applies_per_kind_tables() {
        let mut config = RegistryConfig::default();
        config
            .redirector
            .insert("lang".to_string(), settings(false, json!({})));
        config.path_generator.insert(
            "route".to_string(),
            settings(true, json!({ "trailingSlash": true })),
        );

        let registries =
            AdapterRegistries::compose(AdapterRegistrations::builtin(), &config).unwrap();

        assert!(!registries.redirectors().has("lang"));
        assert!(registries.redirectors().has("fallback"));
        let route = registries.path_generators().get("route").unwrap();
        assert_eq!(route.config()["trailingSlash"], json!(true));
        assert!(registries
            .path_generators()
            .get("static_route")
            .unwrap()
            .config()
            .is_empty());
    }
}
