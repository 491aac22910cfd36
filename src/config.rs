use crate::adapter::{AdapterKind, AdapterOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Process configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // I18n configuration file (zones + adapter registry table)
    pub i18n_config_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            i18n_config_path: std::env::var("I18N_CONFIG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Load the i18n configuration file, or an empty configuration when no
    /// path is set.
    pub fn load_i18n_config(&self) -> Result<I18nConfig> {
        match &self.i18n_config_path {
            Some(path) => I18nConfig::from_file(path),
            None => Ok(I18nConfig::default()),
        }
    }
}

/// Zones and adapter registry settings supplied by the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nConfig {
    pub registry: RegistryConfig,
    pub zones: Vec<ZoneConfig>,
    pub default_zone: Option<ZoneConfig>,
}

impl I18nConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read i18n config {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid i18n config {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse i18n config JSON")
    }

    /// Every locale named by a zone, either as allowed locale or on a site.
    pub fn locales(&self) -> BTreeSet<String> {
        self.zones
            .iter()
            .chain(self.default_zone.iter())
            .flat_map(|zone| {
                zone.allowed_locales
                    .iter()
                    .chain(zone.sites.iter().map(|site| &site.locale))
            })
            .filter(|locale| !locale.is_empty())
            .cloned()
            .collect()
    }
}

/// Per-alias settings of one adapter kind.
pub type AdapterTable = BTreeMap<String, AdapterSettings>;

/// Gating and configuration table for every adapter kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    pub redirector: AdapterTable,
    pub path_generator: AdapterTable,
    pub locale_provider: AdapterTable,
}

impl RegistryConfig {
    pub fn table(&self, kind: AdapterKind) -> &AdapterTable {
        match kind {
            AdapterKind::Redirector => &self.redirector,
            AdapterKind::PathGenerator => &self.path_generator,
            AdapterKind::LocaleProvider => &self.locale_provider,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterSettings {
    /// Disabled adapters are never registered (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Free-form settings pushed into the adapter via `set_config`
    #[serde(default)]
    pub config: AdapterOptions,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            config: AdapterOptions::new(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    /// Zone identifier; absent for the default zone
    #[serde(default)]
    pub id: Option<i64>,

    /// Zone name, unique within the configuration
    pub name: String,

    /// Alias of the locale provider serving this zone (default: "system")
    #[serde(default = "default_locale_adapter")]
    pub locale_adapter: String,

    /// Locale fragments the zone is restricted to; empty means unrestricted
    #[serde(default)]
    pub allowed_locales: Vec<String>,

    /// URL scheme used for site URLs on full bootstrap (default: "https")
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

fn default_locale_adapter() -> String {
    "system".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Host name without scheme or port (e.g., "example.at")
    pub host: String,

    /// Locale fragment served on this host (e.g., "de_AT"); empty for a
    /// locale-less root domain
    #[serde(default)]
    pub locale: String,

    /// Whether this host is the zone's root domain
    #[serde(default)]
    pub root: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== Parsing Tests ====================

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = I18nConfig::from_json_str("{}").unwrap();
        assert_eq!(config, I18nConfig::default());
    }

    #[test]
    fn test_registry_table_defaults() {
        let config = I18nConfig::from_json_str(
            r#"{ "registry": { "redirector": { "geo": {}, "lang": { "enabled": false } } } }"#,
        )
        .unwrap();

        let table = config.registry.table(AdapterKind::Redirector);
        assert!(table["geo"].enabled);
        assert!(table["geo"].config.is_empty());
        assert!(!table["lang"].enabled);
        assert!(config.registry.table(AdapterKind::PathGenerator).is_empty());
    }

    #[test]
    fn test_adapter_config_is_kept_verbatim() {
        let config = I18nConfig::from_json_str(
            r#"{ "registry": { "pathGenerator": { "route": { "config": { "trailingSlash": true } } } } }"#,
        )
        .unwrap();

        assert_eq!(
            config.registry.path_generator["route"].config["trailingSlash"],
            json!(true)
        );
    }

    #[test]
    fn test_zone_defaults() {
        let config = I18nConfig::from_json_str(
            r#"{ "zones": [ { "name": "dach", "sites": [ { "host": "example.at" } ] } ] }"#,
        )
        .unwrap();

        let zone = &config.zones[0];
        assert_eq!(zone.id, None);
        assert_eq!(zone.locale_adapter, "system");
        assert_eq!(zone.scheme, "https");
        assert_eq!(zone.sites[0].locale, "");
        assert!(!zone.sites[0].root);
    }

    #[test]
    fn test_locales_collects_allowed_and_site_locales() {
        let config = I18nConfig::from_json_str(
            r#"{
                "zones": [ { "name": "dach", "allowedLocales": ["de_CH"], "sites": [ { "host": "example.at", "locale": "de_AT" } ] } ],
                "defaultZone": { "name": "global", "sites": [ { "host": "example.com", "root": true } ] }
            }"#,
        )
        .unwrap();

        let locales: Vec<_> = config.locales().into_iter().collect();
        assert_eq!(locales, vec!["de_AT".to_string(), "de_CH".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = I18nConfig::from_json_str("{ not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_zone_requires_name() {
        let result = I18nConfig::from_json_str(r#"{ "zones": [ { "id": 1 } ] }"#);
        assert!(result.is_err());
    }
}
