//! Zones: groups of sites sharing locale configuration.
//!
//! A zone is mutable only while the context manager bootstraps it. Zones that
//! support that step expose it through [`I18nZone::as_bootstrappable`]; zones
//! managing their own state simply return `None` and are used as built.

use crate::adapter::locale_provider::LocaleProvider;
use crate::model::LocaleDefinition;
use serde::Serialize;
use std::fmt;

/// Read-only view of a resolved zone.
pub trait I18nZone: fmt::Debug + Send + Sync {
    /// Configured identifier; `None` for the default zone.
    fn id(&self) -> Option<i64>;

    fn name(&self) -> &str;

    /// Alias of the locale provider that supplies this zone's locales.
    fn locale_adapter_name(&self) -> &str;

    /// Locales this zone is restricted to; empty means unrestricted.
    fn allowed_locales(&self) -> &[String];

    /// Member sites. Only populated after bootstrap.
    fn sites(&self) -> &[ZoneSite];

    /// Locales supplied by the locale provider. Only populated after bootstrap.
    fn provider_locales(&self) -> &[LocaleDefinition];

    /// Bootstrap capability, if this zone supports it.
    fn as_bootstrappable(&mut self) -> Option<&mut dyn BootstrappableZone> {
        None
    }
}

/// Internal bootstrap operations, invoked only by the context manager.
pub trait BootstrappableZone {
    fn as_zone(&self) -> &dyn I18nZone;

    /// Let `provider` populate the zone's provider locales.
    fn process_provider_locales(&mut self, provider: &dyn LocaleProvider);

    fn set_sites(&mut self, sites: Vec<ZoneSite>);
}

/// Zone built from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    id: Option<i64>,
    name: String,
    locale_adapter_name: String,
    allowed_locales: Vec<String>,
    sites: Vec<ZoneSite>,
    provider_locales: Vec<LocaleDefinition>,
}

impl Zone {
    pub fn new(
        id: Option<i64>,
        name: impl Into<String>,
        locale_adapter_name: impl Into<String>,
        allowed_locales: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            locale_adapter_name: locale_adapter_name.into(),
            allowed_locales,
            sites: Vec::new(),
            provider_locales: Vec::new(),
        }
    }

    fn set_provider_locales(&mut self, locales: Vec<LocaleDefinition>) {
        self.provider_locales.clear();
        for locale in locales {
            if !self.provider_locales.contains(&locale) {
                self.provider_locales.push(locale);
            }
        }
    }
}

impl I18nZone for Zone {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn locale_adapter_name(&self) -> &str {
        &self.locale_adapter_name
    }

    fn allowed_locales(&self) -> &[String] {
        &self.allowed_locales
    }

    fn sites(&self) -> &[ZoneSite] {
        &self.sites
    }

    fn provider_locales(&self) -> &[LocaleDefinition] {
        &self.provider_locales
    }

    fn as_bootstrappable(&mut self) -> Option<&mut dyn BootstrappableZone> {
        Some(self)
    }
}

impl BootstrappableZone for Zone {
    fn as_zone(&self) -> &dyn I18nZone {
        self
    }

    fn process_provider_locales(&mut self, provider: &dyn LocaleProvider) {
        let locales = provider.provide_locales(&*self);
        self.set_provider_locales(locales);
    }

    fn set_sites(&mut self, sites: Vec<ZoneSite>) {
        self.sites = sites;
    }
}

/// A single host belonging to a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSite {
    host: String,

    /// Locale fragment as configured (e.g., "de_AT"); empty for a locale-less site
    locale: String,
    language_iso: Option<String>,

    /// ISO 3166-1 country code, or the international namespace
    country_iso: String,
    is_root_domain: bool,

    // Set on full bootstrap only
    /// Scheme and host (e.g., "https://example.at")
    #[serde(skip_serializing_if = "Option::is_none")]
    host_url: Option<String>,

    /// Path prefix for the site's locale (e.g., "/de_AT"); empty without a locale
    #[serde(skip_serializing_if = "Option::is_none")]
    locale_url_mapping: Option<String>,
}

impl ZoneSite {
    pub fn new(host: impl Into<String>, locale: impl Into<String>, is_root_domain: bool) -> Self {
        let locale = locale.into();
        let definition = LocaleDefinition::from_fragment(&locale);
        Self {
            host: host.into(),
            language_iso: definition.language_iso().map(str::to_string),
            country_iso: definition.country_iso().to_string(),
            locale,
            is_root_domain,
            host_url: None,
            locale_url_mapping: None,
        }
    }

    /// Attach the enriched URL data computed on full bootstrap.
    pub fn with_urls(mut self, host_url: impl Into<String>, locale_url_mapping: impl Into<String>) -> Self {
        self.host_url = Some(host_url.into());
        self.locale_url_mapping = Some(locale_url_mapping.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Locale served on this site; empty for locale-less root domains.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn language_iso(&self) -> Option<&str> {
        self.language_iso.as_deref()
    }

    pub fn country_iso(&self) -> &str {
        &self.country_iso
    }

    pub fn is_root_domain(&self) -> bool {
        self.is_root_domain
    }

    pub fn host_url(&self) -> Option<&str> {
        self.host_url.as_deref()
    }

    pub fn locale_url_mapping(&self) -> Option<&str> {
        self.locale_url_mapping.as_deref()
    }

    pub fn locale_definition(&self) -> LocaleDefinition {
        LocaleDefinition::from_fragment(&self.locale)
    }
}
