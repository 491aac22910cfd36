//! Locale providers: supply the locale catalogue of a zone.

use crate::adapter::{Adapter, AdapterIdentity};
use crate::model::{I18nZone, LocaleDefinition};
use serde_json::Value;

/// Supplies the locales a zone serves.
pub trait LocaleProvider: Adapter {
    fn provide_locales(&self, zone: &dyn I18nZone) -> Vec<LocaleDefinition>;
}

/// Built-in provider registered as `system`.
///
/// Serves the zone's allowed locales. A zone without restrictions gets the
/// `locales` list from the adapter configuration.
#[derive(Debug, Default)]
pub struct SystemLocaleProvider {
    identity: AdapterIdentity,
}

impl SystemLocaleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn configured_locales(&self) -> Vec<String> {
        self.identity
            .config()
            .get("locales")
            .and_then(Value::as_array)
            .map(|locales| {
                locales
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Adapter for SystemLocaleProvider {
    fn identity(&self) -> &AdapterIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut AdapterIdentity {
        &mut self.identity
    }
}

impl LocaleProvider for SystemLocaleProvider {
    fn provide_locales(&self, zone: &dyn I18nZone) -> Vec<LocaleDefinition> {
        let locales = if zone.allowed_locales().is_empty() {
            self.configured_locales()
        } else {
            zone.allowed_locales().to_vec()
        };

        locales
            .iter()
            .filter(|locale| !locale.is_empty())
            .map(|locale| LocaleDefinition::from_fragment(locale))
            .collect()
    }
}
