//! The resolved i18n context of one request or parameter set.

use crate::adapter::path_generator::{AlternateUrl, ConfiguredPathGenerator};
use crate::error::I18nError;
use crate::model::{I18nZone, LocaleDefinition, RouteItem, ZoneSite};
use serde::Serialize;

/// Route item, zone, locale definition and optional path generator, assembled
/// once every input has been resolved. Immutable after construction.
#[derive(Debug)]
pub struct I18nContext {
    route_item: RouteItem,
    zone: Box<dyn I18nZone>,
    locale_definition: LocaleDefinition,
    path_generator: Option<ConfiguredPathGenerator>,
}

impl I18nContext {
    pub fn new(
        route_item: RouteItem,
        zone: Box<dyn I18nZone>,
        locale_definition: LocaleDefinition,
        path_generator: Option<ConfiguredPathGenerator>,
    ) -> Self {
        Self {
            route_item,
            zone,
            locale_definition,
            path_generator,
        }
    }

    pub fn route_item(&self) -> &RouteItem {
        &self.route_item
    }

    pub fn zone(&self) -> &dyn I18nZone {
        self.zone.as_ref()
    }

    pub fn locale_definition(&self) -> &LocaleDefinition {
        &self.locale_definition
    }

    /// Absent for shallow resolutions.
    pub fn path_generator(&self) -> Option<&ConfiguredPathGenerator> {
        self.path_generator.as_ref()
    }

    /// Zone site serving the resolved locale, preferring one on the route
    /// item's host.
    pub fn current_zone_site(&self) -> Option<&ZoneSite> {
        let language = self.locale_definition.language_iso()?;
        let country = self.locale_definition.country_iso();

        let mut matching = self.zone.sites().iter().filter(|site| {
            site.language_iso()
                .is_some_and(|site_language| site_language.eq_ignore_ascii_case(language))
                && site.country_iso() == country
        });

        match self.route_item.host() {
            Some(host) => {
                let candidates: Vec<&ZoneSite> = matching.collect();
                candidates
                    .iter()
                    .find(|site| site.host().eq_ignore_ascii_case(host))
                    .or_else(|| candidates.first())
                    .copied()
            }
            None => matching.next(),
        }
    }

    /// Alternate URLs of the route across the zone's sites. Empty when no
    /// path generator was resolved.
    pub fn alternate_urls(&self) -> Result<Vec<AlternateUrl>, I18nError> {
        match &self.path_generator {
            Some(generator) => Ok(generator.generate(&self.route_item, self.zone.as_ref())?),
            None => Ok(Vec::new()),
        }
    }

    pub fn summary(&self) -> Result<ContextSummary, I18nError> {
        Ok(ContextSummary {
            route_item: self.route_item.clone(),
            zone: ZoneSummary::of(self.zone.as_ref()),
            locale_definition: self.locale_definition.clone(),
            hreflang: self.locale_definition.hreflang(),
            current_site: self.current_zone_site().cloned(),
            path_generator: self
                .path_generator
                .as_ref()
                .and_then(|generator| generator.name().map(str::to_string)),
            alternate_urls: self.alternate_urls()?,
        })
    }
}

/// Serializable view of a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub id: Option<i64>,
    pub name: String,
    pub locale_adapter_name: String,
    pub provider_locales: Vec<LocaleDefinition>,
    pub sites: Vec<ZoneSite>,
}

impl ZoneSummary {
    pub fn of(zone: &dyn I18nZone) -> Self {
        Self {
            id: zone.id(),
            name: zone.name().to_string(),
            locale_adapter_name: zone.locale_adapter_name().to_string(),
            provider_locales: zone.provider_locales().to_vec(),
            sites: zone.sites().to_vec(),
        }
    }
}

/// Serializable view of an [`I18nContext`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSummary {
    pub route_item: RouteItem,
    pub zone: ZoneSummary,
    pub locale_definition: LocaleDefinition,
    pub hreflang: Option<String>,
    pub current_site: Option<ZoneSite>,
    pub path_generator: Option<String>,
    pub alternate_urls: Vec<AlternateUrl>,
}
