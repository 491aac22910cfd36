use crate::builder::{ZoneBuilder, ZoneSitesBuilder};
use crate::config::{I18nConfig, ZoneConfig};
use crate::error::ZoneSiteNotFoundError;
use crate::model::{I18nZone, RouteItem, Zone, ZoneSite};
use std::sync::Arc;
use tracing::debug;

const IMPLICIT_ZONE_NAME: &str = "default";
const IMPLICIT_LOCALE_ADAPTER: &str = "system";

#[derive(Debug, Default)]
struct ZoneCatalog {
    zones: Vec<ZoneConfig>,
    default_zone: Option<ZoneConfig>,
}

impl ZoneCatalog {
    /// Zone serving `host`, else the default zone.
    fn find(&self, host: Option<&str>) -> Option<&ZoneConfig> {
        host.and_then(|host| {
            self.zones.iter().find(|zone| {
                zone.sites
                    .iter()
                    .any(|site| site.host.eq_ignore_ascii_case(host))
            })
        })
        .or(self.default_zone.as_ref())
    }

    fn by_zone(&self, zone: &dyn I18nZone) -> Option<&ZoneConfig> {
        self.zones
            .iter()
            .chain(self.default_zone.iter())
            .find(|config| config.id == zone.id() && config.name == zone.name())
    }
}

/// Zone builder backed by the configured zone table.
///
/// A route item's host selects the zone owning a site with that host; other
/// route items get the default zone. Without any configured zone an implicit,
/// site-less default zone is used.
#[derive(Debug, Clone)]
pub struct ConfiguredZoneBuilder {
    catalog: Arc<ZoneCatalog>,
}

/// Zone sites builder reading the same zone table as [`ConfiguredZoneBuilder`].
#[derive(Debug, Clone)]
pub struct ConfiguredZoneSitesBuilder {
    catalog: Arc<ZoneCatalog>,
}

impl ConfiguredZoneBuilder {
    pub fn new(zones: Vec<ZoneConfig>, default_zone: Option<ZoneConfig>) -> Self {
        Self {
            catalog: Arc::new(ZoneCatalog {
                zones,
                default_zone,
            }),
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        Self::new(config.zones.clone(), config.default_zone.clone())
    }

    /// Sites builder sharing this builder's zone table.
    pub fn sites_builder(&self) -> ConfiguredZoneSitesBuilder {
        ConfiguredZoneSitesBuilder {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl ZoneBuilder for ConfiguredZoneBuilder {
    fn build_zone(&self, route_item: &RouteItem) -> Result<Box<dyn I18nZone>, ZoneSiteNotFoundError> {
        let catalog = &self.catalog;

        if catalog.zones.is_empty() && catalog.default_zone.is_none() {
            return Ok(Box::new(Zone::new(
                None,
                IMPLICIT_ZONE_NAME,
                IMPLICIT_LOCALE_ADAPTER,
                Vec::new(),
            )));
        }

        let config = catalog
            .find(route_item.host())
            .ok_or_else(|| ZoneSiteNotFoundError {
                host: route_item.host().map(str::to_string),
            })?;

        debug!("Route item host {:?} resolved to zone {}", route_item.host(), config.name);

        Ok(Box::new(Zone::new(
            config.id,
            config.name.clone(),
            config.locale_adapter.clone(),
            config.allowed_locales.clone(),
        )))
    }
}

impl ZoneSitesBuilder for ConfiguredZoneSitesBuilder {
    fn build_zone_sites(
        &self,
        zone: &dyn I18nZone,
        route_item: &RouteItem,
        full_bootstrap: bool,
    ) -> Vec<ZoneSite> {
        let Some(config) = self.catalog.by_zone(zone) else {
            return Vec::new();
        };

        debug!(
            "Building {} sites for zone {} (host {:?}, full bootstrap: {})",
            config.sites.len(),
            config.name,
            route_item.host(),
            full_bootstrap
        );

        config
            .sites
            .iter()
            .map(|site| {
                let zone_site = ZoneSite::new(site.host.clone(), site.locale.clone(), site.root);
                if !full_bootstrap {
                    return zone_site;
                }
                let host_url = format!("{}://{}", config.scheme, site.host);
                let locale_url_mapping = if site.locale.is_empty() {
                    String::new()
                } else {
                    format!("/{}", site.locale)
                };
                zone_site.with_urls(host_url, locale_url_mapping)
            })
            .collect()
    }
}
