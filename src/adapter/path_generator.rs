//! Path generators: build the alternate URLs of a route across a zone's sites.

use crate::adapter::{Adapter, AdapterIdentity};
use crate::error::OptionValidationError;
use crate::model::{I18nZone, RouteItem, ZoneSite};
use crate::options::{OptionResolver, OptionType, ResolvedOptions};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// One localized variant of the current route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateUrl {
    pub locale: String,
    pub hreflang: String,
    pub url: String,
}

/// Generates alternate URLs for one route type.
pub trait PathGenerator: Adapter {
    /// Declare which route attributes this generator consumes and their shapes.
    fn configure_options(&self, options: &mut OptionResolver);

    fn generate_urls(
        &self,
        route_item: &RouteItem,
        zone: &dyn I18nZone,
        options: &ResolvedOptions,
    ) -> Vec<AlternateUrl>;
}

/// A path generator paired with the option set it declared for a route item.
#[derive(Clone)]
pub struct ConfiguredPathGenerator {
    generator: Arc<dyn PathGenerator>,
    options: OptionResolver,
}

impl ConfiguredPathGenerator {
    pub fn new(generator: Arc<dyn PathGenerator>, options: OptionResolver) -> Self {
        Self { generator, options }
    }

    pub fn name(&self) -> Option<&str> {
        self.generator.name()
    }

    pub fn options(&self) -> &OptionResolver {
        &self.options
    }

    pub fn generator(&self) -> &Arc<dyn PathGenerator> {
        &self.generator
    }

    /// Resolve the route attributes against the declared options and generate.
    pub fn generate(
        &self,
        route_item: &RouteItem,
        zone: &dyn I18nZone,
    ) -> Result<Vec<AlternateUrl>, OptionValidationError> {
        let resolved = self.options.resolve(route_item.route_attributes())?;
        Ok(self.generator.generate_urls(route_item, zone, &resolved))
    }
}

impl fmt::Debug for ConfiguredPathGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredPathGenerator")
            .field("name", &self.name())
            .field("options", &self.options)
            .finish()
    }
}

fn normalize_path(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn site_url(site: &ZoneSite, path: &str) -> Option<String> {
    let host_url = site.host_url()?;
    let mapping = site.locale_url_mapping().unwrap_or_default();
    Some(format!("{}{}{}", host_url, mapping, normalize_path(path)))
}

/// Built-in generator for `route` and `static_route` items.
///
/// Consumes an optional `path` attribute. Root sites without a locale are
/// emitted as `x-default`. With `trailingSlash` configured, every URL ends
/// in `/`.
#[derive(Debug, Default)]
pub struct RoutePathGenerator {
    identity: AdapterIdentity,
}

impl RoutePathGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn trailing_slash(&self) -> bool {
        self.identity
            .config()
            .get("trailingSlash")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl Adapter for RoutePathGenerator {
    fn identity(&self) -> &AdapterIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut AdapterIdentity {
        &mut self.identity
    }
}

impl PathGenerator for RoutePathGenerator {
    fn configure_options(&self, options: &mut OptionResolver) {
        options
            .set_default("path", json!(""))
            .set_allowed_types("path", &[OptionType::String]);
    }

    fn generate_urls(
        &self,
        _route_item: &RouteItem,
        zone: &dyn I18nZone,
        options: &ResolvedOptions,
    ) -> Vec<AlternateUrl> {
        let path = options.get_str("path").unwrap_or_default();

        zone.sites()
            .iter()
            .filter_map(|site| {
                let mut url = site_url(site, path)?;
                if self.trailing_slash() && !url.ends_with('/') {
                    url.push('/');
                }
                let hreflang = site
                    .locale_definition()
                    .hreflang()
                    .unwrap_or_else(|| "x-default".to_string());
                Some(AlternateUrl {
                    locale: site.locale().to_string(),
                    hreflang,
                    url,
                })
            })
            .collect()
    }
}

/// Built-in generator for `document` items.
///
/// Requires `document_id` and `path`. Documents are locale specific, so sites
/// without a locale are skipped.
#[derive(Debug, Default)]
pub struct DocumentPathGenerator {
    identity: AdapterIdentity,
}

impl DocumentPathGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for DocumentPathGenerator {
    fn identity(&self) -> &AdapterIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut AdapterIdentity {
        &mut self.identity
    }
}

impl PathGenerator for DocumentPathGenerator {
    fn configure_options(&self, options: &mut OptionResolver) {
        options
            .set_required(["document_id", "path"])
            .set_allowed_types("document_id", &[OptionType::Int])
            .set_allowed_types("path", &[OptionType::String]);
    }

    fn generate_urls(
        &self,
        _route_item: &RouteItem,
        zone: &dyn I18nZone,
        options: &ResolvedOptions,
    ) -> Vec<AlternateUrl> {
        let path = options.get_str("path").unwrap_or_default();

        zone.sites()
            .iter()
            .filter(|site| !site.locale().is_empty())
            .filter_map(|site| {
                let url = site_url(site, path)?;
                let hreflang = site.locale_definition().hreflang()?;
                Some(AlternateUrl {
                    locale: site.locale().to_string(),
                    hreflang,
                    url,
                })
            })
            .collect()
    }
}
