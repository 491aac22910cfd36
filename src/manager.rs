//! Context assembly: route item, zone, path generator and locale definition.

use crate::adapter::path_generator::{ConfiguredPathGenerator, PathGenerator};
use crate::builder::{
    ConfiguredZoneBuilder, DefaultRouteItemBuilder, Document, RouteItemBuilder, RouteParameters,
    ZoneBuilder, ZoneSitesBuilder,
};
use crate::config::I18nConfig;
use crate::error::{AdapterNotFoundError, I18nError, RegistryError};
use crate::model::{I18nContext, I18nZone, LocaleDefinition, RouteItem};
use crate::options::OptionResolver;
use crate::registry::{AdapterRegistrations, AdapterRegistries, RegistryHandle};
use axum::http::request::Parts;
use std::sync::Arc;
use tracing::debug;

/// Resolves [`I18nContext`]s.
///
/// Resolution is synchronous and runs to completion on the calling thread.
/// Each resolution works on one registry snapshot, so a concurrent
/// [`RegistryHandle::swap`] never affects a resolution already in flight.
/// Failures of any step propagate unchanged.
#[derive(Clone)]
pub struct I18nContextManager {
    route_item_builder: Arc<dyn RouteItemBuilder>,
    zone_builder: Arc<dyn ZoneBuilder>,
    zone_sites_builder: Arc<dyn ZoneSitesBuilder>,
    registries: Arc<RegistryHandle>,
}

impl I18nContextManager {
    pub fn new(
        route_item_builder: Arc<dyn RouteItemBuilder>,
        zone_builder: Arc<dyn ZoneBuilder>,
        zone_sites_builder: Arc<dyn ZoneSitesBuilder>,
        registries: Arc<RegistryHandle>,
    ) -> Self {
        Self {
            route_item_builder,
            zone_builder,
            zone_sites_builder,
            registries,
        }
    }

    /// Manager over the built-in adapters and the configured zone catalogue.
    pub fn from_config(config: &I18nConfig) -> Result<Self, RegistryError> {
        let registries =
            AdapterRegistries::compose(AdapterRegistrations::builtin(), &config.registry)?;
        let zones = ConfiguredZoneBuilder::from_config(config);

        Ok(Self::new(
            Arc::new(DefaultRouteItemBuilder::new().with_locales(config.locales())),
            Arc::new(zones.clone()),
            Arc::new(zones.sites_builder()),
            Arc::new(RegistryHandle::new(registries)),
        ))
    }

    pub fn registries(&self) -> &Arc<RegistryHandle> {
        &self.registries
    }

    pub fn build_context_by_parameters(
        &self,
        route_type: &str,
        parameters: &RouteParameters,
        full_bootstrap: bool,
    ) -> Result<I18nContext, I18nError> {
        let registries = self.registries.current();
        self.build_context_by_parameters_in(&registries, route_type, parameters, full_bootstrap)
    }

    /// Like [`Self::build_context_by_parameters`], against a snapshot the
    /// caller already holds.
    pub fn build_context_by_parameters_in(
        &self,
        registries: &AdapterRegistries,
        route_type: &str,
        parameters: &RouteParameters,
        full_bootstrap: bool,
    ) -> Result<I18nContext, I18nError> {
        let route_item = self
            .route_item_builder
            .build_route_item_by_parameters(route_type, parameters)?;
        self.build_context(registries, route_item, full_bootstrap)
    }

    /// `Ok(None)` when the request carries no i18n routing facts.
    pub fn build_context_by_request(
        &self,
        request: &Parts,
        document: Option<&Document>,
        full_bootstrap: bool,
    ) -> Result<Option<I18nContext>, I18nError> {
        let registries = self.registries.current();
        self.build_context_by_request_in(&registries, request, document, full_bootstrap)
    }

    pub fn build_context_by_request_in(
        &self,
        registries: &AdapterRegistries,
        request: &Parts,
        document: Option<&Document>,
        full_bootstrap: bool,
    ) -> Result<Option<I18nContext>, I18nError> {
        let Some(route_item) = self
            .route_item_builder
            .build_route_item_by_request(request, document)
        else {
            debug!("No route item for {} {}", request.method, request.uri.path());
            return Ok(None);
        };
        self.build_context(registries, route_item, full_bootstrap)
            .map(Some)
    }

    /// Path generator registered under `identifier`.
    pub fn build_path_generator(
        &self,
        identifier: &str,
    ) -> Result<Arc<dyn PathGenerator>, AdapterNotFoundError> {
        self.registries.current().path_generators().get(identifier)
    }

    pub fn build_locale_definition(&self, route_item: &RouteItem) -> LocaleDefinition {
        LocaleDefinition::from_fragment(route_item.locale_fragment())
    }

    fn build_context(
        &self,
        registries: &AdapterRegistries,
        route_item: RouteItem,
        full_bootstrap: bool,
    ) -> Result<I18nContext, I18nError> {
        let zone = self.setup_zone(registries, &route_item, full_bootstrap)?;
        let path_generator = self.setup_path_generator(registries, &route_item, full_bootstrap)?;
        let locale_definition = self.build_locale_definition(&route_item);

        debug!(
            "Resolved {} route to zone {} with locale {:?} (path generator: {})",
            route_item.route_type(),
            zone.name(),
            locale_definition.locale(),
            path_generator.is_some()
        );

        Ok(I18nContext::new(
            route_item,
            zone,
            locale_definition,
            path_generator,
        ))
    }

    /// Build the zone and, if it supports bootstrapping, let its locale
    /// provider and the sites builder populate it. Bootstrapping runs on every
    /// resolution; only site enrichment depends on `full_bootstrap`.
    fn setup_zone(
        &self,
        registries: &AdapterRegistries,
        route_item: &RouteItem,
        full_bootstrap: bool,
    ) -> Result<Box<dyn I18nZone>, I18nError> {
        let mut zone = self.zone_builder.build_zone(route_item)?;

        if let Some(bootstrap) = zone.as_bootstrappable() {
            let provider = registries
                .locale_providers()
                .get(bootstrap.as_zone().locale_adapter_name())?;
            bootstrap.process_provider_locales(provider.as_ref());

            let sites =
                self.zone_sites_builder
                    .build_zone_sites(bootstrap.as_zone(), route_item, full_bootstrap);
            bootstrap.set_sites(sites);
        }

        Ok(zone)
    }

    fn setup_path_generator(
        &self,
        registries: &AdapterRegistries,
        route_item: &RouteItem,
        full_bootstrap: bool,
    ) -> Result<Option<ConfiguredPathGenerator>, I18nError> {
        if !full_bootstrap {
            return Ok(None);
        }

        // Route attributes must resolve against a schema of exactly their own keys.
        let attributes = route_item.route_attributes();
        let mut options = OptionResolver::new();
        options.set_defined(attributes.keys());
        options.resolve(attributes)?;

        let generator = registries.path_generators().get(route_item.route_type())?;
        generator.configure_options(&mut options);

        Ok(Some(ConfiguredPathGenerator::new(generator, options)))
    }
}
