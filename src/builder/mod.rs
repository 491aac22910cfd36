//! Collaborators that turn raw input into route items, zones and zone sites.
//!
//! The context manager only depends on the traits defined here. The default
//! implementations cover parameter/request parsing and a zone catalogue read
//! from configuration.

mod route_item;
mod zone;

pub use route_item::DefaultRouteItemBuilder;
pub(crate) use route_item::request_host;
pub use zone::{ConfiguredZoneBuilder, ConfiguredZoneSitesBuilder};

use crate::error::{RouteItemError, ZoneSiteNotFoundError};
use crate::model::{I18nZone, RouteItem, ZoneSite};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Explicit routing parameters, keyed by name.
pub type RouteParameters = Map<String, Value>;

/// A content document a request was routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub path: String,
    #[serde(default)]
    pub locale: Option<String>,
}

pub trait RouteItemBuilder: Send + Sync {
    fn build_route_item_by_parameters(
        &self,
        route_type: &str,
        parameters: &RouteParameters,
    ) -> Result<RouteItem, RouteItemError>;

    /// `None` when the request carries no i18n routing facts.
    fn build_route_item_by_request(
        &self,
        request: &Parts,
        document: Option<&Document>,
    ) -> Option<RouteItem>;
}

pub trait ZoneBuilder: Send + Sync {
    fn build_zone(&self, route_item: &RouteItem) -> Result<Box<dyn I18nZone>, ZoneSiteNotFoundError>;
}

pub trait ZoneSitesBuilder: Send + Sync {
    /// Member sites of `zone`. Expensive per-site enrichment only runs when
    /// `full_bootstrap` is set.
    fn build_zone_sites(
        &self,
        zone: &dyn I18nZone,
        route_item: &RouteItem,
        full_bootstrap: bool,
    ) -> Vec<ZoneSite>;
}
