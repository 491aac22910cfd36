//! Value types produced by context resolution.

mod context;
mod locale_definition;
mod route_item;
mod zone;

pub use context::{ContextSummary, I18nContext, ZoneSummary};
pub use locale_definition::LocaleDefinition;
pub use route_item::{RouteAttributes, RouteItem};
pub use zone::{BootstrappableZone, I18nZone, Zone, ZoneSite};
