//! Resolve the internationalization context of a request: which zone and site
//! serve it, which locale it is in, and how to build its alternate URLs.

pub mod adapter;
pub mod builder;
pub mod config;
pub mod definitions;
pub mod error;
pub mod manager;
pub mod model;
pub mod options;
pub mod registry;
pub mod server;

pub use error::I18nError;
pub use manager::I18nContextManager;
pub use model::{I18nContext, LocaleDefinition, RouteItem};
