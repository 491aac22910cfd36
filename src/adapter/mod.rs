//! Pluggable adapters selected through the registries.
//!
//! Three adapter kinds exist: locale providers, path generators and
//! redirectors. All of them share the [`Adapter`] capability set, which lets
//! the composition step push each adapter's alias and configuration into it.
//!
//! # Architecture
//!
//! - `locale_provider`: supplies the locale catalogue of a zone
//! - `path_generator`: builds alternate URLs for a route item
//! - `redirector`: decides where a locale-less request should go

pub mod locale_provider;
pub mod path_generator;
pub mod redirector;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::definitions::{LOCALE_PROVIDER_TAG, PATH_GENERATOR_TAG, REDIRECTOR_TAG};

/// Free-form per-alias adapter configuration.
pub type AdapterOptions = Map<String, Value>;

/// The adapter families known to the registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdapterKind {
    LocaleProvider,
    PathGenerator,
    Redirector,
}

impl AdapterKind {
    /// Registration tag operators use when declaring an adapter of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            AdapterKind::LocaleProvider => LOCALE_PROVIDER_TAG,
            AdapterKind::PathGenerator => PATH_GENERATOR_TAG,
            AdapterKind::Redirector => REDIRECTOR_TAG,
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdapterKind::LocaleProvider => "locale.provider",
            AdapterKind::PathGenerator => "path.generator",
            AdapterKind::Redirector => "redirector",
        };
        f.write_str(label)
    }
}

/// Name and configuration assigned to an adapter during composition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterIdentity {
    name: Option<String>,
    config: AdapterOptions,
}

impl AdapterIdentity {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn config(&self) -> &AdapterOptions {
        &self.config
    }

    /// String value of a config key, if present and a string.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }
}

/// Capability set shared by every adapter.
///
/// `set_name` and `set_config` take `&mut self`, so they can only be called
/// while the composition step still owns the adapter. Once registered the
/// adapter is shared behind an `Arc` and its identity is frozen.
pub trait Adapter: Send + Sync {
    fn identity(&self) -> &AdapterIdentity;

    fn identity_mut(&mut self) -> &mut AdapterIdentity;

    fn set_name(&mut self, name: &str) {
        self.identity_mut().name = Some(name.to_string());
    }

    fn set_config(&mut self, config: AdapterOptions) {
        self.identity_mut().config = config;
    }

    /// Alias this adapter was registered under.
    fn name(&self) -> Option<&str> {
        self.identity().name()
    }

    fn config(&self) -> &AdapterOptions {
        self.identity().config()
    }
}
