//! Error types for context resolution and adapter composition.
//!
//! Every failure here is a precondition or configuration problem. Nothing is
//! retried: errors propagate to the caller unmodified, who decides whether to
//! fail the request, redirect or fall back.

use crate::adapter::AdapterKind;
use thiserror::Error;

/// Umbrella error for a single context resolution.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error(transparent)]
    RouteItem(#[from] RouteItemError),

    #[error(transparent)]
    ZoneSiteNotFound(#[from] ZoneSiteNotFoundError),

    #[error(transparent)]
    AdapterNotFound(#[from] AdapterNotFoundError),

    #[error(transparent)]
    OptionValidation(#[from] OptionValidationError),
}

/// The route item builder could not derive a route item from its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteItemError {
    #[error("route item type must not be empty")]
    EmptyType,

    #[error("unknown route item type \"{0}\"")]
    UnknownType(String),

    #[error("invalid routing parameter \"{key}\": {reason}")]
    InvalidParameter { key: String, reason: String },
}

/// No configured zone or site matches the resolved route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_missing_zone(.host))]
pub struct ZoneSiteNotFoundError {
    pub host: Option<String>,
}

fn describe_missing_zone(host: &Option<String>) -> String {
    match host {
        Some(host) => format!("no zone site found for host \"{host}\""),
        None => "no zone site found and no default zone configured".to_string(),
    }
}

/// A requested adapter has no registration under the given identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{kind} adapter \"{identifier}\" is not available. please use \"{}\" tag to register new adapter and add \"{identifier}\" as a alias.",
    .kind.tag()
)]
pub struct AdapterNotFoundError {
    pub kind: AdapterKind,
    pub identifier: String,
}

/// Values do not match a declared option set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionValidationError {
    #[error("option \"{key}\" does not exist, defined options are: [{}]", .defined.join(", "))]
    UndefinedOption { key: String, defined: Vec<String> },

    #[error("required option \"{key}\" is missing")]
    MissingRequired { key: String },

    #[error("option \"{key}\" is expected to be of type {expected}, got {actual}")]
    InvalidType {
        key: String,
        expected: String,
        actual: String,
    },
}

/// Composition-time failure while wiring adapters into registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{kind} adapter alias \"{alias}\" is registered more than once")]
    DuplicateAlias { kind: AdapterKind, alias: String },
}
