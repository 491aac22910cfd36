//! Adapter registries: alias-keyed, ordered lookup of adapter instances.
//!
//! Registries are filled once during composition (see [`wiring`]) and are
//! read-only afterwards. Hot reloads build a fresh set and swap it in through
//! [`handle::RegistryHandle`].

pub mod handle;
pub mod wiring;

use crate::adapter::locale_provider::LocaleProvider;
use crate::adapter::path_generator::PathGenerator;
use crate::adapter::redirector::Redirector;
use crate::adapter::AdapterKind;
use crate::error::{AdapterNotFoundError, RegistryError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use handle::RegistryHandle;
pub use wiring::{wire_adapters, AdapterRegistration, AdapterRegistrations, AdapterRegistries};

pub type LocaleProviderRegistry = AdapterRegistry<dyn LocaleProvider>;
pub type PathGeneratorRegistry = AdapterRegistry<dyn PathGenerator>;
pub type RedirectorRegistry = AdapterRegistry<dyn Redirector>;

struct RegistryEntry<T: ?Sized> {
    alias: Option<String>,
    adapter: Arc<T>,
}

/// Adapters of one kind, in registration order.
///
/// Aliased adapters are reachable through [`get`](Self::get); adapters
/// without an alias only show up when iterating.
pub struct AdapterRegistry<T: ?Sized> {
    kind: AdapterKind,
    entries: Vec<RegistryEntry<T>>,
    index: BTreeMap<String, usize>,
}

impl<T: ?Sized> AdapterRegistry<T> {
    pub fn new(kind: AdapterKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> AdapterKind {
        self.kind
    }

    /// Append an adapter. Aliases must be unique within the registry.
    pub fn register(&mut self, adapter: Arc<T>, alias: Option<&str>) -> Result<(), RegistryError> {
        if let Some(alias) = alias {
            if self.index.contains_key(alias) {
                return Err(RegistryError::DuplicateAlias {
                    kind: self.kind,
                    alias: alias.to_string(),
                });
            }
            self.index.insert(alias.to_string(), self.entries.len());
        }

        self.entries.push(RegistryEntry {
            alias: alias.map(str::to_string),
            adapter,
        });
        Ok(())
    }

    pub fn has(&self, alias: &str) -> bool {
        self.index.contains_key(alias)
    }

    pub fn get(&self, alias: &str) -> Result<Arc<T>, AdapterNotFoundError> {
        self.index
            .get(alias)
            .map(|&position| Arc::clone(&self.entries[position].adapter))
            .ok_or_else(|| AdapterNotFoundError {
                kind: self.kind,
                identifier: alias.to_string(),
            })
    }

    /// All adapters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.iter().map(|entry| &entry.adapter)
    }

    /// Aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| entry.alias.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for AdapterRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("kind", &self.kind)
            .field("aliases", &self.aliases().collect::<Vec<_>>())
            .field("len", &self.entries.len())
            .finish()
    }
}
