//! Shared, atomically swappable registry set.

use crate::registry::AdapterRegistries;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Holds the current registry set.
///
/// Readers take a snapshot with [`current`](Self::current) and keep using it
/// for the whole resolution. A reload composes a complete new set and installs
/// it with [`swap`](Self::swap), so no reader ever sees a half-wired set.
#[derive(Debug)]
pub struct RegistryHandle {
    current: RwLock<Arc<AdapterRegistries>>,
}

impl RegistryHandle {
    pub fn new(registries: AdapterRegistries) -> Self {
        Self {
            current: RwLock::new(Arc::new(registries)),
        }
    }

    pub fn current(&self) -> Arc<AdapterRegistries> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Install `next` and return the set it replaced.
    pub fn swap(&self, next: AdapterRegistries) -> Arc<AdapterRegistries> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, Arc::new(next));
        info!("Adapter registries replaced");
        previous
    }
}
