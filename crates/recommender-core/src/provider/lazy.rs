//! Guarded lazy materialization of a provider's version mapping

use std::sync::{Mutex, OnceLock, PoisonError};

use crate::Result;
use crate::matcher::VersionMapping;

/// A version mapping computed at most once, on first use.
///
/// Uses check-lock-check-compute-store: readers that find the mapping
/// already stored never take the lock, and concurrent first readers wait
/// for the single loader instead of racing it. A failed load stores
/// nothing, so the next query tries again.
#[derive(Debug, Default)]
pub(crate) struct LazyMapping {
    value: OnceLock<VersionMapping>,
    init: Mutex<()>,
}

impl LazyMapping {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get_or_try_load<F>(&self, load: F) -> Result<&VersionMapping>
    where
        F: FnOnce() -> Result<VersionMapping>,
    {
        if let Some(mapping) = self.value.get() {
            return Ok(mapping);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mapping) = self.value.get() {
            return Ok(mapping);
        }

        let mapping = load()?;
        Ok(self.value.get_or_init(|| mapping))
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.value.get().is_some()
    }
}
