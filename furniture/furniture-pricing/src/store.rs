//! Shared holder for the current pricing snapshot.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::PricingResult;
use crate::load::load_pricing;
use crate::tables::PricingTables;

/// The current [`PricingTables`] snapshot, replaceable at runtime.
///
/// Readers take an `Arc` to the snapshot and keep using it for the whole
/// computation, so a concurrent [`replace`](Self::replace) never changes
/// prices under an in-flight budget. Snapshots are never mutated in place.
///
/// # Example
///
/// ```
/// use furniture_pricing::{PricingStore, PricingTables};
///
/// let store = PricingStore::default();
/// let before = store.snapshot();
///
/// let mut updated = PricingTables::builtin();
/// updated.labor.base_rate_per_m2 = 150.0;
/// store.replace(updated);
///
/// assert!((before.labor.base_rate_per_m2 - 120.0).abs() < 1e-10);
/// assert!((store.snapshot().labor.base_rate_per_m2 - 150.0).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct PricingStore {
    current: RwLock<Arc<PricingTables>>,
}

impl Default for PricingStore {
    fn default() -> Self {
        Self::new(PricingTables::builtin())
    }
}

impl PricingStore {
    /// Create a store holding `tables`.
    #[must_use]
    pub fn new(tables: PricingTables) -> Self {
        Self {
            current: RwLock::new(Arc::new(tables)),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PricingTables> {
        // The lock only guards an Arc swap; a poisoned guard still holds a valid Arc
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Install `tables` as the current snapshot and return the previous one.
    pub fn replace(&self, tables: PricingTables) -> Arc<PricingTables> {
        let next = Arc::new(tables);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        drop(guard);

        info!(
            supplier = %previous.source.supplier,
            previous_capture = %previous.source.captured_on,
            "Replaced pricing snapshot"
        );
        previous
    }

    /// Load tables from a file and install them.
    ///
    /// On error the current snapshot is left untouched.
    ///
    /// # Errors
    ///
    /// Returns any error from [`load_pricing`].
    pub fn reload_from<P: AsRef<Path>>(&self, path: P) -> PricingResult<Arc<PricingTables>> {
        let tables = load_pricing(path)?;
        Ok(self.replace(tables))
    }
}
