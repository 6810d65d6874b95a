use crate::dependency::EdgeOutcome;
use crate::error::Result;
use crate::registry::{PerspectiveOutcome, Registry};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Registry handle for concurrent callers.
///
/// Mutations hold the write lock for their whole duration; reads share the
/// read lock and never observe a half-applied mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn add_perspective_if_absent(&self, name: &str) -> Result<PerspectiveOutcome> {
        self.write().add_perspective_if_absent(name)
    }

    pub fn add_dependency(&self, from: &str, to: &str) -> Result<EdgeOutcome> {
        self.write().add_dependency(from, to)
    }

    pub fn add_kpi(&self, perspective: &str, kpi: &str, target: f64, achieved: f64) -> Result<()> {
        self.write().add_kpi(perspective, kpi, target, achieved)
    }

    /// Run `f` against a consistent snapshot
    pub fn read<T>(&self, f: impl FnOnce(&Registry) -> T) -> T {
        f(&self.read_guard())
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
