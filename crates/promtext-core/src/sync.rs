//! Synchronized registry wrapper.
//!
//! `SyncRegistry` serializes full renders against each other and against
//! registry membership changes made through the same lock. Value mutation
//! (`increment`, `set`, `observe`) is deliberately NOT protected: individual
//! slots are atomic, so mutation is always memory-safe, but a render may see
//! a histogram mid-update. Callers who need atomic snapshots must hold
//! [`SyncRegistry::lock`] around their mutators as well.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::registry::Registry;
use crate::sink::ByteSink;
use crate::Result;

/// Registry decorator whose renders run under a mutex. Cheap to clone;
/// clones share the registry and the lock.
#[derive(Clone)]
pub struct SyncRegistry {
    inner: Arc<SyncInner>,
}

struct SyncInner {
    registry: Registry,
    render_lock: Mutex<()>,
}

impl SyncRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                registry,
                render_lock: Mutex::new(()),
            }),
        }
    }

    /// The wrapped registry, for metric creation and unsynchronized access.
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Acquire the render lock. Exposed so callers can serialize their own
    /// mutators against renders with the same lock discipline.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner
            .render_lock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Render the whole registry while holding the lock. The guard is scoped,
    /// so the lock is released on every exit path, errors included.
    pub fn render_into(&self, sink: &mut dyn ByteSink) -> Result<()> {
        let _guard = self.lock();
        self.inner.registry.render_into(sink)
    }

    /// Convenience: locked render into an owned string.
    pub fn render_to_string(&self) -> String {
        let _guard = self.lock();
        self.inner.registry.render_to_string()
    }
}
