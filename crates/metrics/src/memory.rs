//! In-memory counter backend

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::{
    Counter, CounterBackend, CounterDescriptor, CounterIncrement, CounterSnapshot, MetricsError, Result,
};

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

/// Counters held in process
///
/// Scope registration takes the write lock; increments share the read lock
/// and add atomically.
#[derive(Debug, Default)]
pub struct MemoryCounterBackend {
    scopes: RwLock<HashMap<String, HashMap<String, Counter>>>,
    stopped: AtomicBool,
}

impl MemoryCounterBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `scope` has been initialized
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.read().contains_key(scope)
    }

    /// Number of initialized scopes
    pub fn scope_count(&self) -> usize {
        self.scopes.read().len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    fn check_running(&self) -> Result<()> {
        if self.is_stopped() {
            return Err(MetricsError::Stopped);
        }
        Ok(())
    }
}

impl CounterBackend for MemoryCounterBackend {
    fn init(&self, scope: &str, counters: &[CounterDescriptor]) -> Result<()> {
        self.check_running()?;

        let mut scopes = self.scopes.write();
        let entry = scopes.entry(scope.to_string()).or_default();
        for descriptor in counters {
            entry.entry(descriptor.name.clone()).or_default();
        }
        Ok(())
    }

    fn inc(&self, scope: &str, increments: &[CounterIncrement]) -> Result<()> {
        self.check_running()?;

        let scopes = self.scopes.read();
        let counters = scopes.get(scope).ok_or_else(|| MetricsError::unknown_scope(scope))?;

        // Validate all names first so a bad increment list changes nothing
        for inc in increments {
            if !counters.contains_key(&inc.name) {
                return Err(MetricsError::unknown_counter(scope, &inc.name));
            }
        }
        for inc in increments {
            if let Some(counter) = counters.get(&inc.name) {
                counter.add(inc.value);
            }
        }
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.stopped.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn snapshot(&self) -> CounterSnapshot {
        let mut snapshot = CounterSnapshot::default();
        for (scope, counters) in self.scopes.read().iter() {
            for (name, counter) in counters {
                snapshot.insert(scope, name, counter.get());
            }
        }
        snapshot
    }
}
