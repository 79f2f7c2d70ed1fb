// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job mutual exclusion.
//!
//! Store and runner operations on the same job name are serialized through
//! one async mutex per name; different names never contend.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OwnedMutexGuard;

type Slots = Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>;

#[derive(Clone, Default)]
pub struct JobLocks {
    slots: Slots,
}

impl JobLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `name`.
    pub async fn lock(&self, name: &str) -> JobGuard {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(name.to_string()).or_default())
        };
        let guard = slot.lock_owned().await;
        JobGuard { name: name.to_string(), slots: Arc::clone(&self.slots), guard: Some(guard) }
    }

    /// Number of names with a live slot (held or awaited).
    pub fn active(&self) -> usize {
        self.slots.lock().len()
    }
}

/// Exclusive access to one job name; released on drop.
pub struct JobGuard {
    name: String,
    slots: Slots,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        let mut slots = self.slots.lock();
        self.guard.take();
        // Only the map still references the slot: nobody holds or awaits it.
        if slots.get(&self.name).is_some_and(|slot| Arc::strong_count(slot) == 1) {
            slots.remove(&self.name);
        }
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
