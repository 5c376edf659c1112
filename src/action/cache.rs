//! Thread-safe memo of parsed action plans.
//!
//! Rendering repeats the same attribute strings on every request. The cache
//! stores the parse result (including failures) keyed by the trimmed
//! expression so concurrent renders share one parse.
//!
//! The cache holds at most `capacity` expressions. Once full, misses are
//! parsed but not stored, so per-row expressions cannot grow it without bound.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::action::{parse_action_plan, ActionPlan};

/// Default maximum number of cached expressions.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Parsed plans keyed by trimmed expression text.
#[derive(Debug, Clone)]
pub struct PlanCache {
    plans: Arc<DashMap<String, Option<ActionPlan>>>,
    stored: Arc<AtomicUsize>,
    capacity: usize,
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl PlanCache {
    /// Create a new empty cache with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty cache holding at most `capacity` expressions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            plans: Arc::new(DashMap::new()),
            stored: Arc::new(AtomicUsize::new(0)),
            capacity,
        }
    }

    /// Return the cached plan for `raw`, parsing and storing it on a miss.
    /// A failed parse is cached as `None`. When the cache is full the plan
    /// is returned without being stored.
    pub fn get_or_parse(&self, raw: &str) -> Option<ActionPlan> {
        let key = raw.trim();
        if let Some(entry) = self.plans.get(key) {
            return entry.value().clone();
        }

        match self.plans.entry(key.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let plan = parse_action_plan(key);
                if self.reserve_slot() {
                    entry.insert(plan.clone());
                } else {
                    debug!(expression = key, "Plan cache full, not storing");
                }
                plan
            }
        }
    }

    fn reserve_slot(&self) -> bool {
        self.stored
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |stored| {
                (stored < self.capacity).then_some(stored + 1)
            })
            .is_ok()
    }

    /// Maximum number of cached expressions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `raw` has been parsed before.
    pub fn contains(&self, raw: &str) -> bool {
        self.plans.contains_key(raw.trim())
    }

    /// Number of cached expressions.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Drop every cached plan.
    pub fn clear(&self) {
        self.plans.clear();
        self.stored.store(0, Ordering::Release);
    }
}
