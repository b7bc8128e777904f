use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::time::Instant;

use crate::rules::RuleSet;

/// Cached robots.txt state for one origin.
#[derive(Debug, Clone)]
pub struct RobotsRecord {
    /// Parsed rules, replaced wholesale on refresh and never mutated.
    pub rules: Arc<RuleSet>,
    /// When the rules were last fetched (or substituted with allow-all).
    pub fetched_at: Instant,
    /// Most recent request attempt to this origin, whatever its outcome.
    /// Independent of `fetched_at`: refreshing the rules keeps it.
    pub last_crawled: Option<Instant>,
    /// Consultations served by this record since it was (re)fetched.
    pub usage_count: u32,
}

impl RobotsRecord {
    pub fn new(rules: RuleSet, fetched_at: Instant) -> Self {
        Self {
            rules: Arc::new(rules),
            fetched_at,
            last_crawled: None,
            usage_count: 0,
        }
    }
}

/// Per-origin record store, one record per origin at most.
///
/// Mutations on an absent origin are silent no-ops. The lock is only held for
/// map access, never across an await.
#[derive(Debug, Default)]
pub struct RobotsStore {
    records: Mutex<HashMap<String, RobotsRecord>>,
}

impl RobotsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, origin: &str) -> Option<RobotsRecord> {
        self.lock().get(origin).cloned()
    }

    pub fn put(&self, origin: String, record: RobotsRecord) {
        self.lock().insert(origin, record);
    }

    pub fn touch_last_crawled(&self, origin: &str, at: Instant) {
        if let Some(record) = self.lock().get_mut(origin) {
            record.last_crawled = Some(at);
        }
    }

    pub fn increment_usage(&self, origin: &str) {
        if let Some(record) = self.lock().get_mut(origin) {
            record.usage_count += 1;
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RobotsRecord>> {
        self.records.lock().expect("robots store lock poisoned")
    }
}
