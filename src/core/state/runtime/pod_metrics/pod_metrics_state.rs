use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::core::state::runtime::pod_metrics::pod_metrics_entity::{PodKey, PodMetricsSnapshot};

/// A cached snapshot together with the monotonic time it was stored.
#[derive(Debug, Clone)]
pub struct PodMetricsEntry {
    pub snapshot: PodMetricsSnapshot,
    pub stored_at: Instant,
}

impl PodMetricsEntry {
    #[inline]
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// In-memory pod metrics of one cluster.
///
/// This state:
/// - lives only in memory (NOT persisted)
/// - is replaced wholesale by every successful collection
/// - keeps serving its entries after a failed collection until they expire
#[derive(Debug, Clone, Default)]
pub struct PodMetricsState {
    pub entries: HashMap<PodKey, PodMetricsEntry>,

    // ===== Refresh bookkeeping =====
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub last_refreshed_instant: Option<Instant>,
    pub refresh_count: u64,
    pub evicted_total: u64,

    // ===== Last collection error =====
    pub last_error_at: Option<DateTime<Utc>>,
    pub last_error_message: Option<String>,
}

impl PodMetricsState {
    /// Replace all entries with the result of a full collection.
    pub fn apply_refresh(&mut self, snapshots: Vec<PodMetricsSnapshot>, now: Instant) {
        self.entries = snapshots
            .into_iter()
            .map(|snapshot| {
                (
                    snapshot.key(),
                    PodMetricsEntry {
                        snapshot,
                        stored_at: now,
                    },
                )
            })
            .collect();

        self.last_refreshed_at = Some(Utc::now());
        self.last_refreshed_instant = Some(now);
        self.refresh_count += 1;
        self.last_error_at = None;
        self.last_error_message = None;
    }

    /// Insert or overwrite a single pod (live fetch on cache miss).
    pub fn upsert(&mut self, snapshot: PodMetricsSnapshot, now: Instant) {
        self.entries.insert(
            snapshot.key(),
            PodMetricsEntry {
                snapshot,
                stored_at: now,
            },
        );
    }

    /// Drop entries older than `ttl`; returns how many were removed.
    pub fn evict_expired(&mut self, ttl: Duration, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(ttl, now));

        let evicted = before - self.entries.len();
        self.evicted_total += evicted as u64;
        evicted
    }

    /// Keep at most `max_entries`, dropping the oldest first.
    pub fn enforce_capacity(&mut self, max_entries: usize) -> usize {
        if self.entries.len() <= max_entries {
            return 0;
        }

        let mut by_age: Vec<(Instant, PodKey)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.stored_at, key.clone()))
            .collect();
        by_age.sort();

        let excess = self.entries.len() - max_entries;
        for (_, key) in by_age.into_iter().take(excess) {
            self.entries.remove(&key);
        }

        self.evicted_total += excess as u64;
        excess
    }

    /// Mark an error during collection without touching the entries.
    pub fn mark_error(&mut self, msg: String) {
        self.last_error_message = Some(msg);
        self.last_error_at = Some(Utc::now());
    }

    /// A successful full collection happened within `ttl`.
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        self.last_refreshed_instant
            .map(|t| now.saturating_duration_since(t) < ttl)
            .unwrap_or(false)
    }

    pub fn fresh_entry(&self, key: &PodKey, ttl: Duration, now: Instant) -> Option<&PodMetricsEntry> {
        self.entries.get(key).filter(|entry| entry.is_fresh(ttl, now))
    }

    pub fn fresh_snapshots<'a>(
        &'a self,
        ttl: Duration,
        now: Instant,
    ) -> impl Iterator<Item = &'a PodMetricsSnapshot> + 'a {
        self.entries
            .values()
            .filter(move |entry| entry.is_fresh(ttl, now))
            .map(|entry| &entry.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(ns: &str, name: &str, cpu: u64) -> PodMetricsSnapshot {
        PodMetricsSnapshot {
            namespace: ns.into(),
            name: name.into(),
            timestamp: None,
            window: None,
            containers: Vec::new(),
            cpu_millicores: cpu,
            memory_bytes: 0,
        }
    }

    #[test]
    fn refresh_replaces_entries_and_clears_error() {
        let now = Instant::now();
        let mut state = PodMetricsState::default();
        state.apply_refresh(vec![snapshot("a", "old", 1)], now);
        state.mark_error("boom".into());

        state.apply_refresh(vec![snapshot("a", "new", 2)], now);

        assert_eq!(state.entries.len(), 1);
        assert!(state.entries.contains_key(&PodKey::new("a", "new")));
        assert!(state.last_error_message.is_none());
        assert_eq!(state.refresh_count, 2);
    }

    #[test]
    fn mark_error_keeps_entries() {
        let mut state = PodMetricsState::default();
        state.apply_refresh(vec![snapshot("a", "p", 1)], Instant::now());

        state.mark_error("metrics API unavailable".into());

        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.last_error_message.as_deref(), Some("metrics API unavailable"));
        assert!(state.last_error_at.is_some());
    }

    #[test]
    fn evicts_only_expired_entries() {
        let start = Instant::now();
        let ttl = Duration::from_secs(60);
        let mut state = PodMetricsState::default();
        state.upsert(snapshot("a", "old", 1), start);
        state.upsert(snapshot("a", "young", 1), start + Duration::from_secs(30));

        let evicted = state.evict_expired(ttl, start + Duration::from_secs(61));

        assert_eq!(evicted, 1);
        assert!(state.entries.contains_key(&PodKey::new("a", "young")));
        assert_eq!(state.evicted_total, 1);
    }

    #[test]
    fn capacity_drops_oldest_first() {
        let start = Instant::now();
        let mut state = PodMetricsState::default();
        for i in 0..5u64 {
            state.upsert(snapshot("a", &format!("p{i}"), i), start + Duration::from_secs(i));
        }

        let evicted = state.enforce_capacity(3);

        assert_eq!(evicted, 2);
        assert_eq!(state.entries.len(), 3);
        assert!(!state.entries.contains_key(&PodKey::new("a", "p0")));
        assert!(!state.entries.contains_key(&PodKey::new("a", "p1")));
        assert!(state.entries.contains_key(&PodKey::new("a", "p4")));
    }

    #[test]
    fn freshness_follows_ttl() {
        let start = Instant::now();
        let ttl = Duration::from_secs(10);
        let mut state = PodMetricsState::default();
        assert!(!state.is_fresh(ttl, start));

        state.apply_refresh(vec![snapshot("a", "p", 5)], start);
        let key = PodKey::new("a", "p");

        assert!(state.is_fresh(ttl, start + Duration::from_secs(9)));
        assert!(state.fresh_entry(&key, ttl, start + Duration::from_secs(9)).is_some());
        assert!(!state.is_fresh(ttl, start + Duration::from_secs(10)));
        assert!(state.fresh_entry(&key, ttl, start + Duration::from_secs(10)).is_none());
        assert_eq!(state.fresh_snapshots(ttl, start + Duration::from_secs(11)).count(), 0);
    }
}
