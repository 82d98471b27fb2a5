//! Score ledger - best and average score per speed tier
//!
//! Each tier (integer tick rate) keeps running totals, enough to answer both
//! "best" and "average" without storing every run. The ledger is loaded once
//! at startup and written back to the store only at checkpoints (run end,
//! pause, exit), and only when something changed.
//!
//! Stored blob (`snake_score.json`):
//!
//! ```json
//! {"buckets":[{"tick":10,"best":7,"sum":21,"count":4}]}
//! ```
//!
//! The older list-of-runs layout, `{"scrData":[{"tick":10,"score":3}]}`, is
//! still accepted on load and folded into buckets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Store key for the score blob
pub const SCORES_KEY: &str = "snake_score.json";

/// Running statistics for one speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreEntry {
    pub best: u32,
    pub sum: u64,
    pub count: u32,
}

impl ScoreEntry {
    pub fn record(&mut self, score: u32) {
        self.best = self.best.max(score);
        self.sum = self.sum.saturating_add(u64::from(score));
        self.count = self.count.saturating_add(1);
    }

    /// Floor of sum / count; 0 with no runs
    pub fn average(&self) -> u32 {
        if self.count == 0 {
            return 0;
        }
        u32::try_from(self.sum / u64::from(self.count)).unwrap_or(u32::MAX)
    }

    /// Fold a stored bucket in. Totals that could not come from real runs are rejected.
    fn merge(&mut self, bucket: &StoredBucket) -> Result<(), StoreError> {
        if bucket.count == 0 && (bucket.sum > 0 || bucket.best > 0) {
            return Err(StoreError::Inconsistent("scores in a bucket with no runs"));
        }
        // Every run scored at most `best`.
        if bucket.sum > u64::from(bucket.best) * u64::from(bucket.count) {
            return Err(StoreError::Inconsistent("bucket sum exceeds best * count"));
        }

        let sum = self.sum.checked_add(bucket.sum);
        let count = self.count.checked_add(bucket.count);
        let (Some(sum), Some(count)) = (sum, count) else {
            return Err(StoreError::Inconsistent("bucket totals overflow"));
        };
        self.best = self.best.max(bucket.best);
        self.sum = sum;
        self.count = count;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLedger {
    entries: BTreeMap<u32, ScoreEntry>,
    dirty: bool,
}

#[derive(Serialize, Deserialize)]
struct StoredBucket {
    tick: u32,
    best: u32,
    sum: u64,
    count: u32,
}

#[derive(Deserialize)]
struct StoredRun {
    tick: u32,
    score: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredScores {
    Buckets {
        buckets: Vec<StoredBucket>,
    },
    Runs {
        #[serde(rename = "scrData")]
        runs: Vec<StoredRun>,
    },
}

#[derive(Serialize)]
struct StoredScoresOut<'a> {
    buckets: &'a [StoredBucket],
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one finished run to `tier`
    pub fn record_run(&mut self, tier: u32, score: u32) {
        self.entries.entry(tier).or_default().record(score);
        self.dirty = true;
        debug!(tier, score, "run recorded");
    }

    pub fn best_for(&self, tier: u32) -> u32 {
        self.entries.get(&tier).map_or(0, |e| e.best)
    }

    pub fn average_for(&self, tier: u32) -> u32 {
        self.entries.get(&tier).map_or(0, ScoreEntry::average)
    }

    pub fn runs_for(&self, tier: u32) -> u32 {
        self.entries.get(&tier).map_or(0, |e| e.count)
    }

    pub fn entry(&self, tier: u32) -> Option<&ScoreEntry> {
        self.entries.get(&tier)
    }

    /// Tiers with at least one recorded run, ascending
    pub fn tiers(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Whether there are runs not yet persisted
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn to_blob(&self) -> Result<Vec<u8>, StoreError> {
        let buckets: Vec<StoredBucket> = self
            .entries
            .iter()
            .map(|(&tick, e)| StoredBucket {
                tick,
                best: e.best,
                sum: e.sum,
                count: e.count,
            })
            .collect();
        Ok(serde_json::to_vec(&StoredScoresOut { buckets: &buckets })?)
    }

    pub fn from_blob(blob: &[u8]) -> Result<Self, StoreError> {
        let stored: StoredScores = serde_json::from_slice(blob)?;
        let mut entries: BTreeMap<u32, ScoreEntry> = BTreeMap::new();

        match stored {
            StoredScores::Buckets { buckets } => {
                for b in &buckets {
                    entries.entry(b.tick).or_default().merge(b)?;
                }
            }
            StoredScores::Runs { runs } => {
                for r in runs {
                    entries.entry(r.tick).or_default().record(r.score);
                }
            }
        }

        Ok(Self {
            entries,
            dirty: false,
        })
    }

    /// Load from `store`, falling back to an empty ledger on any failure.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.load(SCORES_KEY) {
            Ok(Some(blob)) => match Self::from_blob(&blob) {
                Ok(ledger) => {
                    info!(tiers = ledger.entries.len(), "score ledger loaded");
                    ledger
                }
                Err(err) => {
                    warn!("score ledger unreadable, starting empty: {err}");
                    Self::new()
                }
            },
            Ok(None) => Self::new(),
            Err(err) => {
                warn!("score store unavailable, starting empty: {err}");
                Self::new()
            }
        }
    }

    /// Write to `store` if anything changed since the last load/persist.
    pub fn persist<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        let blob = self.to_blob()?;
        store.save(SCORES_KEY, &blob)?;
        self.dirty = false;
        debug!(bytes = blob.len(), "score ledger persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_empty_tier_reports_zero() {
        let ledger = ScoreLedger::new();
        assert_eq!(ledger.best_for(10), 0);
        assert_eq!(ledger.average_for(10), 0);
    }

    #[test]
    fn test_best_and_floor_average() {
        let mut ledger = ScoreLedger::new();
        ledger.record_run(10, 3);
        ledger.record_run(10, 4);
        ledger.record_run(12, 9);

        assert_eq!(ledger.best_for(10), 4);
        assert_eq!(ledger.average_for(10), 3); // 7 / 2
        assert_eq!(ledger.best_for(12), 9);
        assert_eq!(ledger.tiers().collect::<Vec<_>>(), vec![10, 12]);
    }

    #[test]
    fn test_persist_only_when_dirty() {
        let mut store = MemoryStore::new();
        let mut ledger = ScoreLedger::new();

        ledger.persist(&mut store).unwrap();
        assert_eq!(store.writes(), 0);

        ledger.record_run(10, 5);
        ledger.persist(&mut store).unwrap();
        ledger.persist(&mut store).unwrap();
        assert_eq!(store.writes(), 1);

        let loaded = ScoreLedger::load(&store);
        assert_eq!(loaded.best_for(10), 5);
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn test_legacy_run_list_is_folded() {
        let blob = br#"{"scrData":[{"tick":10,"score":3},{"tick":10,"score":6},{"tick":5,"score":1}]}"#;
        let ledger = ScoreLedger::from_blob(blob).unwrap();

        assert_eq!(ledger.best_for(10), 6);
        assert_eq!(ledger.average_for(10), 4);
        assert_eq!(ledger.runs_for(5), 1);
    }

    #[test]
    fn test_overflowing_buckets_fall_back_to_empty() {
        // Each bucket is plausible on its own; their totals do not fit.
        let full = r#"{"tick":10,"best":4294967295,"sum":18446744065119617025,"count":4294967295}"#;
        let blob = format!(r#"{{"buckets":[{full},{full}]}}"#);
        assert!(matches!(
            ScoreLedger::from_blob(blob.as_bytes()),
            Err(StoreError::Inconsistent(_))
        ));

        let mut store = MemoryStore::new();
        store.insert(SCORES_KEY, blob);
        let ledger = ScoreLedger::load(&store);
        assert_eq!(ledger.tiers().count(), 0);

        let mut store = MemoryStore::new();
        store.insert(
            SCORES_KEY,
            r#"{"buckets":[
                {"tick":10,"best":1,"sum":18446744073709551615,"count":1},
                {"tick":10,"best":5,"sum":5,"count":1}
            ]}"#,
        );
        assert_eq!(ScoreLedger::load(&store).tiers().count(), 0);
    }

    #[test]
    fn test_bucket_totals_must_fit_best() {
        let sum_too_big = br#"{"buckets":[{"tick":10,"best":1,"sum":5000000000,"count":1}]}"#;
        assert!(matches!(
            ScoreLedger::from_blob(sum_too_big),
            Err(StoreError::Inconsistent(_))
        ));

        let no_runs = br#"{"buckets":[{"tick":10,"best":0,"sum":3,"count":0}]}"#;
        assert!(matches!(
            ScoreLedger::from_blob(no_runs),
            Err(StoreError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_average_never_exceeds_best() {
        let blob = br#"{"buckets":[{"tick":10,"best":4294967295,"sum":8589934590,"count":2}]}"#;
        let ledger = ScoreLedger::from_blob(blob).unwrap();

        assert_eq!(ledger.average_for(10), u32::MAX);
        assert!(ledger.average_for(10) <= ledger.best_for(10));
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store.insert(SCORES_KEY, "{not json");

        let ledger = ScoreLedger::load(&store);
        assert_eq!(ledger.tiers().count(), 0);
    }
}
