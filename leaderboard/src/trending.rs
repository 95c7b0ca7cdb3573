use crate::models::StatSnapshot;
use std::collections::HashMap;

/// Remembers the last view count seen per video to derive per-cycle deltas.
#[derive(Debug, Default)]
pub struct TrendingTracker {
    previous_views: HashMap<String, u64>,
}

impl TrendingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `current - previous` views per id (0 on first sighting) and
    /// records the current counts for the next cycle. An id repeated within
    /// one batch is observed once, using its first snapshot.
    pub fn observe(&mut self, snapshots: &[StatSnapshot]) -> HashMap<String, i64> {
        let mut deltas = HashMap::with_capacity(snapshots.len());

        for snapshot in snapshots {
            if deltas.contains_key(&snapshot.id) {
                continue;
            }
            let current = snapshot.view_count;
            let delta = match self.previous_views.insert(snapshot.id.clone(), current) {
                Some(previous) => current as i64 - previous as i64,
                None => 0,
            };
            deltas.insert(snapshot.id.clone(), delta);
        }

        deltas
    }
}
