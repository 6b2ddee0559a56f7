use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::{compute_layout, LayoutOutcome};
use crate::model::{LayoutConfig, ScheduledTaskSegment, WorkWeek};

/// Memoised layout pass keyed on the segment collection and configuration.
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<u64>,
    outcome: LayoutOutcome,
    recomputations: usize,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome, recomputing only when an input changed.
    pub fn get_or_compute(
        &mut self,
        segments: &[ScheduledTaskSegment],
        config: &LayoutConfig,
        week: WorkWeek,
    ) -> &LayoutOutcome {
        let key = layout_key(segments, config, week);
        if self.key == Some(key) {
            log::debug!("Layout cache hit ({:016x})", key);
        } else {
            log::debug!("Layout cache miss, laying out {} segments", segments.len());
            self.outcome = compute_layout(segments, config, week);
            self.key = Some(key);
            self.recomputations += 1;
        }
        &self.outcome
    }

    /// Drop the cached outcome so the next call recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// How many full layout passes this cache has run.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

fn layout_key(segments: &[ScheduledTaskSegment], config: &LayoutConfig, week: WorkWeek) -> u64 {
    let mut hasher = DefaultHasher::new();
    segments.hash(&mut hasher);
    config.hash(&mut hasher);
    week.hash(&mut hasher);
    hasher.finish()
}
