//! The resource-timeline layout pass.
//!
//! Data flows one way through the stages, once per input change:
//!
//! 1. [`grouping`]: resource → item rows, deduplicated hours, item order
//! 2. [`vertical`]: row offsets and total grid height
//! 3. [`horizontal`]: per-segment pixel span and calendar label
//! 4. [`engagement`]: padded per-resource occupied window
//! 5. [`calendar`]: work/rest classification of every timeline day
//!
//! [`viewport`] keeps the frozen header and label column in step with the
//! scrolled grid and never feeds back into the stages above.

pub mod cache;
pub mod calendar;
pub mod engagement;
pub mod grouping;
pub mod horizontal;
pub mod prepare;
pub mod vertical;
pub mod viewport;

pub use cache::LayoutCache;
pub use calendar::{CalendarShading, DayKind};
pub use engagement::EngagementSpan;
pub use grouping::{ItemGroup, ResourceGroup};
pub use horizontal::TaskRenderInfo;
pub use prepare::{prepare_segments, Diagnostic, PreparedSegments};
pub use vertical::{ResourceRows, RowLayout};
pub use viewport::ScrollSync;

use crate::error::LoadError;
use crate::model::{LayoutConfig, ScheduledTaskSegment, WorkWeek};

/// Everything the renderer needs for one frame of the schedule view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleLayout {
    pub groups: Vec<ResourceGroup>,
    /// Parallel to `groups`.
    pub rows: RowLayout,
    pub tasks: Vec<TaskRenderInfo>,
    pub engagements: Vec<EngagementSpan>,
    pub total_grid_height: f32,
    pub total_timeline_width: f32,
    pub calendar: CalendarShading,
}

impl ScheduleLayout {
    pub fn total_days(&self) -> i32 {
        self.calendar.total_days()
    }

    pub fn engagement(&self, resource_id: &str) -> Option<&EngagementSpan> {
        self.engagements.iter().find(|e| e.resource_id == resource_id)
    }
}

/// Result of one layout pass. Empty input is a result, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LayoutOutcome {
    #[default]
    Empty,
    Ready(ScheduleLayout),
}

/// Run every stage over a validated segment collection.
pub fn compute_layout(
    segments: &[ScheduledTaskSegment],
    config: &LayoutConfig,
    week: WorkWeek,
) -> LayoutOutcome {
    if segments.is_empty() {
        return LayoutOutcome::Empty;
    }
    let config = &config.sanitized();

    let groups = grouping::group_segments(segments);
    let rows = vertical::assign_rows(&groups, config);

    let mut tasks = Vec::with_capacity(segments.len());
    let mut engagements = Vec::with_capacity(groups.len());
    for (group, group_rows) in groups.iter().zip(&rows.resources) {
        for (item, &row_offset) in group.items.iter().zip(&group_rows.item_offsets) {
            tasks.extend(
                item.segments
                    .iter()
                    .map(|segment| horizontal::project_segment(segment, row_offset, config)),
            );
        }
        engagements.extend(engagement::engagement_for(group, group_rows.header_offset));
    }

    let last_day = engagements
        .iter()
        .map(|span| span.padded_end_day)
        .max()
        .unwrap_or(0);
    let total_days = config.horizon_days().max(last_day);

    LayoutOutcome::Ready(ScheduleLayout {
        total_grid_height: rows.total_height,
        total_timeline_width: total_days as f32 * config.day_width,
        calendar: CalendarShading::new(total_days, config.days_per_month, week),
        groups,
        rows,
        tasks,
        engagements,
    })
}

/// Where the segment collection currently stands in the external data layer.
#[derive(Debug)]
pub enum SegmentSource {
    Loading,
    Failed(LoadError),
    Loaded(PreparedSegments),
}

/// The four observably different things the schedule view can show.
#[derive(Debug)]
pub enum ViewState<'a> {
    Loading,
    Error(&'a LoadError),
    Empty,
    Ready(&'a ScheduleLayout),
}

impl<'a> ViewState<'a> {
    pub fn resolve(
        source: &'a SegmentSource,
        cache: &'a mut LayoutCache,
        config: &LayoutConfig,
        week: WorkWeek,
    ) -> Self {
        match source {
            SegmentSource::Loading => ViewState::Loading,
            SegmentSource::Failed(err) => ViewState::Error(err),
            SegmentSource::Loaded(prepared) => {
                match cache.get_or_compute(&prepared.segments, config, week) {
                    LayoutOutcome::Empty => ViewState::Empty,
                    LayoutOutcome::Ready(layout) => ViewState::Ready(layout),
                }
            }
        }
    }
}
