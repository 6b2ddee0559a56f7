pub mod plan;
pub mod segment;
pub mod timeline;

pub use plan::TrainingPlan;
pub use segment::{
    ItemCategory, RawSegment, ScheduledTaskSegment, MAX_DURATION_DAYS, MAX_START_DAY, UNKNOWN_ITEM,
};
pub use timeline::{LayoutConfig, WorkWeek};
