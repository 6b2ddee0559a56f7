//! Resource timeline layout for scheduled training work.
//!
//! The library turns a flat list of already-scheduled task segments into
//! everything a Gantt-style schedule view needs: grouped resource/item rows,
//! pixel geometry for each segment, padded engagement spans per resource and
//! a rest-day table for calendar shading. Every stage in [`layout`] is a pure
//! function of its inputs; loading and saving live in [`io`].

pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod settings;

pub use error::{LoadError, SegmentError};
pub use layout::{compute_layout, LayoutCache, LayoutOutcome, ScheduleLayout, ViewState};
pub use model::{LayoutConfig, RawSegment, ScheduledTaskSegment, WorkWeek};
