use crate::error::SegmentError;
use crate::model::{LayoutConfig, RawSegment, ScheduledTaskSegment};

/// A record that was dropped at the boundary, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Position of the record in the input collection.
    pub index: usize,
    pub segment_id: Option<String>,
    pub error: SegmentError,
}

/// Result of validating a batch of raw records.
#[derive(Debug, Clone, Default)]
pub struct PreparedSegments {
    pub segments: Vec<ScheduledTaskSegment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert raw backend records into strict segments, skipping (and logging)
/// anything that cannot be laid out. Input order is preserved.
pub fn prepare_segments(raw: &[RawSegment], config: &LayoutConfig) -> PreparedSegments {
    let mut prepared = PreparedSegments::default();
    let daily_hour_limit = config.sanitized().daily_hour_limit;

    for (index, record) in raw.iter().enumerate() {
        match ScheduledTaskSegment::from_raw(record, daily_hour_limit) {
            Ok(segment) => prepared.segments.push(segment),
            Err(error) => {
                log::warn!(
                    "Skipping segment #{} ({}): {}",
                    index,
                    record.id.as_deref().unwrap_or("no id"),
                    error
                );
                prepared.diagnostics.push(Diagnostic {
                    index,
                    segment_id: record.id.clone(),
                    error,
                });
            }
        }
    }

    prepared
}
