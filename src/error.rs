use thiserror::Error;

/// Why a raw segment record could not be turned into a [`ScheduledTaskSegment`].
///
/// [`ScheduledTaskSegment`]: crate::model::ScheduledTaskSegment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value {value} for `{field}`")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("start hour offset {offset} is outside 0..{limit}")]
    HourOffsetOutOfRange { offset: f32, limit: f32 },
}

/// Failure while reading or writing schedule data on disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required columns. Found headers: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("file is empty or has no data rows")]
    EmptyFile,

    #[error("no readable rows found ({0} rows skipped)")]
    NoValidRows(usize),
}
