use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment::RawSegment;
use super::timeline::WorkWeek;

/// A saved training plan: the segment records plus the weekend flags they
/// were scheduled under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub name: String,
    #[serde(default)]
    pub work_on_saturday: bool,
    #[serde(default)]
    pub work_on_sunday: bool,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for TrainingPlan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            work_on_saturday: false,
            work_on_sunday: false,
            segments: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl TrainingPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn work_week(&self) -> WorkWeek {
        WorkWeek {
            work_on_saturday: self.work_on_saturday,
            work_on_sunday: self.work_on_sunday,
        }
    }

    pub fn set_work_week(&mut self, week: WorkWeek) {
        self.work_on_saturday = week.work_on_saturday;
        self.work_on_sunday = week.work_on_sunday;
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
