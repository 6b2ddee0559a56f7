use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SegmentError;

/// Item name used when a record does not say what is being trained on.
pub const UNKNOWN_ITEM: &str = "Unknown";

/// Latest start day a record may name. Anything later is treated as corrupt
/// rather than laid out as a multi-year timeline.
pub const MAX_START_DAY: i32 = 3660;

/// Longest calendar span a single slice may cover.
pub const MAX_DURATION_DAYS: i32 = 366;

/// What kind of line item a segment trains on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Machine,
    Software,
    Unknown,
}

impl ItemCategory {
    /// Parse a backend category label. Anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "machine" | "machines" | "hardware" => ItemCategory::Machine,
            "software" => ItemCategory::Software,
            _ => ItemCategory::Unknown,
        }
    }

    /// Ordering rank inside a resource: machines (and unknowns) before software.
    pub fn sort_rank(self) -> u8 {
        match self {
            ItemCategory::Machine | ItemCategory::Unknown => 0,
            ItemCategory::Software => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Machine => "Machine",
            ItemCategory::Software => "Software",
            ItemCategory::Unknown => "Unknown",
        }
    }
}

/// A segment record exactly as it arrives from the backend: every field may be
/// absent, numbers may be encoded as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSegment {
    #[serde(with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        alias = "original_task_id",
        with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_task_id: Option<String>,
    #[serde(alias = "resource_id", with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(alias = "resource_name", with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(alias = "item_name", with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(alias = "item_category", with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub item_category: Option<String>,
    #[serde(alias = "segment_hours", with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub segment_hours: Option<f32>,
    #[serde(alias = "total_hours", with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f32>,
    #[serde(alias = "start_day", with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub start_day: Option<i32>,
    #[serde(alias = "duration_days", with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i32>,
    #[serde(
        alias = "start_hour_offset",
        with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_hour_offset: Option<f32>,
}

/// A validated, already-scheduled slice of a training task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTaskSegment {
    pub id: String,
    /// Logical task this slice belongs to. A task split across days shares it.
    pub original_task_id: Option<String>,
    pub resource_id: String,
    pub resource_name: String,
    pub item_name: String,
    pub item_category: ItemCategory,
    /// Hours consumed by this slice alone.
    pub segment_hours: f32,
    /// Hours of the whole logical task.
    pub total_hours: f32,
    /// 1-based day on the planning calendar.
    pub start_day: i32,
    pub duration_days: i32,
    /// Hours already used on `start_day` before this slice begins.
    pub start_hour_offset: f32,
}

impl ScheduledTaskSegment {
    /// Validate a raw record against the daily hour limit it was scheduled with.
    pub fn from_raw(raw: &RawSegment, daily_hour_limit: f32) -> Result<Self, SegmentError> {
        let resource_id = raw
            .resource_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(SegmentError::MissingField("resourceId"))?;
        let start_day = raw.start_day.ok_or(SegmentError::MissingField("startDay"))?;
        if !(1..=MAX_START_DAY).contains(&start_day) {
            return Err(SegmentError::InvalidValue {
                field: "startDay",
                value: start_day as f32,
            });
        }
        let duration_days = raw.duration_days.unwrap_or(1).max(1);
        if duration_days > MAX_DURATION_DAYS {
            return Err(SegmentError::InvalidValue {
                field: "durationDays",
                value: duration_days as f32,
            });
        }
        let start_hour_offset = raw
            .start_hour_offset
            .ok_or(SegmentError::MissingField("startHourOffset"))?;
        let segment_hours = raw
            .segment_hours
            .ok_or(SegmentError::MissingField("segmentHours"))?;

        if !segment_hours.is_finite() || segment_hours <= 0.0 {
            return Err(SegmentError::InvalidValue {
                field: "segmentHours",
                value: segment_hours,
            });
        }
        if !start_hour_offset.is_finite()
            || start_hour_offset < 0.0
            || start_hour_offset >= daily_hour_limit
        {
            return Err(SegmentError::HourOffsetOutOfRange {
                offset: start_hour_offset,
                limit: daily_hour_limit,
            });
        }

        let total_hours = raw
            .total_hours
            .filter(|h| h.is_finite())
            .unwrap_or(segment_hours)
            .max(segment_hours);

        Ok(Self {
            id: raw
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            original_task_id: raw.original_task_id.clone(),
            resource_name: raw
                .resource_name
                .clone()
                .unwrap_or_else(|| resource_id.clone()),
            resource_id,
            item_name: raw
                .item_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ITEM.to_string()),
            item_category: raw
                .item_category
                .as_deref()
                .map(ItemCategory::from_label)
                .unwrap_or(ItemCategory::Unknown),
            segment_hours,
            total_hours,
            start_day,
            duration_days,
            start_hour_offset,
        })
    }

    /// Key identifying the logical task, falling back to the segment itself.
    pub fn task_key(&self) -> &str {
        self.original_task_id.as_deref().unwrap_or(&self.id)
    }

    /// Last calendar day this slice occupies.
    pub fn end_day(&self) -> i32 {
        self.start_day
            .saturating_add(self.duration_days.max(1))
            .saturating_sub(1)
    }
}

// Floats are hashed by bit pattern so identical inputs give identical keys.
impl Hash for ScheduledTaskSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.original_task_id.hash(state);
        self.resource_id.hash(state);
        self.resource_name.hash(state);
        self.item_name.hash(state);
        self.item_category.hash(state);
        self.segment_hours.to_bits().hash(state);
        self.total_hours.to_bits().hash(state);
        self.start_day.hash(state);
        self.duration_days.hash(state);
        self.start_hour_offset.to_bits().hash(state);
    }
}

/// Serde helpers for backend fields that may be numbers, strings or null.
mod lenient {
    pub mod text {
        use serde::{Deserialize, Deserializer, Serializer};
        use serde_json::Value;

        pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(s) => serializer.serialize_str(s),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Option::<Value>::deserialize(deserializer)?;
            Ok(match value {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
        }
    }

    pub mod number {
        use serde::{Deserialize, Deserializer, Serializer};
        use serde_json::Value;

        pub fn serialize<S>(value: &Option<f32>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => serializer.serialize_f32(*v),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Option::<Value>::deserialize(deserializer)?;
            Ok(match value {
                Some(Value::Number(n)) => n.as_f64().map(|v| v as f32),
                Some(Value::String(s)) => s.trim().parse::<f32>().ok(),
                _ => None,
            })
        }
    }

    pub mod integer {
        use serde::{Deserialize, Deserializer, Serializer};
        use serde_json::Value;

        pub fn serialize<S>(value: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => serializer.serialize_i32(*v),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Option::<Value>::deserialize(deserializer)?;
            let parsed = match value {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            // Fractional days are not a valid day index.
            Ok(parsed
                .filter(|v| v.fract() == 0.0 && v.abs() <= i32::MAX as f64)
                .map(|v| v as i32))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawSegment {
        RawSegment {
            id: Some("s1".into()),
            original_task_id: Some("t1".into()),
            resource_id: Some("r1".into()),
            resource_name: Some("Alice".into()),
            item_name: Some("Lathe".into()),
            item_category: Some("machine".into()),
            segment_hours: Some(4.0),
            total_hours: Some(12.0),
            start_day: Some(3),
            duration_days: Some(1),
            start_hour_offset: Some(2.0),
        }
    }

    #[test]
    fn test_valid_record_converts() {
        let seg = ScheduledTaskSegment::from_raw(&raw(), 8.0).unwrap();
        assert_eq!(seg.resource_id, "r1");
        assert_eq!(seg.item_category, ItemCategory::Machine);
        assert_eq!(seg.task_key(), "t1");
        assert_eq!(seg.end_day(), 3);
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        let mut r = raw();
        r.start_hour_offset = None;
        assert_eq!(
            ScheduledTaskSegment::from_raw(&r, 8.0),
            Err(SegmentError::MissingField("startHourOffset"))
        );

        let mut r = raw();
        r.resource_id = Some("   ".into());
        assert_eq!(
            ScheduledTaskSegment::from_raw(&r, 8.0),
            Err(SegmentError::MissingField("resourceId"))
        );
    }

    #[test]
    fn test_non_positive_hours_rejected() {
        let mut r = raw();
        r.segment_hours = Some(0.0);
        assert!(matches!(
            ScheduledTaskSegment::from_raw(&r, 8.0),
            Err(SegmentError::InvalidValue { field: "segmentHours", .. })
        ));
    }

    #[test]
    fn test_offset_at_limit_rejected() {
        let mut r = raw();
        r.start_hour_offset = Some(8.0);
        assert!(matches!(
            ScheduledTaskSegment::from_raw(&r, 8.0),
            Err(SegmentError::HourOffsetOutOfRange { .. })
        ));
    }

    #[test]
    fn test_start_day_before_day_one_rejected() {
        for day in [0, -5] {
            let mut r = raw();
            r.start_day = Some(day);
            assert_eq!(
                ScheduledTaskSegment::from_raw(&r, 8.0),
                Err(SegmentError::InvalidValue {
                    field: "startDay",
                    value: day as f32,
                })
            );
        }
    }

    #[test]
    fn test_far_future_days_rejected() {
        let mut r = raw();
        r.start_day = Some(i32::MAX);
        assert!(matches!(
            ScheduledTaskSegment::from_raw(&r, 8.0),
            Err(SegmentError::InvalidValue { field: "startDay", .. })
        ));

        let mut r = raw();
        r.start_day = Some(MAX_START_DAY);
        r.duration_days = Some(i32::MAX);
        assert!(matches!(
            ScheduledTaskSegment::from_raw(&r, 8.0),
            Err(SegmentError::InvalidValue { field: "durationDays", .. })
        ));

        let mut r = raw();
        r.start_day = Some(MAX_START_DAY);
        r.duration_days = Some(MAX_DURATION_DAYS);
        let seg = ScheduledTaskSegment::from_raw(&r, 8.0).unwrap();
        assert_eq!(seg.end_day(), MAX_START_DAY + MAX_DURATION_DAYS - 1);
    }

    #[test]
    fn test_end_day_saturates() {
        let mut seg = ScheduledTaskSegment::from_raw(&raw(), 8.0).unwrap();
        seg.start_day = i32::MAX;
        seg.duration_days = i32::MAX;
        assert_eq!(seg.end_day(), i32::MAX - 1);
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let r = RawSegment {
            resource_id: Some("r9".into()),
            start_day: Some(1),
            start_hour_offset: Some(0.0),
            segment_hours: Some(3.0),
            total_hours: Some(1.0),
            duration_days: Some(0),
            ..Default::default()
        };
        let seg = ScheduledTaskSegment::from_raw(&r, 8.0).unwrap();
        assert!(!seg.id.is_empty());
        assert_eq!(seg.resource_name, "r9");
        assert_eq!(seg.item_name, UNKNOWN_ITEM);
        assert_eq!(seg.item_category, ItemCategory::Unknown);
        assert_eq!(seg.total_hours, 3.0);
        assert_eq!(seg.duration_days, 1);
        assert_eq!(seg.task_key(), seg.id);
    }

    #[test]
    fn test_lenient_backend_json() {
        let json = r#"{
            "id": 17,
            "resourceId": "42",
            "resource_name": "Bob",
            "itemName": "CAD",
            "itemCategory": "Software",
            "segmentHours": "2.5",
            "startDay": "4",
            "startHourOffset": null,
            "durationDays": 2
        }"#;
        let r: RawSegment = serde_json::from_str(json).unwrap();
        assert_eq!(r.id.as_deref(), Some("17"));
        assert_eq!(r.resource_name.as_deref(), Some("Bob"));
        assert_eq!(r.segment_hours, Some(2.5));
        assert_eq!(r.start_day, Some(4));
        assert_eq!(r.start_hour_offset, None);
        assert_eq!(r.total_hours, None);
    }

    #[test]
    fn test_fractional_day_is_not_a_day() {
        let r: RawSegment = serde_json::from_str(r#"{"startDay": 2.5}"#).unwrap();
        assert_eq!(r.start_day, None);
    }
}
