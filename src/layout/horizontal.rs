use crate::model::{LayoutConfig, ScheduledTaskSegment};

/// A segment projected onto the timeline grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRenderInfo {
    pub segment: ScheduledTaskSegment,
    /// Top of the item row the bar sits in.
    pub vertical_offset: f32,
    /// Left edge of the bar, from the start of day 1.
    pub horizontal_offset: f32,
    pub pixel_width: f32,
    /// Display label only; not used for geometry.
    pub month: i32,
    pub day_of_month: i32,
}

/// Pixel span `(left, width)` of a segment on the day/hour timeline.
pub fn segment_span(segment: &ScheduledTaskSegment, config: &LayoutConfig) -> (f32, f32) {
    let base_offset = (segment.start_day.max(1) - 1) as f32 * config.day_width;
    let hour_offset = (segment.start_hour_offset / config.daily_hour_limit) * config.day_width;
    let width = ((segment.segment_hours / config.daily_hour_limit) * config.day_width)
        .max(config.minimum_width);
    (base_offset + hour_offset, width)
}

/// Synthetic `(month, day_of_month)` for a 1-based day index.
pub fn calendar_position(day: i32, days_per_month: i32) -> (i32, i32) {
    let zero_based = day.max(1) - 1;
    (zero_based / days_per_month + 1, zero_based % days_per_month + 1)
}

pub fn project_segment(
    segment: &ScheduledTaskSegment,
    vertical_offset: f32,
    config: &LayoutConfig,
) -> TaskRenderInfo {
    let (horizontal_offset, pixel_width) = segment_span(segment, config);
    let (month, day_of_month) = calendar_position(segment.start_day, config.days_per_month);
    TaskRenderInfo {
        segment: segment.clone(),
        vertical_offset,
        horizontal_offset,
        pixel_width,
        month,
        day_of_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemCategory;

    fn seg(start_day: i32, offset: f32, hours: f32) -> ScheduledTaskSegment {
        ScheduledTaskSegment {
            id: "s".into(),
            original_task_id: None,
            resource_id: "r".into(),
            resource_name: "r".into(),
            item_name: "Lathe".into(),
            item_category: ItemCategory::Machine,
            segment_hours: hours,
            total_hours: hours,
            start_day,
            duration_days: 1,
            start_hour_offset: offset,
        }
    }

    #[test]
    fn test_half_day_offset_and_width() {
        let config = LayoutConfig {
            day_width: 30.0,
            daily_hour_limit: 8.0,
            ..Default::default()
        };
        let (x, w) = segment_span(&seg(1, 4.0, 4.0), &config);
        assert_eq!(x, 15.0);
        assert_eq!(w, 15.0);
    }

    #[test]
    fn test_later_day_and_minimum_width() {
        let config = LayoutConfig::default();
        let (x, w) = segment_span(&seg(3, 0.0, 0.01), &config);
        assert_eq!(x, 60.0);
        assert_eq!(w, config.minimum_width);
    }

    #[test]
    fn test_day_zero_clamped_to_first_column() {
        let (x, _) = segment_span(&seg(0, 2.0, 1.0), &LayoutConfig::default());
        assert_eq!(x, 7.5);
    }

    #[test]
    fn test_calendar_position() {
        assert_eq!(calendar_position(1, 30), (1, 1));
        assert_eq!(calendar_position(30, 30), (1, 30));
        assert_eq!(calendar_position(31, 30), (2, 1));
        assert_eq!(calendar_position(360, 30), (12, 30));
    }

    #[test]
    fn test_project_segment_carries_row_offset() {
        let info = project_segment(&seg(31, 0.0, 8.0), 64.0, &LayoutConfig::default());
        assert_eq!(info.vertical_offset, 64.0);
        assert_eq!(info.horizontal_offset, 900.0);
        assert_eq!(info.pixel_width, 30.0);
        assert_eq!((info.month, info.day_of_month), (2, 1));
    }
}
