use super::grouping::ResourceGroup;

/// A resource's occupied window, padded with one travel day on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementSpan {
    pub resource_id: String,
    pub resource_name: String,
    pub padded_start_day: i32,
    pub padded_end_day: i32,
    pub total_span_days: i32,
    /// Top of the resource header row.
    pub vertical_offset: f32,
}

/// Earliest start and latest end over the group's segments, or `None` when
/// the group has no segments at all.
pub fn engagement_for(group: &ResourceGroup, vertical_offset: f32) -> Option<EngagementSpan> {
    let (first, last) = group.segments().fold(None, |acc: Option<(i32, i32)>, segment| {
        let (start, end) = (segment.start_day.max(1), segment.end_day().max(1));
        Some(match acc {
            Some((lo, hi)) => (lo.min(start), hi.max(end)),
            None => (start, end),
        })
    })?;

    let padded_start_day = (first - 1).max(1);
    let padded_end_day = last.saturating_add(1);
    Some(EngagementSpan {
        resource_id: group.resource_id.clone(),
        resource_name: group.resource_name.clone(),
        padded_start_day,
        padded_end_day,
        total_span_days: padded_end_day
            .saturating_sub(padded_start_day)
            .saturating_add(1)
            .max(1),
        vertical_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grouping::ItemGroup;
    use crate::model::{ItemCategory, ScheduledTaskSegment};

    fn seg(start_day: i32, duration_days: i32) -> ScheduledTaskSegment {
        ScheduledTaskSegment {
            id: format!("d{}", start_day),
            original_task_id: None,
            resource_id: "r1".into(),
            resource_name: "Alice".into(),
            item_name: "Lathe".into(),
            item_category: ItemCategory::Machine,
            segment_hours: 8.0,
            total_hours: 8.0,
            start_day,
            duration_days,
            start_hour_offset: 0.0,
        }
    }

    fn group(segments: Vec<ScheduledTaskSegment>) -> ResourceGroup {
        ResourceGroup {
            resource_id: "r1".into(),
            resource_name: "Alice".into(),
            items: vec![ItemGroup {
                name: "Lathe".into(),
                category: ItemCategory::Machine,
                total_hours: 0.0,
                segments,
            }],
        }
    }

    #[test]
    fn test_travel_day_padding() {
        let span = engagement_for(&group(vec![seg(3, 2), seg(10, 1)]), 12.0).unwrap();
        assert_eq!(span.padded_start_day, 2);
        assert_eq!(span.padded_end_day, 11);
        assert_eq!(span.total_span_days, 10);
        assert_eq!(span.vertical_offset, 12.0);
    }

    #[test]
    fn test_start_clamped_to_day_one() {
        let span = engagement_for(&group(vec![seg(1, 1)]), 0.0).unwrap();
        assert_eq!(span.padded_start_day, 1);
        assert_eq!(span.padded_end_day, 2);
        assert_eq!(span.total_span_days, 2);
    }

    #[test]
    fn test_multi_day_slice_extends_end() {
        let span = engagement_for(&group(vec![seg(5, 4)]), 0.0).unwrap();
        assert_eq!((span.padded_start_day, span.padded_end_day), (4, 9));
    }

    #[test]
    fn test_days_before_one_are_clamped_on_both_ends() {
        for day in [0, -5] {
            let span = engagement_for(&group(vec![seg(day, 1)]), 0.0).unwrap();
            assert_eq!(span.padded_start_day, 1);
            assert_eq!(span.padded_end_day, 2);
            assert_eq!(span.total_span_days, 2);
        }
    }

    #[test]
    fn test_extreme_end_day_does_not_overflow() {
        let span = engagement_for(&group(vec![seg(i32::MAX, i32::MAX)]), 0.0).unwrap();
        assert!(span.padded_end_day >= span.padded_start_day);
        assert_eq!(span.padded_end_day, i32::MAX);
    }

    #[test]
    fn test_no_segments_no_span() {
        assert!(engagement_for(&group(Vec::new()), 0.0).is_none());
    }
}
