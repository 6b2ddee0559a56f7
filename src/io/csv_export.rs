use std::path::Path;

use crate::error::LoadError;
use crate::layout::ScheduleLayout;

/// Export every rendered segment to a semicolon-delimited CSV file.
///
/// Columns: Resource ; Item ; Category ; Start Day ; Month ; Day ;
/// Hour Offset ; Hours ; X ; Width.
/// Returns the number of segments written.
pub fn export_segments_csv(layout: &ScheduleLayout, path: &Path) -> Result<usize, LoadError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)?;

    wtr.write_record([
        "Resource",
        "Item",
        "Category",
        "Start Day",
        "Month",
        "Day",
        "Hour Offset",
        "Hours",
        "X",
        "Width",
    ])?;

    for task in &layout.tasks {
        let segment = &task.segment;
        wtr.write_record([
            segment.resource_name.clone(),
            segment.item_name.clone(),
            segment.item_category.label().to_string(),
            segment.start_day.to_string(),
            task.month.to_string(),
            task.day_of_month.to_string(),
            segment.start_hour_offset.to_string(),
            segment.segment_hours.to_string(),
            format!("{:.1}", task.horizontal_offset),
            format!("{:.1}", task.pixel_width),
        ])?;
    }

    wtr.flush()?;
    Ok(layout.tasks.len())
}

/// Export one row per resource engagement (travel days included).
pub fn export_engagements_csv(layout: &ScheduleLayout, path: &Path) -> Result<usize, LoadError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)?;

    wtr.write_record([
        "Resource",
        "First Day",
        "Last Day",
        "Span Days",
        "Hours",
    ])?;

    for span in &layout.engagements {
        let hours = layout
            .groups
            .iter()
            .find(|g| g.resource_id == span.resource_id)
            .map(|g| g.total_hours())
            .unwrap_or(0.0);
        wtr.write_record([
            span.resource_name.clone(),
            span.padded_start_day.to_string(),
            span.padded_end_day.to_string(),
            span.total_span_days.to_string(),
            hours.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(layout.engagements.len())
}
