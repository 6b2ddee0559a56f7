use std::path::Path;

use crate::error::LoadError;
use crate::model::RawSegment;

/// Columns a segment CSV can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    OriginalTaskId,
    ResourceId,
    ResourceName,
    ItemName,
    ItemCategory,
    SegmentHours,
    TotalHours,
    StartDay,
    DurationDays,
    StartHourOffset,
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "id" | "segmentid" | "slotid" => Some(Column::Id),
        "originaltaskid" | "taskid" | "task" => Some(Column::OriginalTaskId),
        "resourceid" | "trainerid" | "resource" | "trainer" => Some(Column::ResourceId),
        "resourcename" | "trainername" | "name" => Some(Column::ResourceName),
        "itemname" | "item" | "machine" | "software" | "line" => Some(Column::ItemName),
        "itemcategory" | "category" | "type" | "kind" => Some(Column::ItemCategory),
        "segmenthours" | "hours" | "slicehours" => Some(Column::SegmentHours),
        "totalhours" | "taskhours" => Some(Column::TotalHours),
        "startday" | "day" | "start" => Some(Column::StartDay),
        "durationdays" | "duration" | "days" => Some(Column::DurationDays),
        "starthouroffset" | "houroffset" | "offset" => Some(Column::StartHourOffset),
        _ => None,
    }
}

fn parse_number(field: &str) -> Option<f32> {
    field.trim().replace(',', ".").parse().ok()
}

fn parse_day(field: &str) -> Option<i32> {
    field.trim().parse().ok()
}

fn text(field: &str) -> Option<String> {
    let field = field.trim();
    (!field.is_empty()).then(|| field.to_string())
}

/// Import segment rows from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly ("Trainer", "Machine", "Start Day", ...). Cells that cannot be
/// parsed are left empty so validation can report them; only rows the CSV
/// reader cannot read at all are skipped.
/// Returns `(segments, skipped_count)` on success.
pub fn import_csv(path: &Path) -> Result<(Vec<RawSegment>, usize), LoadError> {
    let content = std::fs::read_to_string(path)?;
    import_csv_str(&content)
}

pub fn import_csv_str(content: &str) -> Result<(Vec<RawSegment>, usize), LoadError> {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.trim().is_empty() {
        return Err(LoadError::EmptyFile);
    }
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |column: Column| col_map.iter().any(|c| *c == Some(column));
    if !has(Column::ResourceId) || !has(Column::StartDay) || !has(Column::SegmentHours) {
        return Err(LoadError::MissingColumns(
            headers.iter().map(str::to_string).collect(),
        ));
    }

    let mut segments = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut segment = RawSegment::default();
        for (field, column) in record.iter().zip(&col_map) {
            match column {
                Some(Column::Id) => segment.id = text(field),
                Some(Column::OriginalTaskId) => segment.original_task_id = text(field),
                Some(Column::ResourceId) => segment.resource_id = text(field),
                Some(Column::ResourceName) => segment.resource_name = text(field),
                Some(Column::ItemName) => segment.item_name = text(field),
                Some(Column::ItemCategory) => segment.item_category = text(field),
                Some(Column::SegmentHours) => segment.segment_hours = parse_number(field),
                Some(Column::TotalHours) => segment.total_hours = parse_number(field),
                Some(Column::StartDay) => segment.start_day = parse_day(field),
                Some(Column::DurationDays) => segment.duration_days = parse_day(field),
                Some(Column::StartHourOffset) => segment.start_hour_offset = parse_number(field),
                None => {}
            }
        }
        segments.push(segment);
    }

    // Only unreadable rows are an error; a header with no rows is an empty schedule.
    if segments.is_empty() && skipped > 0 {
        return Err(LoadError::NoValidRows(skipped));
    }

    Ok((segments, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicolon_file_with_loose_headers() {
        let csv = "Trainer;Trainer Name;Machine;Category;Start Day;Hour Offset;Hours;Total Hours;Task ID\n\
                   t1;Alice;Lathe;Machine;3;4;4;12;T1\n\
                   t1;Alice;CAD;Software;4;;2,5;;T2\n";
        let (segments, skipped) = import_csv_str(csv).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].resource_id.as_deref(), Some("t1"));
        assert_eq!(segments[0].start_hour_offset, Some(4.0));
        assert_eq!(segments[0].original_task_id.as_deref(), Some("T1"));
        assert_eq!(segments[1].segment_hours, Some(2.5));
        // left for validation to reject
        assert_eq!(segments[1].start_hour_offset, None);
    }

    #[test]
    fn test_comma_delimiter_detected() {
        let csv = "resource_id,start_day,segment_hours,start_hour_offset\nr1,1,8,0\n";
        let (segments, _) = import_csv_str(csv).unwrap();
        assert_eq!(segments[0].start_day, Some(1));
        assert_eq!(segments[0].segment_hours, Some(8.0));
    }

    #[test]
    fn test_missing_required_columns() {
        let err = import_csv_str("name;notes\nAlice;hello\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumns(_)));
    }

    #[test]
    fn test_header_only_is_empty() {
        let (segments, skipped) = import_csv_str("resource;day;hours\n").unwrap();
        assert!(segments.is_empty());
        assert_eq!(skipped, 0);
        assert!(matches!(import_csv_str(""), Err(LoadError::EmptyFile)));
    }
}
