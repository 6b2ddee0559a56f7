use pretty_assertions::assert_eq;
use tempfile::tempdir;

use training_gantt::io::{self, csv_export, csv_import};
use training_gantt::layout::{
    compute_layout, prepare_segments, LayoutCache, LayoutOutcome, SegmentSource, ViewState,
};
use training_gantt::model::{LayoutConfig, RawSegment, TrainingPlan, WorkWeek};
use training_gantt::settings::AppSettings;
use training_gantt::LoadError;

fn record(id: &str, resource: &str, item: &str, day: i32, offset: f32, hours: f32) -> RawSegment {
    RawSegment {
        id: Some(id.into()),
        original_task_id: Some(format!("T-{}", item)),
        resource_id: Some(resource.into()),
        resource_name: Some(format!("Trainer {}", resource)),
        item_name: Some(item.into()),
        item_category: Some("Machine".into()),
        segment_hours: Some(hours),
        total_hours: Some(16.0),
        start_day: Some(day),
        duration_days: Some(1),
        start_hour_offset: Some(offset),
    }
}

#[test]
fn test_plan_survives_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spring.plan.json");

    let mut plan = TrainingPlan::new("Spring");
    plan.set_work_week(WorkWeek { work_on_saturday: true, work_on_sunday: false });
    plan.segments = vec![
        record("a", "r1", "Lathe", 3, 0.0, 8.0),
        record("b", "r1", "Lathe", 4, 0.0, 8.0),
    ];

    io::save_plan(&plan, &path).unwrap();
    let loaded = io::load_path(&path).unwrap();

    assert_eq!(loaded.name, "Spring");
    assert_eq!(loaded.work_week(), plan.work_week());
    assert_eq!(loaded.segments, plan.segments);
}

#[test]
fn test_backend_array_with_loose_types_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("export.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 17, "resourceId": "r1", "itemName": "Lathe", "itemCategory": "Machine",
             "segmentHours": "4", "startDay": 2, "startHourOffset": "4"},
            {"id": "18", "resourceId": "r1", "itemName": "CAD", "itemCategory": "Software",
             "segmentHours": 8, "startDay": "3", "startHourOffset": null}
        ]"#,
    )
    .unwrap();

    let plan = io::load_path(&path).unwrap();
    assert_eq!(plan.name, "export");
    assert_eq!(plan.segments.len(), 2);
    assert_eq!(plan.segments[0].id.as_deref(), Some("17"));
    assert_eq!(plan.segments[0].segment_hours, Some(4.0));

    let config = LayoutConfig::default();
    let prepared = prepare_segments(&plan.segments, &config);
    assert_eq!(prepared.segments.len(), 1);
    assert_eq!(prepared.diagnostics.len(), 1);
    assert_eq!(prepared.diagnostics[0].segment_id.as_deref(), Some("18"));
}

#[test]
fn test_empty_json_file_is_a_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "   \n").unwrap();

    assert!(matches!(io::load_path(&path), Err(LoadError::EmptyFile)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = io::load_path(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(LoadError::Io(_))));
}

#[test]
fn test_csv_import_by_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("week12.csv");
    std::fs::write(
        &path,
        "Trainer;Machine;Category;Start Day;Hour Offset;Hours\n\
         t1;Lathe;Machine;1;0;8\n\
         t1;CAD;Software;2;0;4\n",
    )
    .unwrap();

    let plan = io::load_path(&path).unwrap();
    assert_eq!(plan.name, "week12");
    assert_eq!(plan.segments.len(), 2);
    assert_eq!(plan.segments[1].item_category.as_deref(), Some("Software"));
}

#[test]
fn test_header_only_csv_shows_empty_not_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quiet-week.csv");
    std::fs::write(&path, "Trainer;Start Day;Hours;Hour Offset\n").unwrap();

    let plan = io::load_path(&path).unwrap();
    assert!(plan.segments.is_empty());

    let config = LayoutConfig::default();
    let source = SegmentSource::Loaded(prepare_segments(&plan.segments, &config));
    let mut cache = LayoutCache::new();
    assert!(matches!(
        ViewState::resolve(&source, &mut cache, &config, plan.work_week()),
        ViewState::Empty
    ));
}

#[test]
fn test_csv_without_required_columns_is_rejected() {
    let result = csv_import::import_csv_str("Name;Colour\nAlice;red\n");
    assert!(matches!(result, Err(LoadError::MissingColumns(_))));
}

#[test]
fn test_exports_write_one_row_per_bar_and_engagement() {
    let dir = tempdir().unwrap();
    let config = LayoutConfig::default();
    let records = vec![
        record("a", "r1", "Lathe", 3, 0.0, 8.0),
        record("b", "r1", "Mill", 5, 4.0, 4.0),
        record("c", "r2", "Lathe", 10, 0.0, 8.0),
    ];
    let prepared = prepare_segments(&records, &config);
    let LayoutOutcome::Ready(layout) =
        compute_layout(&prepared.segments, &config, WorkWeek::default())
    else {
        panic!("expected a layout");
    };

    let segments_path = dir.path().join("segments.csv");
    assert_eq!(csv_export::export_segments_csv(&layout, &segments_path).unwrap(), 3);
    let written = std::fs::read_to_string(&segments_path).unwrap();
    assert_eq!(written.lines().count(), 4);
    assert!(written.lines().next().unwrap().starts_with("Resource;Item;Category"));

    let engagements_path = dir.path().join("engagements.csv");
    assert_eq!(
        csv_export::export_engagements_csv(&layout, &engagements_path).unwrap(),
        2
    );
    let written = std::fs::read_to_string(&engagements_path).unwrap();
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_settings_roundtrip_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = AppSettings::default();
    settings.work_week.work_on_sunday = true;
    settings.layout.zoom_in();
    settings.last_file = Some(dir.path().join("plan.json"));
    settings.save(&path).unwrap();

    assert_eq!(AppSettings::load(&path), settings);
}

#[test]
fn test_corrupt_settings_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_eq!(AppSettings::load(&path), AppSettings::default());
}
