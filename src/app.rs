use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use training_gantt::error::LoadError;
use training_gantt::io;
use training_gantt::layout::{
    prepare_segments, LayoutCache, LayoutOutcome, ScheduleLayout, ScrollSync, SegmentSource,
    ViewState,
};
use training_gantt::model::{LayoutConfig, RawSegment, TrainingPlan, WorkWeek};
use training_gantt::settings::AppSettings;

use crate::ui;
use crate::ui::resource_panel::ResourcePanelAction;

/// A file load running on a worker thread.
struct PendingLoad {
    path: PathBuf,
    rx: Receiver<Result<TrainingPlan, LoadError>>,
}

/// Main application state.
pub struct ScheduleApp {
    pub plan: TrainingPlan,
    pub file_path: Option<PathBuf>,
    pub source: SegmentSource,
    pub cache: LayoutCache,
    pub settings: AppSettings,
    settings_path: PathBuf,

    // View state owned by the presentation layer
    pub scroll: ScrollSync,
    pub scroll_request: Option<f32>,
    pub selected_resource: Option<String>,
    pub show_about: bool,

    // Status message
    pub status_message: String,

    pending_load: Option<PendingLoad>,
}

impl ScheduleApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = AppSettings::default_path();
        let settings = AppSettings::load(&settings_path);
        let last_file = settings.last_file.clone();

        let mut app = Self {
            plan: TrainingPlan::default(),
            file_path: None,
            source: SegmentSource::Loading,
            cache: LayoutCache::new(),
            settings,
            settings_path,
            scroll: ScrollSync::default(),
            scroll_request: None,
            selected_resource: None,
            show_about: false,
            status_message: "Ready".to_string(),
            pending_load: None,
        };

        match last_file.filter(|p| p.exists()) {
            Some(path) => app.start_load(path),
            None => {
                let plan = Self::sample_plan(app.settings.work_week);
                app.apply_plan(plan, None);
                app.status_message = "Showing sample plan".to_string();
            }
        }
        app
    }

    /// Generate a sample plan for demonstration.
    fn sample_plan(week: WorkWeek) -> TrainingPlan {
        let mut plan = TrainingPlan::new("Sample Plan");
        plan.set_work_week(week);

        let row = |id: &str,
                   task: &str,
                   trainer: (&str, &str),
                   item: (&str, &str),
                   day: i32,
                   offset: f32,
                   hours: f32,
                   total: f32| RawSegment {
            id: Some(id.to_string()),
            original_task_id: Some(task.to_string()),
            resource_id: Some(trainer.0.to_string()),
            resource_name: Some(trainer.1.to_string()),
            item_name: Some(item.0.to_string()),
            item_category: Some(item.1.to_string()),
            segment_hours: Some(hours),
            total_hours: Some(total),
            start_day: Some(day),
            duration_days: Some(1),
            start_hour_offset: Some(offset),
        };

        let anna = ("T-01", "Anna Berg");
        let jonas = ("T-02", "Jonas Holm");
        plan.segments = vec![
            // 12h lathe course split over two days
            row("S-1", "Q1-LATHE", anna, ("Lathe", "Machine"), 3, 0.0, 8.0, 12.0),
            row("S-2", "Q1-LATHE", anna, ("Lathe", "Machine"), 4, 0.0, 4.0, 12.0),
            row("S-3", "Q1-CAD", anna, ("CAD", "Software"), 4, 4.0, 4.0, 4.0),
            row("S-4", "Q1-DRILL", anna, ("Drill", "Machine"), 10, 0.0, 6.0, 6.0),
            row("S-5", "Q2-MILL", jonas, ("Mill", "Machine"), 15, 2.0, 6.0, 14.0),
            row("S-6", "Q2-MILL", jonas, ("Mill", "Machine"), 16, 0.0, 8.0, 14.0),
            row("S-7", "Q2-CAM", jonas, ("CAM Suite", "Software"), 17, 0.0, 3.0, 3.0),
            row("S-8", "Q2-PRESS", jonas, ("Press Brake", "Unknown"), 17, 3.0, 5.0, 5.0),
            // No hour offset: dropped at validation and counted in the status bar
            RawSegment {
                id: Some("S-9".to_string()),
                resource_id: Some(jonas.0.to_string()),
                item_name: Some("Laser".to_string()),
                start_day: Some(20),
                segment_hours: Some(4.0),
                ..Default::default()
            },
        ];
        plan
    }

    pub fn work_week(&self) -> WorkWeek {
        self.plan.work_week()
    }

    /// Current layout, if the data is loaded and non-empty.
    fn current_layout(&mut self) -> Option<&ScheduleLayout> {
        let week = self.plan.work_week();
        match &self.source {
            SegmentSource::Loaded(prepared) => {
                match self.cache.get_or_compute(&prepared.segments, &self.settings.layout, week) {
                    LayoutOutcome::Ready(layout) => Some(layout),
                    LayoutOutcome::Empty => None,
                }
            }
            _ => None,
        }
    }

    // --- Loading ---

    /// Read a plan file on a worker thread; the view shows Loading meanwhile.
    pub fn start_load(&mut self, path: PathBuf) {
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();
        std::thread::spawn(move || {
            let _ = tx.send(io::load_path(&worker_path));
        });
        self.source = SegmentSource::Loading;
        self.selected_resource = None;
        self.status_message = format!("Loading {}...", path.display());
        self.pending_load = Some(PendingLoad { path, rx });
    }

    fn poll_load(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending_load else {
            return;
        };
        match pending.rx.try_recv() {
            Ok(Ok(plan)) => {
                let path = pending.path.clone();
                self.pending_load = None;
                self.apply_plan(plan, Some(path));
            }
            Ok(Err(err)) => {
                log::error!("Failed to load {:?}: {}", pending.path, err);
                self.status_message = format!("Error loading: {}", err);
                self.source = SegmentSource::Failed(err);
                self.pending_load = None;
            }
            Err(TryRecvError::Empty) => ctx.request_repaint(),
            Err(TryRecvError::Disconnected) => {
                self.status_message = "Loader stopped unexpectedly".to_string();
                self.source = SegmentSource::Failed(loader_stopped());
                self.pending_load = None;
            }
        }
    }

    /// Validate the plan's records and make it the displayed plan.
    fn apply_plan(&mut self, plan: TrainingPlan, path: Option<PathBuf>) {
        let prepared = prepare_segments(&plan.segments, &self.settings.layout);
        let dropped = prepared.diagnostics.len();
        self.status_message = if dropped > 0 {
            format!(
                "Loaded {} segments ({} invalid records skipped)",
                prepared.segments.len(),
                dropped
            )
        } else {
            format!("Loaded {} segments", prepared.segments.len())
        };

        self.plan = plan;
        self.source = SegmentSource::Loaded(prepared);
        self.cache.invalidate();
        self.selected_resource = None;
        if path.is_some() {
            self.settings.last_file = path.clone();
            self.persist_settings();
        }
        self.file_path = path;
    }

    // --- File operations ---

    pub fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Training Plan", &["plan.json", "json"])
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    pub fn import_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    pub fn reload(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.start_load(path),
            None => self.status_message = "Nothing to reload, plan was never saved".to_string(),
        }
    }

    pub fn save_plan_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Training Plan", &["plan.json", "json"])
            .set_file_name(format!("{}.plan.json", self.plan.name))
            .save_file()
        {
            self.plan.touch();
            match io::save_plan(&self.plan, &path) {
                Ok(()) => {
                    self.status_message = "Plan saved".to_string();
                    self.settings.last_file = Some(path.clone());
                    self.file_path = Some(path);
                    self.persist_settings();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn export_segments(&mut self) {
        self.export_with("segments", io::csv_export::export_segments_csv);
    }

    pub fn export_engagements(&mut self) {
        self.export_with("engagements", io::csv_export::export_engagements_csv);
    }

    fn export_with(
        &mut self,
        what: &str,
        export: fn(&ScheduleLayout, &Path) -> Result<usize, LoadError>,
    ) {
        let default_name = format!("{}-{}.csv", self.plan.name, what);
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        let message = match self.current_layout() {
            None => format!("Nothing to export, no {} laid out", what),
            Some(layout) => match export(layout, &path) {
                Ok(count) => format!("Exported {} {} to CSV", count, what),
                Err(e) => format!("CSV export failed: {}", e),
            },
        };
        self.status_message = message;
    }

    pub fn open_settings_folder(&mut self) {
        if let Some(dir) = self.settings_path.parent() {
            let _ = std::fs::create_dir_all(dir);
            if let Err(e) = open::that(dir) {
                self.status_message = format!("Could not open settings folder: {}", e);
            }
        }
    }

    // --- View operations ---

    pub fn set_work_week(&mut self, week: WorkWeek) {
        self.plan.set_work_week(week);
        self.plan.touch();
        self.settings.work_week = week;
        self.persist_settings();
        self.status_message = "Work days updated".to_string();
    }

    pub fn zoom(&mut self, steps: i32) {
        if steps > 0 {
            self.settings.layout.zoom_in();
        } else if steps < 0 {
            self.settings.layout.zoom_out();
        }
    }

    pub fn reset_zoom(&mut self) {
        self.settings.layout.day_width = LayoutConfig::default().day_width;
    }

    /// Select a resource and scroll its rows into view.
    fn select_resource(&mut self, resource_id: String) {
        let offset = self.current_layout().and_then(|layout| {
            layout
                .groups
                .iter()
                .position(|g| g.resource_id == resource_id)
                .and_then(|i| layout.rows.resources.get(i))
                .map(|rows| rows.header_offset)
        });
        self.scroll_request = offset;
        self.selected_resource = Some(resource_id);
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::warn!("Could not save settings to {:?}: {}", self.settings_path, e);
        }
    }

    fn counts(&self) -> (usize, usize) {
        match &self.source {
            SegmentSource::Loaded(prepared) => (prepared.segments.len(), prepared.diagnostics.len()),
            _ => (0, 0),
        }
    }
}

fn loader_stopped() -> LoadError {
    LoadError::Io(std::io::Error::other("loader thread stopped"))
}

impl eframe::App for ScheduleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        self.poll_load(ctx);

        let should_open = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::O));
        if should_open {
            self.open_file();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        let (segments, dropped) = self.counts();
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS_BAR)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let default_width = LayoutConfig::default().day_width;
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.settings.layout.day_width / default_width * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        if dropped > 0 {
                            ui.label(
                                egui::RichText::new(format!("Skipped: {}", dropped))
                                    .size(10.5)
                                    .color(ui::theme::TEXT_ERROR),
                            );
                            ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        }
                        ui.label(
                            egui::RichText::new(format!("Segments: {}", segments))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let week = self.plan.work_week();
        let config = self.settings.layout;
        let view = ViewState::resolve(&self.source, &mut self.cache, &config, week);
        let selected = self.selected_resource.clone();

        // Left panel: resource summary
        let mut panel_action = ResourcePanelAction::None;
        egui::SidePanel::left("resource_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(180.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                panel_action = ui::resource_panel::show_resource_panel(&view, selected.as_deref(), ui);
            });

        // Central panel: schedule chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let scroll = &mut self.scroll;
        let scroll_request = &mut self.scroll_request;
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::schedule_chart::show_schedule_chart(
                    &view,
                    &config,
                    scroll,
                    scroll_request,
                    selected.as_deref(),
                    ui,
                )
            })
            .inner;

        if let ResourcePanelAction::Select(id) = panel_action {
            self.select_resource(id);
        }
        if let Some(id) = interaction.selected_resource {
            self.selected_resource = Some(id);
        } else if interaction.clear_selection {
            self.selected_resource = None;
        }
        if interaction.zoom_steps != 0 {
            self.zoom(interaction.zoom_steps);
        }

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_loader_reports_io_error() {
        let err = loader_stopped();
        assert!(matches!(&err, LoadError::Io(e) if e.kind() == std::io::ErrorKind::Other));
        assert_eq!(err.to_string(), "file error: loader thread stopped");
    }
}
