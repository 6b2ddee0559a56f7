use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icon;

use crate::app::ScheduleApp;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut ScheduleApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open Plan...", icon::FOLDER_OPEN)).clicked() {
                app.open_file();
                ui.close_menu();
            }
            if ui.button(format!("{}  Import CSV...", icon::FILE_CSV)).clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button(format!("{}  Reload", icon::ARROW_CLOCKWISE)).clicked() {
                app.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Save Plan As...", icon::FLOPPY_DISK)).clicked() {
                app.save_plan_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Export Segments CSV...", icon::EXPORT)).clicked() {
                app.export_segments();
                ui.close_menu();
            }
            if ui.button(format!("{}  Export Engagements CSV...", icon::EXPORT)).clicked() {
                app.export_engagements();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icon::GEAR)).clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui
                .button(format!("{}  Zoom In        Ctrl+Scroll ↑", icon::MAGNIFYING_GLASS_PLUS))
                .clicked()
            {
                app.zoom(1);
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Zoom Out      Ctrl+Scroll ↓", icon::MAGNIFYING_GLASS_MINUS))
                .clicked()
            {
                app.zoom(-1);
                ui.close_menu();
            }
            if ui.button("  Reset Zoom").clicked() {
                app.reset_zoom();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Work Days").small().weak());
            let mut week = app.work_week();
            let saturday = ui.checkbox(&mut week.work_on_saturday, "Work on Saturday");
            let sunday = ui.checkbox(&mut week.work_on_sunday, "Work on Sunday");
            if saturday.changed() || sunday.changed() {
                app.set_work_week(week);
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned plan name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let saved = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.plan.name, saved))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
