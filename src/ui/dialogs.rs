use egui::{Color32, Context, RichText, Window};

use crate::app::ScheduleApp;
use crate::ui::theme;

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut ScheduleApp, ctx: &Context) {
    let mut open = true;
    Window::new(RichText::new("About").strong().size(14.0))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([340.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(
                RichText::new("Training Gantt")
                    .strong()
                    .size(16.0)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(
                RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new(
                    "Trainer timeline for scheduled training quotes. Bars show \
                     machine and software sessions; the band on each trainer row \
                     is the full engagement including one travel day either side.",
                )
                .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new("Days use a planning calendar of 30-day months, not real dates.")
                    .small()
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(6.0);
            ui.separator();
            let close_btn = egui::Button::new(RichText::new("Close").color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([80.0, 28.0], close_btn).clicked() {
                app.show_about = false;
            }
        });

    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
