use egui::{Color32, RichText, Ui};

use training_gantt::layout::{ScheduleLayout, ViewState};

use crate::ui::theme;

/// Actions that the resource panel can request.
pub enum ResourcePanelAction {
    None,
    Select(String),
}

/// Render the left-side resource summary panel.
pub fn show_resource_panel(
    view: &ViewState<'_>,
    selected: Option<&str>,
    ui: &mut Ui,
) -> ResourcePanelAction {
    let layout = match view {
        ViewState::Ready(layout) => *layout,
        ViewState::Loading => {
            ui.label(RichText::new("Loading...").color(theme::TEXT_DIM));
            return ResourcePanelAction::None;
        }
        ViewState::Error(_) => {
            ui.label(RichText::new("No data available").color(theme::TEXT_ERROR));
            return ResourcePanelAction::None;
        }
        ViewState::Empty => {
            ui.label(RichText::new("No trainers scheduled").color(theme::TEXT_DIM));
            return ResourcePanelAction::None;
        }
    };

    show_summary(layout, selected, ui)
}

fn show_summary(layout: &ScheduleLayout, selected: Option<&str>, ui: &mut Ui) -> ResourcePanelAction {
    let mut action = ResourcePanelAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Trainers")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", layout.groups.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, group) in layout.groups.iter().enumerate() {
                let is_selected = selected == Some(group.resource_id.as_str());
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&group.resource_name)
                                .size(12.0)
                                .color(if is_selected {
                                    Color32::WHITE
                                } else {
                                    theme::TEXT_PRIMARY
                                }),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if let Some(span) = layout.engagement(&group.resource_id) {
                                ui.label(
                                    RichText::new(format!(
                                        "days {}–{}",
                                        span.padded_start_day, span.padded_end_day
                                    ))
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                                );
                            }
                            ui.label(
                                RichText::new(format!("{}h", group.total_hours()))
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        });
                    });
                    for item in &group.items {
                        ui.horizontal(|ui| {
                            ui.add_space(10.0);
                            let (dot_rect, _) =
                                ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                            ui.painter()
                                .circle_filled(dot_rect.center(), 3.0, theme::bar_color(item.category));
                            ui.add(
                                egui::Label::new(
                                    RichText::new(&item.name).size(11.0).color(theme::TEXT_SECONDARY),
                                )
                                .truncate(),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(
                                    RichText::new(format!("{}h", item.total_hours))
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                );
                            });
                        });
                    }
                });

                // Make entire row clickable
                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("resource-row", group.resource_id.as_str())),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = ResourcePanelAction::Select(group.resource_id.clone());
                }

                ui.add_space(1.0);
            }
        });

    action
}
