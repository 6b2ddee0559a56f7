use egui::{Align2, Color32, Id, Painter, Pos2, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};

use training_gantt::layout::{ScheduleLayout, ScrollSync, TaskRenderInfo, ViewState};
use training_gantt::model::LayoutConfig;

use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::LABEL_COLUMN_WIDTH;

/// Result details from interactions in the schedule chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// Positive to zoom in, negative to zoom out.
    pub zoom_steps: i32,
    pub selected_resource: Option<String>,
    pub clear_selection: bool,
}

/// Render the schedule (central panel) for whatever state the data is in.
pub fn show_schedule_chart(
    view: &ViewState<'_>,
    config: &LayoutConfig,
    scroll: &mut ScrollSync,
    scroll_request: &mut Option<f32>,
    selected: Option<&str>,
    ui: &mut Ui,
) -> ChartInteraction {
    match view {
        ViewState::Loading => {
            centered_message(ui, |ui| {
                ui.spinner();
                ui.label(RichText::new("Loading schedule...").color(theme::TEXT_SECONDARY));
            });
            ChartInteraction::default()
        }
        ViewState::Error(err) => {
            centered_message(ui, |ui| {
                ui.label(
                    RichText::new(format!("{} Could not load schedule", egui_phosphor::regular::WARNING))
                        .strong()
                        .color(theme::TEXT_ERROR),
                );
                ui.label(RichText::new(err.to_string()).color(theme::TEXT_SECONDARY));
            });
            ChartInteraction::default()
        }
        ViewState::Empty => {
            centered_message(ui, |ui| {
                ui.label(RichText::new("No scheduled segments").strong());
                ui.label(
                    RichText::new("The plan loaded fine but contains nothing to lay out.")
                        .color(theme::TEXT_DIM),
                );
            });
            ChartInteraction::default()
        }
        ViewState::Ready(layout) => {
            show_timeline(layout, config, scroll, scroll_request, selected, ui)
        }
    }
}

fn centered_message(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.4);
            add_contents(ui);
        });
    });
}

fn show_timeline(
    layout: &ScheduleLayout,
    config: &LayoutConfig,
    scroll: &mut ScrollSync,
    scroll_request: &mut Option<f32>,
    selected: Option<&str>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    // Ctrl+wheel zooms instead of scrolling
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        let delta = ui.input(|i| i.smooth_scroll_delta.y);
        if delta > 0.0 {
            interaction.zoom_steps = 1;
        } else if delta < 0.0 {
            interaction.zoom_steps = -1;
        }
    }

    let full = ui.available_rect_before_wrap();
    let corner_rect = Rect::from_min_size(full.min, Vec2::new(LABEL_WIDTH, HEADER_HEIGHT));
    let header_rect = Rect::from_min_max(
        Pos2::new(full.min.x + LABEL_WIDTH, full.min.y),
        Pos2::new(full.max.x, full.min.y + HEADER_HEIGHT),
    );
    let label_rect = Rect::from_min_max(
        Pos2::new(full.min.x, full.min.y + HEADER_HEIGHT),
        Pos2::new(full.min.x + LABEL_WIDTH, full.max.y),
    );
    let grid_rect = Rect::from_min_max(
        Pos2::new(full.min.x + LABEL_WIDTH, full.min.y + HEADER_HEIGHT),
        full.max,
    );

    // The grid is the only scrollable region; its offset drives the frozen parts.
    let mut area = egui::ScrollArea::both()
        .id_salt("schedule-grid")
        .auto_shrink([false, false]);
    if let Some(target) = scroll_request.take() {
        area = area.vertical_scroll_offset(ScrollSync::scroll_target_for(target));
    }
    let output = ui
        .allocate_new_ui(egui::UiBuilder::new().max_rect(grid_rect), |ui| {
            area.show(ui, |ui| draw_grid(layout, config, selected, ui))
        })
        .inner;
    scroll.follow_grid(output.state.offset.x, output.state.offset.y);
    let grid_interaction = output.inner;
    interaction.selected_resource = grid_interaction.selected_resource;
    interaction.clear_selection = grid_interaction.clear_selection;

    draw_header(&ui.painter_at(header_rect), header_rect, layout, config, scroll.header_shift());
    if let Some(resource) = draw_labels(ui, label_rect, layout, config, selected, scroll.label_shift()) {
        interaction.selected_resource = Some(resource);
    }

    let corner = ui.painter_at(corner_rect);
    corner.rect_filled(corner_rect, 0.0, theme::BG_HEADER);
    corner.text(
        Pos2::new(corner_rect.left() + 10.0, corner_rect.center().y),
        Align2::LEFT_CENTER,
        "Trainer / Item",
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );
    corner.line_segment(
        [corner_rect.left_bottom(), corner_rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    ui.allocate_rect(full, Sense::hover());
    interaction
}

/// Visible 1-based day range for a horizontal window `[left, right)` in
/// content pixels.
fn visible_days(left: f32, right: f32, config: &LayoutConfig, total_days: i32) -> (i32, i32) {
    let first = config.x_to_day(left.max(0.0)).max(1);
    let last = config.x_to_day(right.max(0.0)).min(total_days);
    (first, last)
}

fn draw_grid(
    layout: &ScheduleLayout,
    config: &LayoutConfig,
    selected: Option<&str>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let size = Vec2::new(
        layout.total_timeline_width.max(available.x),
        layout.total_grid_height.max(available.y),
    );
    let (response, painter) = ui.allocate_painter(size, Sense::click());
    let origin = response.rect.min;
    let clip = ui.clip_rect();
    let dw = config.day_width;

    painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

    // Row backgrounds
    for (group, rows) in layout.groups.iter().zip(&layout.rows.resources) {
        let is_selected = selected == Some(group.resource_id.as_str());
        let header = Rect::from_min_size(
            Pos2::new(origin.x, origin.y + rows.header_offset),
            Vec2::new(size.x, config.resource_header_height),
        );
        painter.rect_filled(header, 0.0, theme::BG_RESOURCE_ROW);
        if is_selected {
            painter.rect_filled(header, 0.0, theme::BG_SELECTED);
        }
        for (i, offset) in rows.item_offsets.iter().enumerate() {
            if i % 2 == 1 {
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, origin.y + offset),
                        Vec2::new(size.x, config.item_row_height),
                    ),
                    0.0,
                    theme::BG_ROW_EVEN,
                );
            }
        }
    }

    // Rest days and day/month lines, only for the visible columns
    let (first_day, last_day) = visible_days(
        clip.left() - origin.x,
        clip.right() - origin.x,
        config,
        layout.total_days(),
    );
    for day in first_day..=last_day {
        let x = origin.x + (day - 1) as f32 * dw;
        if layout.calendar.is_rest_day(day) {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, origin.y), Vec2::new(dw, size.y)),
                0.0,
                theme::REST_DAY_SHADE,
            );
        }
        let month_start = (day - 1) % config.days_per_month == 0;
        if month_start || dw >= 12.0 {
            let color = if month_start { theme::MONTH_LINE } else { theme::GRID_LINE };
            painter.line_segment(
                [Pos2::new(x, origin.y), Pos2::new(x, origin.y + size.y)],
                Stroke::new(0.5, color),
            );
        }
    }

    // Engagement bands sit in the resource header row
    for span in &layout.engagements {
        let band = Rect::from_min_size(
            Pos2::new(
                origin.x + (span.padded_start_day - 1) as f32 * dw,
                origin.y + span.vertical_offset + theme::BAR_INSET,
            ),
            Vec2::new(
                span.total_span_days as f32 * dw,
                config.resource_header_height - theme::BAR_INSET * 2.0,
            ),
        );
        painter.rect_filled(band, Rounding::same(theme::BAR_ROUNDING), theme::ENGAGEMENT_FILL);
        painter.rect_stroke(
            band,
            Rounding::same(theme::BAR_ROUNDING),
            Stroke::new(1.0, theme::ENGAGEMENT_STROKE),
        );
        if band.width() > 70.0 {
            painter.with_clip_rect(band).text(
                Pos2::new(band.left() + 6.0, band.center().y),
                Align2::LEFT_CENTER,
                format!("{} days incl. travel", span.total_span_days),
                theme::font_small(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    let mut consumed_click = false;
    for task in &layout.tasks {
        let bar_rect = draw_segment_bar(&painter, origin, config, task);
        if !bar_rect.intersects(clip) {
            continue;
        }
        let bar_response = ui
            .interact(bar_rect, Id::new(("segment", task.segment.id.as_str())), Sense::click())
            .on_hover_ui(|ui| segment_tooltip(ui, task, config));
        if bar_response.clicked() {
            interaction.selected_resource = Some(task.segment.resource_id.clone());
            consumed_click = true;
        }
        if selected == Some(task.segment.resource_id.as_str()) {
            painter.rect_stroke(
                bar_rect.expand(1.0),
                Rounding::same(theme::BAR_ROUNDING + 1.0),
                Stroke::new(1.5, theme::BORDER_ACCENT),
            );
        }
    }

    // Empty click on background clears selection
    if response.clicked() && !consumed_click {
        interaction.clear_selection = true;
    }

    interaction
}

fn draw_segment_bar(
    painter: &Painter,
    origin: Pos2,
    config: &LayoutConfig,
    task: &TaskRenderInfo,
) -> Rect {
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(
            origin.x + task.horizontal_offset,
            origin.y + task.vertical_offset + inset,
        ),
        Vec2::new(task.pixel_width, config.item_row_height - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, theme::bar_color(task.segment.item_category));

    if task.pixel_width > 28.0 {
        painter.with_clip_rect(bar_rect).text(
            Pos2::new(bar_rect.left() + 4.0, bar_rect.center().y),
            Align2::LEFT_CENTER,
            format!("{}h", task.segment.segment_hours),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
    }

    bar_rect
}

fn segment_tooltip(ui: &mut Ui, task: &TaskRenderInfo, config: &LayoutConfig) {
    let segment = &task.segment;
    ui.strong(format!("{} · {}", segment.resource_name, segment.item_name));
    ui.label(format!(
        "Month {} day {} (day {}), {} day(s)",
        task.month, task.day_of_month, segment.start_day, segment.duration_days
    ));
    ui.label(format!(
        "{}h from hour {} of {}",
        segment.segment_hours, segment.start_hour_offset, config.daily_hour_limit
    ));
    if segment.total_hours > segment.segment_hours {
        ui.label(
            RichText::new(format!("Part of a {}h task", segment.total_hours)).color(theme::TEXT_DIM),
        );
    }
}

fn draw_header(
    painter: &Painter,
    rect: Rect,
    layout: &ScheduleLayout,
    config: &LayoutConfig,
    shift_x: f32,
) {
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let dw = config.day_width;
    let (first_day, last_day) = visible_days(-shift_x, -shift_x + rect.width(), config, layout.total_days());
    let mid_y = rect.top() + HEADER_HEIGHT / 2.0;

    // Month labels stay pinned to the left edge while their month is visible
    let first_month = (first_day - 1) / config.days_per_month + 1;
    let last_month = (last_day - 1) / config.days_per_month + 1;
    for month in first_month..=last_month {
        let month_x = rect.left() + shift_x + ((month - 1) * config.days_per_month) as f32 * dw;
        painter.text(
            Pos2::new(month_x.max(rect.left()) + 4.0, rect.top() + 11.0),
            Align2::LEFT_CENTER,
            format!("Month {}", month),
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
        painter.line_segment(
            [Pos2::new(month_x, rect.top()), Pos2::new(month_x, rect.bottom())],
            Stroke::new(1.0, theme::MONTH_LINE),
        );
    }

    if dw < 18.0 {
        return;
    }
    for day in first_day..=last_day {
        let x = rect.left() + shift_x + (day - 1) as f32 * dw;
        let day_of_month = (day - 1) % config.days_per_month + 1;
        let color = if layout.calendar.is_rest_day(day) {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x + dw / 2.0, mid_y + 10.0),
            Align2::CENTER_CENTER,
            day_of_month.to_string(),
            theme::font_sub(),
            color,
        );
    }
}

/// Paint the frozen label column; returns a resource if its label was clicked.
fn draw_labels(
    ui: &mut Ui,
    rect: Rect,
    layout: &ScheduleLayout,
    config: &LayoutConfig,
    selected: Option<&str>,
    shift_y: f32,
) -> Option<String> {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::BG_PANEL);
    painter.line_segment(
        [rect.right_top(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut clicked = None;

    for (group, rows) in layout.groups.iter().zip(&layout.rows.resources) {
        let top = rect.top() + shift_y + rows.header_offset;
        let row_bottom = top + config.resource_header_height;
        if top > rect.bottom() {
            break;
        }
        let header = Rect::from_min_max(Pos2::new(rect.left(), top), Pos2::new(rect.right(), row_bottom));

        let is_selected = selected == Some(group.resource_id.as_str());
        painter.rect_filled(header, 0.0, if is_selected { theme::BG_SELECTED } else { theme::BG_RESOURCE_ROW });
        painter.text(
            Pos2::new(rect.left() + 10.0, header.center().y),
            Align2::LEFT_CENTER,
            format!("{} {}", egui_phosphor::regular::USER, group.resource_name),
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
        if let Some(span) = layout.engagement(&group.resource_id) {
            painter.text(
                Pos2::new(rect.right() - 8.0, header.center().y),
                Align2::RIGHT_CENTER,
                format!("{}d", span.total_span_days),
                theme::font_small(),
                theme::TEXT_DIM,
            );
        }

        let visible = header.intersect(rect);
        if visible.is_positive()
            && ui
                .interact(visible, Id::new(("resource-label", group.resource_id.as_str())), Sense::click())
                .clicked()
        {
            clicked = Some(group.resource_id.clone());
        }

        for (item, offset) in group.items.iter().zip(&rows.item_offsets) {
            let y = rect.top() + shift_y + offset + config.item_row_height / 2.0;
            painter.text(
                Pos2::new(rect.left() + 26.0, y),
                Align2::LEFT_CENTER,
                &item.name,
                theme::font_bar(),
                theme::TEXT_SECONDARY,
            );
            painter.text(
                Pos2::new(rect.right() - 8.0, y),
                Align2::RIGHT_CENTER,
                format!("{}h", item.total_hours),
                theme::font_small(),
                theme::bar_color(item.category),
            );
        }
    }

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_days_clamped_to_timeline() {
        let config = LayoutConfig::default();
        assert_eq!(visible_days(-40.0, 95.0, &config, 360), (1, 4));
        assert_eq!(visible_days(10_000.0, 20_000.0, &config, 360), (334, 360));
    }
}
