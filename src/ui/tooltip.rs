use egui::{Id, Order, RichText, Vec2};
use shopfloor_gantt::layout::{place_popup, AnchorBox, PlacementConfig, PopupSize, ScreenSize};
use shopfloor_gantt::model::Job;

use crate::ui::theme;

/// Used until the tooltip has been laid out once and its real size is known.
const FALLBACK_SIZE: Vec2 = Vec2::new(240.0, 80.0);
const MAX_WIDTH: f32 = 260.0;

/// Show a job card next to `anchor` (screen coordinates), kept clear of the
/// header band and the details sidebar.
pub fn show_job_tooltip(
    ctx: &egui::Context,
    anchor: egui::Rect,
    job: &Job,
    machine: &str,
    config: &PlacementConfig,
) {
    let id = Id::new(("job-tooltip", job.id));
    // The popup's size is only known after drawing, so place with last frame's.
    let size = ctx
        .data(|d| d.get_temp::<Vec2>(id))
        .unwrap_or(FALLBACK_SIZE);
    let screen = ctx.screen_rect();

    let placement = place_popup(
        AnchorBox {
            top: anchor.top() - screen.top(),
            left: anchor.left() - screen.left(),
            width: anchor.width(),
            height: anchor.height(),
        },
        PopupSize {
            width: size.x,
            height: size.y,
        },
        ScreenSize {
            width: screen.width(),
            height: screen.height(),
        },
        config,
    );

    let shown = egui::Area::new(id)
        .order(Order::Tooltip)
        .fixed_pos(screen.min + Vec2::new(placement.left, placement.top))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(MAX_WIDTH);
                ui.label(RichText::new(&job.name).strong().color(theme::TEXT_PRIMARY));
                ui.label(RichText::new(machine).color(theme::TEXT_SECONDARY));
                ui.label(format!(
                    "{} → {}",
                    job.span.start().format("%d/%m %H:%M"),
                    job.span.end().format("%d/%m %H:%M"),
                ));
                ui.label(
                    RichText::new(format_duration(job.span.duration()))
                        .font(theme::font_sub())
                        .color(theme::TEXT_DIM),
                );
            });
        });

    ctx.data_mut(|d| d.insert_temp(id, shown.response.rect.size()));
}

pub fn format_duration(d: chrono::Duration) -> String {
    let minutes = d.num_minutes();
    match (minutes / (24 * 60), (minutes / 60) % 24, minutes % 60) {
        (0, 0, m) => format!("{m} min"),
        (0, h, 0) => format!("{h} h"),
        (0, h, m) => format!("{h} h {m} min"),
        (days, h, _) => format!("{days} d {h} h"),
    }
}
