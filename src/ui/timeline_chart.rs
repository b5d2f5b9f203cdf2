use chrono::{DurationRound, Utc};
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use shopfloor_gantt::layout::{self, JobRect, PlacementConfig, Point, Surface};
use shopfloor_gantt::model::{Instant, Schedule, Viewport};
use uuid::Uuid;

use crate::ui::{theme, tooltip};

/// Tick spacings tried from finest to coarsest.
const TICK_STEPS: &[chrono::Duration] = &[
    chrono::Duration::minutes(15),
    chrono::Duration::hours(1),
    chrono::Duration::hours(6),
    chrono::Duration::days(1),
    chrono::Duration::weeks(1),
];
const MIN_TICK_SPACING: f32 = 70.0;

/// Navigation requested by the chart this frame.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    /// Zoom around an instant; factor > 1 zooms in.
    pub zoom: Option<(Instant, f32)>,
    pub pan: Option<chrono::Duration>,
    pub pan_started: bool,
}

/// Render the machine lanes for the visible window (central panel).
///
/// Lanes that do not fit scroll vertically; dragging stays a time pan.
pub fn show_timeline_chart(
    schedule: &Schedule,
    viewport: &Viewport,
    selected_job: &mut Option<Uuid>,
    popup_config: &PlacementConfig,
    show_tooltips: bool,
    ui: &mut Ui,
) -> ChartInteraction {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            draw_chart(schedule, viewport, selected_job, popup_config, show_tooltips, ui)
        })
        .inner
}

fn draw_chart(
    schedule: &Schedule,
    viewport: &Viewport,
    selected_job: &mut Option<Uuid>,
    popup_config: &PlacementConfig,
    show_tooltips: bool,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let lanes_height = schedule.lanes.len() as f32 * theme::LANE_HEIGHT;
    let (response, painter) = ui.allocate_painter(
        Vec2::new(available.x, (theme::AXIS_HEIGHT + lanes_height).max(available.y)),
        Sense::click_and_drag(),
    );
    let full = response.rect;
    painter.rect_filled(full, 0.0, theme::BG_DARK);

    let chart_origin = Pos2::new(full.left() + theme::LABEL_WIDTH, full.top() + theme::AXIS_HEIGHT);
    let surface = Surface::new((full.width() - theme::LABEL_WIDTH).max(0.0), lanes_height);
    let window = viewport.as_domain();

    // Lane backgrounds and labels
    for (i, lane) in schedule.lanes.iter().enumerate() {
        let y = chart_origin.y + i as f32 * theme::LANE_HEIGHT;
        let row = Rect::from_min_size(Pos2::new(full.left(), y), Vec2::new(full.width(), theme::LANE_HEIGHT));
        if i % 2 == 0 {
            painter.rect_filled(row, 0.0, theme::BG_PANEL);
        }
        painter.line_segment(
            [row.left_bottom(), row.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        painter.with_clip_rect(Rect::from_min_size(row.min, Vec2::new(theme::LABEL_WIDTH - 6.0, theme::LANE_HEIGHT)))
            .text(
                Pos2::new(full.left() + 8.0, row.center().y),
                Align2::LEFT_CENTER,
                &lane.machine,
                theme::font_header(),
                theme::TEXT_SECONDARY,
            );
    }

    draw_time_axis(&painter, full, chart_origin, surface, viewport);

    // Job bars, culled to the visible window
    let lane_count = schedule.lanes.len();
    let rects: Vec<JobRect> = schedule
        .jobs()
        .filter(|(_, job)| window.overlaps(&job.span))
        .filter_map(|(lane, job)| {
            layout::project(&job.span, &window, surface, lane, lane_count).map(|rect| JobRect {
                job_id: job.id,
                lane,
                rect,
            })
        })
        .collect();

    let clipped = painter.with_clip_rect(Rect::from_min_size(chart_origin, Vec2::new(surface.width, surface.height)));
    for jr in &rects {
        let bar = to_screen(chart_origin, jr.rect).shrink2(Vec2::new(0.0, 3.0));
        let rounding = Rounding::same(theme::BAR_ROUNDING);
        clipped.rect_filled(bar, rounding, theme::lane_color(jr.lane));
        if *selected_job == Some(jr.job_id) {
            clipped.rect_stroke(bar.expand(1.5), rounding, Stroke::new(2.0, theme::BORDER_ACCENT));
        }
        if bar.width() > 30.0 {
            if let Some((_, job)) = schedule.find_job(jr.job_id) {
                let galley = painter.layout_no_wrap(job.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
                let text_y = bar.center().y - galley.size().y / 2.0;
                clipped
                    .with_clip_rect(bar)
                    .galley(Pos2::new(bar.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
            }
        }
    }

    draw_now_line(&clipped, chart_origin, surface, viewport);

    let hovered = response.hover_pos().and_then(|pos| {
        let local = Point::new(pos.x - chart_origin.x, pos.y - chart_origin.y);
        layout::hit_test(&rects, local).copied()
    });

    if response.clicked() {
        *selected_job = hovered.map(|jr| jr.job_id);
    }

    if show_tooltips && !response.dragged() {
        if let Some(jr) = hovered {
            if let Some((lane, job)) = schedule.find_job(jr.job_id) {
                let anchor = to_screen(chart_origin, jr.rect);
                tooltip::show_job_tooltip(ui.ctx(), anchor, job, &lane.machine, popup_config);
            }
        }
    }

    // Drag pans, Ctrl+scroll zooms around the pointer
    if response.dragged() && surface.width > 0.0 {
        let dx = response.drag_delta().x;
        let ms = viewport.duration().num_milliseconds() as f64 * (-dx / surface.width) as f64;
        interaction.pan = Some(chrono::Duration::milliseconds(ms.round() as i64));
        interaction.pan_started = response.drag_started();
    }
    if let Some(pos) = response.hover_pos() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if ui.input(|i| i.modifiers.ctrl) && scroll != 0.0 {
            let at = layout::unproject(Point::new(pos.x - chart_origin.x, 0.0), &window, surface);
            let factor = if scroll > 0.0 { 1.2 } else { 1.0 / 1.2 };
            interaction.zoom = Some((at, factor));
        }
    }

    interaction
}

fn to_screen(origin: Pos2, r: layout::Rect) -> Rect {
    Rect::from_min_size(Pos2::new(origin.x + r.x, origin.y + r.y), Vec2::new(r.width, r.height))
}

/// Coarsest-enough tick spacing so labels do not collide.
fn tick_step(viewport: &Viewport, width: f32) -> chrono::Duration {
    let ms_per_px = viewport.duration().num_milliseconds() as f32 / width.max(1.0);
    TICK_STEPS
        .iter()
        .copied()
        .find(|step| step.num_milliseconds() as f32 / ms_per_px >= MIN_TICK_SPACING)
        .unwrap_or(chrono::Duration::weeks(4))
}

fn draw_time_axis(painter: &egui::Painter, full: Rect, origin: Pos2, surface: Surface, viewport: &Viewport) {
    painter.rect_filled(
        Rect::from_min_size(full.min, Vec2::new(full.width(), theme::AXIS_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    if surface.width <= 0.0 {
        return;
    }

    let window = viewport.as_domain();
    let step = tick_step(viewport, surface.width);
    let Ok(mut tick) = viewport.start().duration_trunc(step) else {
        return;
    };
    let label_format = if step >= chrono::Duration::days(1) { "%a %d/%m" } else { "%d/%m %H:%M" };

    while tick <= viewport.end() {
        if tick >= viewport.start() {
            let x = origin.x + layout::x_for_instant(tick, &window, surface);
            painter.line_segment(
                [Pos2::new(x, origin.y), Pos2::new(x, full.bottom())],
                Stroke::new(0.5, theme::GRID_LINE),
            );
            painter.text(
                Pos2::new(x + 3.0, full.top() + theme::AXIS_HEIGHT / 2.0),
                Align2::LEFT_CENTER,
                tick.format(label_format).to_string(),
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
        }
        tick += step;
    }
}

fn draw_now_line(painter: &egui::Painter, origin: Pos2, surface: Surface, viewport: &Viewport) {
    let now = Utc::now();
    if now < viewport.start() || now > viewport.end() {
        return;
    }
    let x = origin.x + layout::x_for_instant(now, &viewport.as_domain(), surface);
    painter.line_segment(
        [Pos2::new(x, origin.y), Pos2::new(x, origin.y + surface.height)],
        Stroke::new(1.5, theme::NOW_LINE),
    );
}
