use egui::{Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use shopfloor_gantt::layout::{self, Point, Surface};
use shopfloor_gantt::model::{Instant, Schedule, TimeDomain, Viewport};

use crate::ui::theme;

/// Where the user clicked or dragged on the overview strip.
#[derive(Debug, Clone, Copy)]
pub struct MinimapNavigation {
    pub at: Instant,
    /// True on the first frame of a click or drag, so only one history entry
    /// is recorded per gesture.
    pub started: bool,
}

/// Overview of the whole schedule with the visible window highlighted.
pub fn show_minimap(
    schedule: &Schedule,
    domain: &TimeDomain,
    viewport: &Viewport,
    ui: &mut Ui,
) -> Option<MinimapNavigation> {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let rect = response.rect;
    let surface = Surface::new(rect.width(), rect.height());
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);

    let to_screen = |r: layout::Rect| {
        Rect::from_min_size(Pos2::new(rect.left() + r.x, rect.top() + r.y), Vec2::new(r.width, r.height))
    };

    for jr in layout::project_schedule(schedule, domain, surface) {
        painter.rect_filled(to_screen(jr.rect), 0.0, theme::lane_color(jr.lane).gamma_multiply(0.7));
    }

    let window = to_screen(layout::project_viewport(viewport, domain, surface));
    painter.rect_filled(window, Rounding::same(2.0), theme::VIEWPORT_FILL);
    painter.rect_stroke(window, Rounding::same(2.0), Stroke::new(1.0, theme::ACCENT));

    if !(response.clicked() || response.dragged()) {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    let at = layout::unproject(Point::new(pos.x - rect.left(), pos.y - rect.top()), domain, surface);
    Some(MinimapNavigation {
        at,
        started: response.clicked() || response.drag_started(),
    })
}
