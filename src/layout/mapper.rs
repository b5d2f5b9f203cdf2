//! Mapping between schedule time and pixel space.
//!
//! Spans that reach outside the projection domain are clipped to it, never
//! dropped, and every returned rect lies inside the drawing surface. A
//! zero-length domain maps every span onto the full surface width.

use chrono::Duration;
use uuid::Uuid;

use crate::model::{Instant, Schedule, TimeDomain, TimeSpan, Viewport};

/// Narrowest a projected span may be, so zero-length jobs stay clickable.
pub const MIN_VISIBLE_PX: f32 = 2.0;
/// Vertical gap left at the bottom of every lane.
pub const LANE_PADDING: f32 = 4.0;

/// Size of a drawing surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// A projected job, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobRect {
    pub job_id: Uuid,
    pub lane: usize,
    pub rect: Rect,
}

/// Project one span into its lane on the surface.
///
/// Returns `None` when there is nothing to draw into: no lanes, a lane index
/// past the end, or an empty surface.
pub fn project(
    span: &TimeSpan,
    domain: &TimeDomain,
    surface: Surface,
    lane_index: usize,
    lane_count: usize,
) -> Option<Rect> {
    if lane_count == 0 || lane_index >= lane_count || !surface.is_drawable() {
        return None;
    }
    let (x, width) = horizontal_extent(span.start(), span.end(), domain, surface.width);
    let lane_height = surface.height / lane_count as f32;
    Some(Rect {
        x,
        y: lane_index as f32 * lane_height,
        width,
        height: (lane_height - LANE_PADDING).max(0.0),
    })
}

/// Project every job of every lane. An empty schedule yields an empty vec.
pub fn project_schedule(schedule: &Schedule, domain: &TimeDomain, surface: Surface) -> Vec<JobRect> {
    let lane_count = schedule.lanes.len();
    schedule
        .jobs()
        .filter_map(|(lane, job)| {
            project(&job.span, domain, surface, lane, lane_count).map(|rect| JobRect {
                job_id: job.id,
                lane,
                rect,
            })
        })
        .collect()
}

/// The visible window drawn over an overview strip, full surface height.
pub fn project_viewport(viewport: &Viewport, domain: &TimeDomain, surface: Surface) -> Rect {
    if !surface.is_drawable() {
        return Rect {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
    }
    let (x, width) = horizontal_extent(viewport.start(), viewport.end(), domain, surface.width);
    Rect {
        x,
        y: 0.0,
        width,
        height: surface.height,
    }
}

/// X coordinate of a single instant, clamped to the surface.
pub fn x_for_instant(at: Instant, domain: &TimeDomain, surface: Surface) -> f32 {
    if !surface.is_drawable() {
        return 0.0;
    }
    offset_px(at, domain, surface.width) as f32
}

/// Instant under a pixel position. Only `x` matters; the result is always
/// inside the domain, however far off-surface the point is.
pub fn unproject(point: Point, domain: &TimeDomain, surface: Surface) -> Instant {
    let ratio = if surface.width > 0.0 {
        point.x as f64 / surface.width as f64
    } else {
        0.0
    };
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let total_ms = domain.duration().num_milliseconds();
    domain.min() + Duration::milliseconds((ratio * total_ms as f64).round() as i64)
}

/// Pixels from the left edge for `at`, clamped into the domain first.
fn offset_px(at: Instant, domain: &TimeDomain, width: f32) -> f64 {
    let total_ms = domain.duration().num_milliseconds();
    if total_ms <= 0 {
        return 0.0;
    }
    let offset_ms = (domain.clamp(at) - domain.min()).num_milliseconds();
    offset_ms as f64 * width as f64 / total_ms as f64
}

fn horizontal_extent(start: Instant, end: Instant, domain: &TimeDomain, width: f32) -> (f32, f32) {
    if domain.is_degenerate() {
        return (0.0, width);
    }
    let x0 = offset_px(start, domain, width);
    let x1 = offset_px(end, domain, width);
    let w = ((x1 - x0) as f32).max(MIN_VISIBLE_PX).min(width);
    // Minimum-width slivers at the right edge are pulled back inside.
    let x = (x0 as f32).min(width - w).max(0.0);
    (x, w)
}

/// Topmost projected job under `point`, if any.
pub fn hit_test(rects: &[JobRect], point: Point) -> Option<&JobRect> {
    rects.iter().rev().find(|r| r.rect.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Job;
    use chrono::{TimeZone, Utc};

    fn day(d: i64) -> Instant {
        Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap() + Duration::days(d)
    }

    fn span(a: i64, b: i64) -> TimeSpan {
        TimeSpan::new(day(a), day(b)).unwrap()
    }

    fn fortnight() -> TimeDomain {
        TimeDomain::new(day(0), day(14)).unwrap()
    }

    fn assert_inside(rect: Rect, surface: Surface) {
        assert!(rect.x >= 0.0 && rect.y >= 0.0, "{rect:?}");
        assert!(rect.right() <= surface.width + 1e-3, "{rect:?}");
        assert!(rect.bottom() <= surface.height + 1e-3, "{rect:?}");
    }

    #[test]
    fn two_day_job_in_middle_lane() {
        let surface = Surface::new(1400.0, 300.0);
        let rect = project(&span(2, 4), &fortnight(), surface, 1, 3).unwrap();
        assert_eq!(rect.x, 200.0);
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.y, 100.0);
        assert_eq!(rect.height, 100.0 - LANE_PADDING);
    }

    #[test]
    fn spans_inside_domain_stay_on_surface() {
        let surface = Surface::new(977.0, 211.0);
        let domain = fortnight();
        for lane in 0..5 {
            for a in 0..=14 {
                for b in a..=14 {
                    let rect = project(&span(a, b), &domain, surface, lane, 5).unwrap();
                    assert_inside(rect, surface);
                }
            }
        }
    }

    #[test]
    fn zero_length_job_gets_minimum_width() {
        let surface = Surface::new(1400.0, 100.0);
        let rect = project(&TimeSpan::instant(day(14)), &fortnight(), surface, 0, 1).unwrap();
        assert_eq!(rect.width, MIN_VISIBLE_PX);
        assert_eq!(rect.right(), 1400.0);
    }

    #[test]
    fn spans_outside_domain_are_clipped() {
        let surface = Surface::new(700.0, 100.0);
        let domain = TimeDomain::new(day(2), day(9)).unwrap();

        let straddling = project(&span(0, 4), &domain, surface, 0, 1).unwrap();
        assert_eq!(straddling.x, 0.0);
        assert_eq!(straddling.width, 200.0);

        let beyond = project(&span(11, 12), &domain, surface, 0, 1).unwrap();
        assert_inside(beyond, surface);
        assert_eq!(beyond.width, MIN_VISIBLE_PX);
    }

    #[test]
    fn degenerate_domain_fills_width_without_nan() {
        let surface = Surface::new(640.0, 90.0);
        let domain = TimeDomain::new(day(3), day(3)).unwrap();
        let rect = project(&TimeSpan::instant(day(3)), &domain, surface, 0, 2).unwrap();
        for v in [rect.x, rect.y, rect.width, rect.height] {
            assert!(v.is_finite());
        }
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 640.0);
        assert_eq!(x_for_instant(day(3), &domain, surface), 0.0);
        assert_eq!(unproject(Point::new(320.0, 0.0), &domain, surface), day(3));
    }

    #[test]
    fn nothing_to_draw_into() {
        let surface = Surface::new(100.0, 100.0);
        assert!(project(&span(1, 2), &fortnight(), surface, 0, 0).is_none());
        assert!(project(&span(1, 2), &fortnight(), surface, 3, 3).is_none());
        assert!(project(&span(1, 2), &fortnight(), Surface::new(0.0, 10.0), 0, 1).is_none());
        assert!(project_schedule(&Schedule::default(), &fortnight(), surface).is_empty());
    }

    #[test]
    fn round_trip_within_one_pixel() {
        let surface = Surface::new(1013.0, 50.0);
        let domain = fortnight();
        let pixel_ms = domain.duration().num_milliseconds() as f64 / surface.width as f64;
        let mut at = day(0);
        while at <= day(14) {
            let x = x_for_instant(at, &domain, surface);
            let back = unproject(Point::new(x, 25.0), &domain, surface);
            let err = (back - at).num_milliseconds().abs() as f64;
            assert!(err <= pixel_ms, "{at} came back as {back}");
            at += Duration::minutes(377);
        }
    }

    #[test]
    fn unproject_clamps_off_surface_points() {
        let surface = Surface::new(1400.0, 300.0);
        let domain = fortnight();
        assert_eq!(unproject(Point::new(-50.0, 0.0), &domain, surface), day(0));
        assert_eq!(unproject(Point::new(9000.0, 0.0), &domain, surface), day(14));
        assert_eq!(unproject(Point::new(f32::NAN, 0.0), &domain, surface), day(0));
        assert_eq!(unproject(Point::new(700.0, 0.0), &domain, surface), day(7));
    }

    #[test]
    fn viewport_indicator_spans_full_height() {
        let surface = Surface::new(1400.0, 40.0);
        let vp = Viewport::new(day(7), day(14)).unwrap();
        let rect = project_viewport(&vp, &fortnight(), surface);
        assert_eq!(rect.x, 700.0);
        assert_eq!(rect.width, 700.0);
        assert_eq!(rect.height, 40.0);
    }

    #[test]
    fn schedule_projection_and_hit_test() {
        let mut schedule = Schedule::new("line 1");
        schedule.push_job("Press", Job::new("A", span(0, 7)));
        schedule.push_job("Weld", Job::new("B", span(7, 14)));
        let surface = Surface::new(1400.0, 200.0);
        let rects = project_schedule(&schedule, &fortnight(), surface);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].lane, 1);

        let hit = hit_test(&rects, Point::new(1000.0, 150.0)).unwrap();
        assert_eq!(hit.job_id, schedule.lanes[1].jobs[0].id);
        assert!(hit_test(&rects, Point::new(1000.0, 50.0)).is_none());
    }
}
