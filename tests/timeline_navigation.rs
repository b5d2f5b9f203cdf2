use chrono::{Duration, TimeZone, Utc};
use shopfloor_gantt::io::parse_schedule;
use shopfloor_gantt::layout::{
    self, place_popup, AnchorBox, PlacementConfig, Point, PopupSize, ScreenSize, Side, Surface,
};
use shopfloor_gantt::model::{History, Viewport};

const SCHEDULE: &str = "\
machine;job;start;end
CNC 1;Housing;2024-09-02 00:00;2024-09-04 00:00
CNC 2;Cover;2024-09-05 00:00;2024-09-09 00:00
Assembly;Pump 40;2024-09-10 00:00;2024-09-16 00:00
";

#[test]
fn overview_click_recenters_the_window() {
    let schedule = parse_schedule("pumps", SCHEDULE).unwrap().schedule;
    let domain = schedule.domain().unwrap();
    assert_eq!(domain.duration(), Duration::days(14));

    let overview = Surface::new(1400.0, 40.0);
    let rects = layout::project_schedule(&schedule, &domain, overview);
    assert_eq!(rects.len(), 3);
    let cover = rects[1].rect;
    assert_eq!(cover.x, 300.0);
    assert_eq!(cover.width, 400.0);

    let start = Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap();
    let viewport = Viewport::new(start, start + Duration::days(4)).unwrap();
    let mut history = History::new();

    // Click in the middle of the "Cover" job on the overview strip.
    let clicked = layout::unproject(Point::new(cover.x + cover.width / 2.0, 10.0), &domain, overview);
    assert_eq!(clicked, start + Duration::days(5));
    history.push(viewport);
    let moved = viewport.recenter(clicked, &domain);
    assert_eq!(moved.start(), start + Duration::days(3));
    assert_eq!(moved.duration(), viewport.duration());

    // A click at the far right edge pins the window to the end of the domain.
    let edge = layout::unproject(Point::new(5000.0, 0.0), &domain, overview);
    let pinned = moved.recenter(edge, &domain);
    assert_eq!(pinned.end(), domain.max());

    assert_eq!(history.undo(pinned), Some(viewport));
}

#[test]
fn tooltip_for_a_projected_job_avoids_the_sidebar() {
    let schedule = parse_schedule("pumps", SCHEDULE).unwrap().schedule;
    let domain = schedule.domain().unwrap();
    let chart = Surface::new(1000.0, 300.0);
    let chart_origin = (0.0, 80.0);

    let screen = ScreenSize {
        width: 1300.0,
        height: 500.0,
    };
    let config = PlacementConfig::default();
    let popup = PopupSize {
        width: 260.0,
        height: 90.0,
    };

    for jr in layout::project_schedule(&schedule, &domain, chart) {
        let anchor = AnchorBox {
            top: chart_origin.1 + jr.rect.y,
            left: chart_origin.0 + jr.rect.x,
            width: jr.rect.width,
            height: jr.rect.height,
        };
        let placed = place_popup(anchor, popup, screen, &config);
        let free_right = screen.width - config.zones.sidebar_width;
        if placed.side == Side::Right || placed.side == Side::Left {
            assert!(placed.left + popup.width <= free_right, "{placed:?}");
        }
        assert!(placed.top >= config.zones.header_height, "{placed:?}");
        assert!(placed.top + popup.height <= screen.height);
    }
}
