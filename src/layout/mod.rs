pub mod mapper;
pub mod placement;

pub use mapper::{
    hit_test, project, project_schedule, project_viewport, unproject, x_for_instant, JobRect,
    Point, Rect, Surface,
};
pub use placement::{
    place_popup, AnchorBox, ExclusionZones, Placement, PlacementConfig, PopupSize, ScreenSize,
    Side,
};
