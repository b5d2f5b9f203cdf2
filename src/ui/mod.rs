pub mod details;
pub mod minimap;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
pub mod tooltip;
