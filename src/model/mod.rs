pub mod history;
pub mod project;
pub mod task;
pub mod timeline;

pub use history::History;
pub use project::{Lane, Schedule};
pub use task::{Instant, Job, TimeSpan};
pub use timeline::{TimeDomain, Viewport};
