//! Timeline geometry and schedule model for the shopfloor Gantt viewer.
//!
//! The [`layout`] module holds the two pure geometry utilities the viewer is
//! built around: projecting job spans onto a drawing surface (and back), and
//! placing anchored popups so they avoid the header and sidebar bands.

pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod prefs;

pub use error::{Error, Result};
