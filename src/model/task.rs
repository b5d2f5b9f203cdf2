use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A point on the schedule timeline.
pub type Instant = DateTime<Utc>;

/// Scheduled occupancy of a machine: `start <= end` always holds.
///
/// Spans are values. Rescheduling produces a new span via [`TimeSpan::shifted`]
/// instead of mutating an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    start: Instant,
    end: Instant,
}

impl TimeSpan {
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if end < start {
            return Err(Error::InvertedSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// A zero-duration span, e.g. an inspection checkpoint.
    pub fn instant(at: Instant) -> Self {
        Self { start: at, end: at }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// The same span moved by `by`.
    pub fn shifted(&self, by: chrono::Duration) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }
}

/// A single job occupying one machine for a span of time.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: Uuid,
    pub name: String,
    pub span: TimeSpan,
}

impl Job {
    pub fn new(name: impl Into<String>, span: TimeSpan) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            span,
        }
    }
}
