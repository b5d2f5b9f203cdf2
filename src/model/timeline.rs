use chrono::Duration;

use super::task::{Instant, TimeSpan};
use crate::error::{Error, Result};

/// Shortest viewport zooming may produce.
pub const MIN_VIEWPORT: Duration = Duration::minutes(1);

/// Padding used when a viewport has to be built over a zero-length domain.
const DEGENERATE_PAD: Duration = Duration::hours(1);

/// The full time range covered by a schedule. `min <= max` always holds;
/// `min == max` is a valid (degenerate) domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDomain {
    min: Instant,
    max: Instant,
}

impl TimeDomain {
    pub fn new(min: Instant, max: Instant) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest domain containing every span, `None` if there are none.
    pub fn covering(spans: impl IntoIterator<Item = TimeSpan>) -> Option<Self> {
        spans.into_iter().fold(None, |acc: Option<Self>, span| {
            Some(match acc {
                None => Self {
                    min: span.start(),
                    max: span.end(),
                },
                Some(d) => Self {
                    min: d.min.min(span.start()),
                    max: d.max.max(span.end()),
                },
            })
        })
    }

    pub fn min(&self) -> Instant {
        self.min
    }

    pub fn max(&self) -> Instant {
        self.max
    }

    pub fn duration(&self) -> Duration {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn clamp(&self, at: Instant) -> Instant {
        at.clamp(self.min, self.max)
    }

    /// Whether any part of `span` falls inside the domain (edges included).
    pub fn overlaps(&self, span: &TimeSpan) -> bool {
        span.start() <= self.max && span.end() >= self.min
    }
}

/// The currently visible time window. `start < end` always holds.
///
/// Only explicit navigation (recenter, pan, zoom) produces a new viewport;
/// reloading data never touches it implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    start: Instant,
    end: Instant,
}

impl Viewport {
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidViewport { start, end });
        }
        Ok(Self { start, end })
    }

    /// A viewport showing the whole domain. A zero-length domain is widened
    /// by an hour on each side so the viewport stays non-empty.
    pub fn full(domain: &TimeDomain) -> Self {
        if domain.is_degenerate() {
            Self {
                start: domain.min - DEGENERATE_PAD,
                end: domain.max + DEGENERATE_PAD,
            }
        } else {
            Self {
                start: domain.min,
                end: domain.max,
            }
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn center(&self) -> Instant {
        self.start + self.duration() / 2
    }

    /// The viewport as a projection domain for the main chart.
    pub fn as_domain(&self) -> TimeDomain {
        TimeDomain {
            min: self.start,
            max: self.end,
        }
    }

    /// Same duration, centred on `clicked`, then shifted back inside `domain`.
    pub fn recenter(&self, clicked: Instant, domain: &TimeDomain) -> Self {
        let duration = self.duration();
        Self::placed(clicked - duration / 2, duration, domain)
    }

    /// Same duration, moved by `delta`, kept inside `domain`.
    pub fn pan(&self, delta: Duration, domain: &TimeDomain) -> Self {
        Self::placed(self.start + delta, self.duration(), domain)
    }

    /// Zoom around `anchor`; `factor > 1` zooms in. The anchor keeps its
    /// relative position inside the window.
    pub fn zoom_at(&self, anchor: Instant, factor: f32, domain: &TimeDomain) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }
        let old_ms = self.duration().num_milliseconds();
        let ceiling_ms = domain
            .duration()
            .num_milliseconds()
            .max(old_ms)
            .max(MIN_VIEWPORT.num_milliseconds());
        let new_ms = ((old_ms as f64 / factor as f64).round() as i64)
            .clamp(MIN_VIEWPORT.num_milliseconds(), ceiling_ms);

        let anchor = anchor.clamp(self.start, self.end);
        let t = (anchor - self.start).num_milliseconds() as f64 / old_ms as f64;
        let offset = Duration::milliseconds((t * new_ms as f64).round() as i64);
        Self::placed(anchor - offset, Duration::milliseconds(new_ms), domain)
    }

    /// Lay out a window of `duration` starting at `start`, shifted so it does
    /// not extend past `domain`. A window at least as long as the domain is
    /// centred on it instead: duration wins over containment.
    fn placed(start: Instant, duration: Duration, domain: &TimeDomain) -> Self {
        let start = if duration >= domain.duration() {
            domain.min + domain.duration() / 2 - duration / 2
        } else if start < domain.min {
            domain.min
        } else if start + duration > domain.max {
            domain.max - duration
        } else {
            start
        };
        Self {
            start,
            end: start + duration,
        }
    }
}
