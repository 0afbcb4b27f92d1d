use std::cmp::Ordering;

/// Timescale used when a duration is synthesized rather than read from media.
pub const DEFAULT_TIMESCALE: i32 = 600;

/// Rational media timestamp: `value / timescale` seconds.
///
/// Equality and ordering compare the rational value, so `1/2` and `300/600` are equal.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct MediaTime {
    /// Tick count.
    pub value: i64,
    /// Ticks per second (must be > 0 for a valid time).
    pub timescale: i32,
}

impl MediaTime {
    /// Zero seconds.
    pub const ZERO: Self = Self {
        value: 0,
        timescale: DEFAULT_TIMESCALE,
    };

    /// Build a time from raw ticks.
    pub fn new(value: i64, timescale: i32) -> Self {
        Self { value, timescale }
    }

    /// Build a time from seconds, rounded to the nearest tick of `timescale`.
    pub fn from_seconds(secs: f64, timescale: i32) -> Self {
        let timescale = timescale.max(1);
        Self {
            value: (secs * f64::from(timescale)).round() as i64,
            timescale,
        }
    }

    /// Whether the timescale is usable.
    pub fn is_valid(self) -> bool {
        self.timescale > 0
    }

    /// Time in seconds (`0.0` for invalid times).
    pub fn seconds(self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        self.value as f64 / f64::from(self.timescale)
    }

    /// Multiply by a real factor, keeping the timescale and rounding to the nearest tick.
    pub fn mul_f64(self, multiplier: f64) -> Self {
        Self {
            value: (self.value as f64 * multiplier).round() as i64,
            timescale: self.timescale,
        }
    }

    /// Smaller of two times.
    pub fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    fn cross(self, other: Self) -> (i128, i128) {
        (
            i128::from(self.value) * i128::from(other.timescale),
            i128::from(other.value) * i128::from(self.timescale),
        )
    }
}

impl Default for MediaTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for MediaTime {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.cross(*other);
        a == b
    }
}

impl Eq for MediaTime {}

impl PartialOrd for MediaTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MediaTime {
    fn cmp(&self, other: &Self) -> Ordering {
        // Timescales are positive for valid times, so cross-multiplication keeps the order.
        let (a, b) = self.cross(*other);
        a.cmp(&b)
    }
}

/// Half-open range `[start, start + duration)` on a source's timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// First included instant.
    pub start: MediaTime,
    /// Length of the range.
    pub duration: MediaTime,
}

impl TimeRange {
    /// Build a range from its start and length.
    pub fn new(start: MediaTime, duration: MediaTime) -> Self {
        Self { start, duration }
    }

    /// Range starting at zero.
    pub fn from_zero(duration: MediaTime) -> Self {
        Self {
            start: MediaTime::new(0, duration.timescale),
            duration,
        }
    }

    /// Exclusive end, expressed in the duration's timescale.
    pub fn end(self) -> MediaTime {
        let start = rescale(self.start, self.duration.timescale);
        MediaTime::new(start.value + self.duration.value, self.duration.timescale)
    }

    /// Whether `t` falls inside the range.
    pub fn contains(self, t: MediaTime) -> bool {
        self.start <= t && t < self.end()
    }

    /// Trim the range so it ends no later than `limit`.
    pub fn clamp_to(self, limit: MediaTime) -> Self {
        if self.end() <= limit {
            return self;
        }
        if self.start >= limit {
            return Self::new(limit, MediaTime::new(0, limit.timescale));
        }
        let start = rescale(self.start, limit.timescale);
        Self::new(
            self.start,
            MediaTime::new(limit.value - start.value, limit.timescale),
        )
    }
}

fn rescale(t: MediaTime, timescale: i32) -> MediaTime {
    if t.timescale == timescale || !t.is_valid() {
        return MediaTime::new(t.value, timescale);
    }
    MediaTime::from_seconds(t.seconds(), timescale)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
