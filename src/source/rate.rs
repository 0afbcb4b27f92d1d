use crate::foundation::time::MediaTime;

/// Playback-rate capability: a source played `rate` times faster than real time.
pub trait Rateable {
    /// Current rate (always > 0).
    fn rate(&self) -> f64;

    /// Duration after applying the rate: `duration / rate`.
    fn rated_duration(&self) -> MediaTime;

    /// Change the rate. Non-positive or non-finite values are ignored.
    fn set_rate(&mut self, rate: f64);
}

/// Rate value with its positivity invariant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateControl {
    rate: f64,
}

impl Default for RateControl {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}

impl RateControl {
    /// Current rate.
    pub fn rate(self) -> f64 {
        self.rate
    }

    /// Apply `rate` if valid; returns whether it was accepted.
    pub fn set(&mut self, rate: f64) -> bool {
        if !(rate.is_finite() && rate > 0.0) {
            tracing::warn!(rate, "ignoring non-positive playback rate");
            return false;
        }
        self.rate = rate;
        true
    }

    /// `duration` played at this rate.
    pub fn rated(self, duration: MediaTime) -> MediaTime {
        duration.mul_f64(1.0 / self.rate)
    }
}
