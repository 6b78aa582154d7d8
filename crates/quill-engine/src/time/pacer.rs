use std::time::{Duration, Instant};

use log::warn;

/// Default frame rate when none (or an invalid one) is configured.
pub const DEFAULT_TICK_RATE: f64 = 60.0;

/// Holds the frame loop to a fixed tick rate.
///
/// The runtime sleeps until [`deadline`](Self::deadline) instead of spinning.
/// When a frame overruns, the schedule restarts from the late frame rather
/// than bursting to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(tick_rate: f64) -> Self {
        let rate = if tick_rate.is_finite() && tick_rate > 0.0 {
            tick_rate
        } else {
            warn!("time: invalid tick rate {tick_rate}; using {DEFAULT_TICK_RATE}");
            DEFAULT_TICK_RATE
        };
        Self {
            period: Duration::from_secs_f64(1.0 / rate),
            next: None,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a frame may start at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_none_or(|next| now >= next)
    }

    /// When the next frame may start; `now` if one is already due.
    pub fn deadline(&self, now: Instant) -> Instant {
        self.next.map_or(now, |next| next.max(now))
    }

    /// Records that a frame started at `now` and schedules the next one.
    pub fn frame_started(&mut self, now: Instant) {
        let scheduled = self.next.map_or(now, |next| next + self.period);
        let next = match self.next {
            Some(_) if scheduled > now => scheduled,
            _ => now + self.period,
        };
        self.next = Some(next);
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}
