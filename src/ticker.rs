//! Timestamp-driven periodic ticker
//!
//! Drives cadences (sonar `Data` throttle, ranging settle delay) from caller-supplied
//! monotonic millisecond timestamps instead of a timer, so a stopped sensor simply
//! stops ticking.

/// Periodic ticker over a monotonic millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ticker {
    period_ms: u64,
    expires_at_ms: u64,
}

impl Ticker {
    /// Ticker firing every `period_ms`, first at `now_ms + period_ms`
    #[must_use]
    pub const fn every(now_ms: u64, period_ms: u64) -> Self {
        Self {
            period_ms,
            expires_at_ms: now_ms.saturating_add(period_ms),
        }
    }

    /// Period in milliseconds
    #[must_use]
    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Timestamp of the next tick
    #[must_use]
    pub const fn expires_at_ms(&self) -> u64 {
        self.expires_at_ms
    }

    /// Restart the period from `now_ms`
    pub fn reset(&mut self, now_ms: u64) {
        self.expires_at_ms = now_ms.saturating_add(self.period_ms);
    }

    /// Returns `true` once per elapsed period
    ///
    /// A late poll fires once and schedules the next tick a full period after
    /// `now_ms`; missed ticks are not replayed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.expires_at_ms {
            return false;
        }
        if now_ms > self.expires_at_ms {
            self.expires_at_ms = now_ms.saturating_add(self.period_ms);
        } else {
            self.expires_at_ms = self.expires_at_ms.saturating_add(self.period_ms);
        }
        true
    }
}
