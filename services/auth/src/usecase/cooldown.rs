//! Per-destination OTP issuance cooldown.
//!
//! Advisory only: the read-compare-write sequence around it is not atomic, so
//! two near-simultaneous sends can both pass. Both codes are then valid and
//! one successful verification burns them all, which keeps the race benign.

use chrono::{DateTime, Duration, Utc};

/// Minimum interval between OTP sends to one destination. Each flow carries
/// its own window (admin registration differs from the login flows), so this
/// is constructed from config rather than a shared constant.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    window: Duration,
}

impl Cooldown {
    pub fn from_secs(secs: i64) -> Self {
        Self {
            window: Duration::seconds(secs),
        }
    }

    /// Decide whether a new code may be issued given the newest code's
    /// creation time. `Err` carries whole seconds until the caller may retry,
    /// rounded up so "retry after 0s" can never accompany a rejection.
    pub fn check(
        &self,
        last_created_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<(), u64> {
        let Some(last) = last_created_at else {
            return Ok(());
        };
        let age = now - last;
        if age >= self.window {
            return Ok(());
        }
        let remaining_ms = (self.window - age).num_milliseconds().max(0) as u64;
        Err(remaining_ms.div_ceil(1000))
    }
}
