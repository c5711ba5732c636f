//! Wall-clock access used for JWT `iat`/`exp` claims and ID token checks.

// crates.io
use time::OffsetDateTime;

/// Source of the current time as Unix epoch seconds.
pub trait Clock: Send + Sync {
	/// Current time in whole seconds since the Unix epoch.
	fn now_epoch_seconds(&self) -> i64;
}

/// UTC system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now_epoch_seconds(&self) -> i64 {
		OffsetDateTime::now_utc().unix_timestamp()
	}
}
