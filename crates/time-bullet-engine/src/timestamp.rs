use chrono::{DateTime, FixedOffset, Local, Utc};
use time_bullet_config::Config;

use crate::format::TimeFormat;

/// Shown in place of a timestamp when the configured format can't be used.
pub const INVALID_FORMAT_TEXT: &str = "invalid_format";

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Express `instant` in UTC or in the local offset.
pub fn zoned(instant: DateTime<Utc>, use_utc: bool) -> DateTime<FixedOffset> {
    if use_utc {
        instant.fixed_offset()
    } else {
        instant.with_timezone(&Local).fixed_offset()
    }
}

/// Format the current time according to `config`.
///
/// Never fails: a format that doesn't compile produces [`INVALID_FORMAT_TEXT`]
/// so that typing is never blocked by a bad setting.
pub fn generate_timestamp(config: &Config, clock: &impl Clock) -> String {
    format_instant(config, clock.now())
}

/// [`generate_timestamp`] for an explicit instant.
pub fn format_instant(config: &Config, instant: DateTime<Utc>) -> String {
    match TimeFormat::parse(config.effective_time_format()) {
        Ok(format) => format.render(&zoned(instant, config.use_utc)),
        Err(e) => {
            log::warn!(
                "Time format {:?} is invalid ({e}), inserting {INVALID_FORMAT_TEXT}",
                config.effective_time_format()
            );
            INVALID_FORMAT_TEXT.to_string()
        }
    }
}
