use crate::protocol::TimestampFormat;
use crate::unix_time::{self, Instant};

/// The server's transmit timestamp, exactly as it appeared on the wire.
///
/// `seconds` counts from 1900-01-01 00:00:00 UTC and `fraction` is in units of
/// 2^-32 s. No epoch or era conversion is applied; see
/// [`to_unix_seconds`](NtpTimestamp::to_unix_seconds) and the
/// [`unix_time`](crate::unix_time) helpers for that.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NtpTimestamp {
    /// Seconds since 1900 (wraps every ~136 years).
    pub seconds: u32,
    /// Fractional second in units of 2^-32 s.
    pub fraction: u32,
}

impl NtpTimestamp {
    /// Resolve the era against `pivot` and express the result as Unix time.
    pub fn to_instant(&self, pivot: &Instant) -> Instant {
        unix_time::timestamp_to_instant((*self).into(), pivot)
    }

    /// Whole seconds since the Unix epoch, resolving the era against the current clock.
    pub fn to_unix_seconds(&self) -> i64 {
        self.to_instant(&Instant::now()).secs()
    }

    /// The fractional second in nanoseconds (truncated).
    pub fn subsec_nanos(&self) -> u32 {
        unix_time::fraction_to_nanos(self.fraction)
    }
}

impl From<TimestampFormat> for NtpTimestamp {
    fn from(ts: TimestampFormat) -> Self {
        NtpTimestamp {
            seconds: ts.seconds,
            fraction: ts.fraction,
        }
    }
}

impl From<NtpTimestamp> for TimestampFormat {
    fn from(ts: NtpTimestamp) -> Self {
        TimestampFormat {
            seconds: ts.seconds,
            fraction: ts.fraction,
        }
    }
}

impl From<NtpTimestamp> for Instant {
    fn from(ts: NtpTimestamp) -> Self {
        ts.to_instant(&Instant::now())
    }
}
