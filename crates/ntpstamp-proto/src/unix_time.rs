use crate::protocol::TimestampFormat;
#[cfg(feature = "std")]
use std::time;

/// Seconds from 1900-01-01 00:00:00 UTC (the NTP prime epoch) to the Unix epoch.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

/// Seconds in one NTP era (2^32 s, roughly 136 years).
///
/// Era 0 ends at 2036-02-07 06:28:15 UTC.
pub const ERA_SECONDS: i64 = 1 << 32;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Largest magnitude of [`Instant::secs`] that [`Instant::new`] accepts.
///
/// Leaves headroom for the epoch shift and era arithmetic in the conversions.
pub const MAX_INSTANT_SECS: i64 = i64::MAX / 4;

/// A moment relative to the Unix epoch, in whole seconds plus nanoseconds.
///
/// Before the epoch both components are negative (or zero). Use [`Instant::new`] to
/// build one from parts; it refuses inconsistent signs instead of panicking.
///
/// For calendar display, hand the parts to a date library such as `chrono`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Instant {
    secs: i64,
    subsec_nanos: i32,
}

impl Instant {
    /// Build an instant from its parts.
    ///
    /// Returns `None` if `secs` and `subsec_nanos` have opposite signs, if
    /// `subsec_nanos` is not within one second, or if `secs` is beyond
    /// [`MAX_INSTANT_SECS`] in either direction.
    pub fn new(secs: i64, subsec_nanos: i32) -> Option<Instant> {
        if secs.unsigned_abs() > MAX_INSTANT_SECS as u64 {
            return None;
        }
        if subsec_nanos.unsigned_abs() as u64 >= NANOS_PER_SEC {
            return None;
        }
        if (secs > 0 && subsec_nanos < 0) || (secs < 0 && subsec_nanos > 0) {
            return None;
        }
        Some(Instant { secs, subsec_nanos })
    }

    /// The current system time.
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(after) => Instant {
                secs: after.as_secs() as i64,
                subsec_nanos: after.subsec_nanos() as i32,
            },
            Err(err) => {
                let before = err.duration();
                Instant {
                    secs: -(before.as_secs() as i64),
                    subsec_nanos: -(before.subsec_nanos() as i32),
                }
            }
        }
    }

    /// Whole seconds since the Unix epoch.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// Sub-second part in nanoseconds, carrying the same sign as [`secs`](Instant::secs).
    pub fn subsec_nanos(&self) -> i32 {
        self.subsec_nanos
    }
}

/// Convert a 2^-32 s fraction to nanoseconds, truncating.
pub fn fraction_to_nanos(fraction: u32) -> u32 {
    ((fraction as u64 * NANOS_PER_SEC) >> 32) as u32
}

/// Convert nanoseconds (below one second) to a 2^-32 s fraction, truncating.
pub fn nanos_to_fraction(nanos: u32) -> u32 {
    (((nanos as u64) << 32) / NANOS_PER_SEC) as u32
}

// Pick the era that puts `raw_seconds` within half an era of the pivot.
fn era_aware_ntp_seconds(raw_seconds: u32, pivot: &Instant) -> i64 {
    let pivot_ntp = pivot.secs + EPOCH_DELTA;
    let candidate = pivot_ntp.div_euclid(ERA_SECONDS) * ERA_SECONDS + raw_seconds as i64;

    let diff = candidate - pivot_ntp;
    if diff > ERA_SECONDS / 2 {
        candidate - ERA_SECONDS
    } else if diff < -(ERA_SECONDS / 2) {
        candidate + ERA_SECONDS
    } else {
        candidate
    }
}

/// Convert a wire timestamp to an [`Instant`], resolving the era against `pivot`.
///
/// The 32-bit seconds field wraps every ~136 years. The result is the candidate
/// closest to `pivot`, so it is correct as long as the timestamp lies within ~68
/// years of it. Live callers pass [`Instant::now`].
pub fn timestamp_to_instant(ts: TimestampFormat, pivot: &Instant) -> Instant {
    let secs = era_aware_ntp_seconds(ts.seconds, pivot) - EPOCH_DELTA;
    let nanos = fraction_to_nanos(ts.fraction) as i64;
    // Keep both components on the same side of the epoch.
    let (secs, nanos) = if secs < 0 && nanos > 0 {
        (secs + 1, nanos - NANOS_PER_SEC as i64)
    } else {
        (secs, nanos)
    };
    Instant {
        secs,
        subsec_nanos: nanos as i32,
    }
}

#[cfg(feature = "std")]
impl From<TimestampFormat> for Instant {
    /// Era resolution uses the current system time as the pivot.
    fn from(ts: TimestampFormat) -> Self {
        timestamp_to_instant(ts, &Instant::now())
    }
}

impl From<Instant> for TimestampFormat {
    /// Truncates to the 32-bit era offset. The receiver infers the era.
    fn from(t: Instant) -> Self {
        let mut ntp_secs = t.secs + EPOCH_DELTA;
        let mut nanos = t.subsec_nanos as i64;
        if nanos < 0 {
            ntp_secs -= 1;
            nanos += NANOS_PER_SEC as i64;
        }
        TimestampFormat {
            seconds: ntp_secs.rem_euclid(ERA_SECONDS) as u32,
            fraction: nanos_to_fraction(nanos as u32),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn instant(secs: i64, nanos: i32) -> Instant {
        Instant::new(secs, nanos).unwrap()
    }

    #[test]
    fn new_rejects_mixed_signs() {
        assert!(Instant::new(5, -1).is_none());
        assert!(Instant::new(-5, 1).is_none());
        assert!(Instant::new(0, -1).is_some());
        assert!(Instant::new(1, 1_000_000_000).is_none());
    }

    #[test]
    fn new_rejects_out_of_range_seconds() {
        assert!(Instant::new(i64::MAX, 0).is_none());
        assert!(Instant::new(i64::MIN, 0).is_none());
        assert!(Instant::new(MAX_INSTANT_SECS, 0).is_some());
        assert!(Instant::new(-MAX_INSTANT_SECS, 0).is_some());
    }

    #[test]
    fn extreme_pivots_convert_without_overflow() {
        let ts = TimestampFormat {
            seconds: u32::MAX,
            fraction: u32::MAX,
        };
        let pivots = [
            instant(MAX_INSTANT_SECS, 500_000_000),
            instant(-MAX_INSTANT_SECS, -500_000_000),
        ];
        for pivot in pivots {
            let resolved = timestamp_to_instant(ts, &pivot);
            assert!((resolved.secs() - pivot.secs()).abs() <= ERA_SECONDS / 2 + 1);
            let back: TimestampFormat = pivot.into();
            assert_eq!(timestamp_to_instant(back, &pivot), pivot);
        }
    }

    #[test]
    fn known_timestamp_in_era0() {
        // 2024-05-06 12:39:41 UTC
        let ts = TimestampFormat {
            seconds: 3_923_987_981,
            fraction: 0,
        };
        let result = timestamp_to_instant(ts, &instant(1_700_000_000, 0));
        assert_eq!(result.secs(), 3_923_987_981 - EPOCH_DELTA);
        assert_eq!(result.subsec_nanos(), 0);
    }

    #[test]
    fn half_second_fraction() {
        let ts = TimestampFormat {
            seconds: 3_913_056_000,
            fraction: 0x8000_0000,
        };
        let result = timestamp_to_instant(ts, &instant(1_704_067_200, 0));
        assert_eq!(result.secs(), 1_704_067_200);
        assert_eq!(result.subsec_nanos(), 500_000_000);
    }

    #[test]
    fn era1_with_era1_pivot() {
        let ts = TimestampFormat {
            seconds: 100_000_000,
            fraction: 0,
        };
        let result = timestamp_to_instant(ts, &instant(2_185_978_496, 0));
        assert_eq!(result.secs(), 2_185_978_496);
    }

    #[test]
    fn pivot_before_rollover_resolves_forward() {
        let ts = TimestampFormat {
            seconds: 1000,
            fraction: 0,
        };
        let result = timestamp_to_instant(ts, &instant(2_082_758_400, 0));
        assert_eq!(result.secs(), ERA_SECONDS + 1000 - EPOCH_DELTA);
    }

    #[test]
    fn pivot_after_rollover_resolves_back() {
        let ts = TimestampFormat {
            seconds: u32::MAX,
            fraction: 0,
        };
        let result = timestamp_to_instant(ts, &instant(2_087_942_400, 0));
        assert_eq!(result.secs(), u32::MAX as i64 - EPOCH_DELTA);
    }

    #[test]
    fn instant_to_timestamp_and_back() {
        let original = instant(1_704_067_200, 250_000_000);
        let ts: TimestampFormat = original.into();
        assert_eq!(ts.seconds, 3_913_056_000);
        assert_eq!(ts.fraction, 0x4000_0000);
        let restored = timestamp_to_instant(ts, &original);
        assert_eq!(restored, original);
    }

    #[test]
    fn pre_epoch_instant_keeps_signs_consistent() {
        let original = instant(-10, -250_000_000);
        let ts: TimestampFormat = original.into();
        assert_eq!(ts.seconds as i64, EPOCH_DELTA - 11);
        let restored = timestamp_to_instant(ts, &instant(0, 0));
        assert_eq!(restored.secs(), -10);
        assert_eq!(restored.subsec_nanos(), -250_000_000);
    }

    #[test]
    fn fraction_conversions() {
        assert_eq!(fraction_to_nanos(0), 0);
        assert_eq!(fraction_to_nanos(u32::MAX), 999_999_999);
        assert_eq!(nanos_to_fraction(500_000_000), 0x8000_0000);
        assert_eq!(fraction_to_nanos(nanos_to_fraction(123_456_789)), 123_456_788);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(Instant::now().secs() > 1_577_836_800);
    }
}
