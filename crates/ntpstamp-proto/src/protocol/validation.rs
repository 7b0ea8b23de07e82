use crate::error::ValidationError;

use super::{LeapIndicator, MAXSTRAT, Mode, Packet};

impl Packet {
    /// Check whether a received, already-normalized packet is a trustworthy server reply.
    ///
    /// The checks run in order and the first failure is returned:
    ///
    /// 1. mode must be server (4);
    /// 2. the leap indicator must not signal an alarm (3);
    /// 3. stratum must lie in `1..=15` (stratum 0 is reported as a kiss code);
    /// 4. the transmit timestamp must not be zero.
    pub fn validate_response(&self) -> Result<(), ValidationError> {
        let mode = self.mode();
        if mode != Mode::Server as u8 {
            return Err(ValidationError::UnexpectedMode { mode });
        }

        if self.leap_indicator() == LeapIndicator::Alarm as u8 {
            return Err(ValidationError::Unsynchronized);
        }

        if let Some(code) = self.kiss_code() {
            return Err(ValidationError::KissOfDeath { code });
        }
        if self.stratum >= MAXSTRAT {
            return Err(ValidationError::InvalidStratum {
                stratum: self.stratum,
            });
        }

        if self.transmit_timestamp.is_zero() {
            return Err(ValidationError::ZeroTransmitTimestamp);
        }

        Ok(())
    }

    /// Whether [`validate_response`](Packet::validate_response) accepts this packet.
    pub fn is_valid_response(&self) -> bool {
        self.validate_response().is_ok()
    }
}
