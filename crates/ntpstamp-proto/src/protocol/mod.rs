//! Types and constants for the NTP packet header.
//!
//! The [`Packet`] type mirrors the 48-byte wire record field for field. While a
//! packet is held in memory every multi-byte field is in host byte order; the
//! [`FromBytes`] and [`ToBytes`] implementations normalize to and from network
//! byte order exactly once.
//!
//! Documentation is largely derived from IETF RFC 5905.

/// NTP port number.
pub const PORT: u16 = 123;

/// Maximum stratum number. Stratum 16 marks an unsynchronized server.
pub const MAXSTRAT: u8 = 16;

/// Mode field mask (bits 0-2 of the first header byte).
pub const MODE_MASK: u8 = 0b0000_0111;

/// Version field mask, after shifting right by [`VERSION_SHIFT`].
pub const VERSION_MASK: u8 = 0b0000_0111;

/// Version field offset in the first header byte (bits 3-5).
pub const VERSION_SHIFT: u8 = 3;

/// Leap indicator mask, after shifting right by [`LEAP_SHIFT`].
pub const LEAP_MASK: u8 = 0b0000_0011;

/// Leap indicator offset in the first header byte (bits 6-7).
pub const LEAP_SHIFT: u8 = 6;

mod bytes;
mod traits;
mod types;
mod validation;

pub use self::traits::*;
pub use self::types::*;
