// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for buffer-based NTP packet parsing and response validation.
//!
//! Both types are `no_std`-compatible and allocate nothing. When the `std`
//! feature is enabled they implement [`std::error::Error`], and [`ParseError`]
//! converts to [`std::io::Error`].

use core::fmt;

/// Errors that can occur during buffer-based NTP packet parsing or serialization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
}

/// Reasons a decoded server response is not trusted.
///
/// Produced by [`Packet::validate_response`](crate::protocol::Packet::validate_response).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValidationError {
    /// The packet mode is not server (4).
    UnexpectedMode {
        /// The mode carried by the packet.
        mode: u8,
    },
    /// The leap indicator signals an alarm: the server clock is unsynchronized.
    Unsynchronized,
    /// Stratum 0: unspecified, or a Kiss-o'-Death packet.
    KissOfDeath {
        /// The four-character kiss code from the reference identifier.
        code: [u8; 4],
    },
    /// Stratum is 16 (unsynchronized) or in the reserved range.
    InvalidStratum {
        /// The stratum carried by the packet.
        stratum: u8,
    },
    /// The transmit timestamp is zero.
    ZeroTransmitTimestamp,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnexpectedMode { mode } => {
                write!(f, "unexpected response mode {mode} (expected server)")
            }
            ValidationError::Unsynchronized => {
                write!(f, "server reports unsynchronized clock")
            }
            ValidationError::KissOfDeath { code } => {
                write!(f, "server sent stratum 0 (kiss code ")?;
                for &b in code {
                    if b == 0 {
                        break;
                    }
                    if b.is_ascii_graphic() {
                        write!(f, "{}", b as char)?;
                    } else {
                        write!(f, "?")?;
                    }
                }
                write!(f, ")")
            }
            ValidationError::InvalidStratum { stratum } => {
                write!(f, "server stratum {stratum} is out of range")
            }
            ValidationError::ZeroTransmitTimestamp => {
                write!(f, "server transmit timestamp is zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<ParseError> for std::io::Error {
    fn from(err: ParseError) -> std::io::Error {
        let kind = match &err {
            ParseError::BufferTooShort { .. } => std::io::ErrorKind::UnexpectedEof,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}
