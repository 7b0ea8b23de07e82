// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for the NTP client.
//!
//! Every failure is an [`NtpError`], and every `NtpError` belongs to exactly one
//! [`ErrorKind`]. The kind is the closed, stable classification callers branch
//! on; the variant payload (an [`io::Error`], a hostname or resolution problem,
//! or a protocol rejection) is there for diagnostics.
//!
//! `NtpError` converts into [`io::Error`] and can be recovered with a downcast:
//!
//! ```no_run
//! use ntpstamp_client::error::{ErrorKind, NtpError};
//!
//! fn query() -> std::io::Result<u32> {
//!     Ok(ntpstamp_client::get_ntp_timestamp("time.google.com")?.seconds)
//! }
//!
//! if let Err(e) = query() {
//!     if let Some(ntp_err) = e.get_ref().and_then(|inner| inner.downcast_ref::<NtpError>()) {
//!         if ntp_err.kind() == ErrorKind::ReceiveFailed {
//!             eprintln!("no answer: {ntp_err}");
//!         }
//!     }
//! }
//! ```

pub use ntpstamp_proto::error::{ParseError, ValidationError};

use std::fmt;
use std::io;

/// The closed set of failure classes, with stable numeric codes.
///
/// Code 0 is reserved for success and has no variant.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    /// The network subsystem could not be started.
    NetworkInitFailed = 1,
    /// The hostname is empty or longer than 253 bytes.
    InvalidHostname = 2,
    /// Name lookup failed or produced no IPv4 address.
    HostResolutionFailed = 3,
    /// The UDP channel could not be opened.
    SocketCreationFailed = 4,
    /// The send/receive timeout could not be applied.
    TimeoutConfigFailed = 5,
    /// The request could not be sent in full.
    SendFailed = 6,
    /// No reply was received, including timeout expiry.
    ReceiveFailed = 7,
    /// The reply was too short or failed validation.
    InvalidResponse = 8,
}

impl ErrorKind {
    /// Every kind, in code order.
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::NetworkInitFailed,
        ErrorKind::InvalidHostname,
        ErrorKind::HostResolutionFailed,
        ErrorKind::SocketCreationFailed,
        ErrorKind::TimeoutConfigFailed,
        ErrorKind::SendFailed,
        ErrorKind::ReceiveFailed,
        ErrorKind::InvalidResponse,
    ];

    /// The stable numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a kind by code. Returns `None` for 0 (success) and unknown codes.
    pub fn from_code(code: u8) -> Option<ErrorKind> {
        match code {
            1 => Some(ErrorKind::NetworkInitFailed),
            2 => Some(ErrorKind::InvalidHostname),
            3 => Some(ErrorKind::HostResolutionFailed),
            4 => Some(ErrorKind::SocketCreationFailed),
            5 => Some(ErrorKind::TimeoutConfigFailed),
            6 => Some(ErrorKind::SendFailed),
            7 => Some(ErrorKind::ReceiveFailed),
            8 => Some(ErrorKind::InvalidResponse),
            _ => None,
        }
    }
}

impl TryFrom<u8> for ErrorKind {
    type Error = u8;

    /// Fails with the rejected code.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ErrorKind::from_code(code).ok_or(code)
    }
}

impl From<ErrorKind> for u8 {
    fn from(kind: ErrorKind) -> u8 {
        kind.code()
    }
}

/// Errors that can occur while querying an NTP server.
#[derive(Debug)]
pub enum NtpError {
    /// The network session could not be started.
    NetworkInit(io::Error),
    /// The hostname was rejected before any I/O.
    InvalidHostname(HostnameError),
    /// The hostname could not be turned into an IPv4 address.
    HostResolution(ResolutionError),
    /// The UDP channel could not be opened.
    SocketCreation(io::Error),
    /// The channel refused the configured timeout.
    TimeoutConfig(io::Error),
    /// The request failed to send or was only partly written.
    Send(io::Error),
    /// Receiving the reply failed or timed out.
    Receive(io::Error),
    /// The reply arrived but is not an acceptable server response.
    InvalidResponse(ProtocolError),
}

/// Reasons a hostname is rejected up front.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostnameError {
    /// The hostname is the empty string.
    Empty,
    /// The hostname exceeds the DNS limit of 253 bytes.
    TooLong {
        /// Length of the rejected hostname, in bytes.
        len: usize,
    },
}

/// Reasons name resolution produced no usable address.
#[derive(Debug)]
pub enum ResolutionError {
    /// The resolver itself failed.
    Lookup(io::Error),
    /// The lookup succeeded but returned no IPv4 address.
    NoIpv4Address,
}

/// Problems with the reply datagram itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// Fewer than 48 bytes were received.
    ResponseTooShort {
        /// Number of bytes received.
        received: usize,
    },
    /// The header parsed but failed validation.
    Rejected(ValidationError),
}

impl NtpError {
    /// The closed classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NtpError::NetworkInit(_) => ErrorKind::NetworkInitFailed,
            NtpError::InvalidHostname(_) => ErrorKind::InvalidHostname,
            NtpError::HostResolution(_) => ErrorKind::HostResolutionFailed,
            NtpError::SocketCreation(_) => ErrorKind::SocketCreationFailed,
            NtpError::TimeoutConfig(_) => ErrorKind::TimeoutConfigFailed,
            NtpError::Send(_) => ErrorKind::SendFailed,
            NtpError::Receive(_) => ErrorKind::ReceiveFailed,
            NtpError::InvalidResponse(_) => ErrorKind::InvalidResponse,
        }
    }

    /// The platform error code behind this failure, if there is one.
    ///
    /// Useful for diagnostics only; branch on [`kind`](NtpError::kind) instead.
    pub fn os_code(&self) -> Option<i32> {
        self.io_error().and_then(io::Error::raw_os_error)
    }

    fn io_error(&self) -> Option<&io::Error> {
        match self {
            NtpError::NetworkInit(e)
            | NtpError::SocketCreation(e)
            | NtpError::TimeoutConfig(e)
            | NtpError::Send(e)
            | NtpError::Receive(e)
            | NtpError::HostResolution(ResolutionError::Lookup(e)) => Some(e),
            _ => None,
        }
    }
}

// ── Display implementations ─────────────────────────────────────────

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::NetworkInitFailed => "network initialization failed",
            ErrorKind::InvalidHostname => "invalid hostname",
            ErrorKind::HostResolutionFailed => "host resolution failed",
            ErrorKind::SocketCreationFailed => "socket creation failed",
            ErrorKind::TimeoutConfigFailed => "timeout configuration failed",
            ErrorKind::SendFailed => "send failed",
            ErrorKind::ReceiveFailed => "receive failed",
            ErrorKind::InvalidResponse => "invalid response",
        };
        f.write_str(text)
    }
}

impl fmt::Display for NtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NtpError::NetworkInit(e)
            | NtpError::SocketCreation(e)
            | NtpError::TimeoutConfig(e)
            | NtpError::Send(e)
            | NtpError::Receive(e) => write!(f, "{}: {e}", self.kind()),
            NtpError::InvalidHostname(e) => write!(f, "{}: {e}", self.kind()),
            NtpError::HostResolution(e) => write!(f, "{}: {e}", self.kind()),
            NtpError::InvalidResponse(e) => write!(f, "{}: {e}", self.kind()),
        }
    }
}

impl fmt::Display for HostnameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostnameError::Empty => write!(f, "hostname is empty"),
            HostnameError::TooLong { len } => {
                write!(f, "hostname is {len} bytes long (limit 253)")
            }
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::Lookup(e) => write!(f, "{e}"),
            ResolutionError::NoIpv4Address => write!(f, "no IPv4 address found"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ResponseTooShort { received } => {
                write!(f, "NTP response too short ({received} bytes)")
            }
            ProtocolError::Rejected(e) => write!(f, "{e}"),
        }
    }
}

// ── Error trait implementations ─────────────────────────────────────

impl std::error::Error for NtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NtpError::InvalidHostname(e) => Some(e),
            NtpError::HostResolution(e) => Some(e),
            NtpError::InvalidResponse(e) => Some(e),
            _ => self
                .io_error()
                .map(|e| e as &(dyn std::error::Error + 'static)),
        }
    }
}

impl std::error::Error for HostnameError {}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolutionError::Lookup(e) => Some(e),
            ResolutionError::NoIpv4Address => None,
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Rejected(e) => Some(e),
            ProtocolError::ResponseTooShort { .. } => None,
        }
    }
}

// ── From conversions ────────────────────────────────────────────────

impl From<NtpError> for io::Error {
    fn from(err: NtpError) -> io::Error {
        let kind = match &err {
            NtpError::InvalidHostname(_) => io::ErrorKind::InvalidInput,
            NtpError::HostResolution(ResolutionError::NoIpv4Address) => io::ErrorKind::NotFound,
            NtpError::InvalidResponse(_) => io::ErrorKind::InvalidData,
            other => other
                .io_error()
                .map_or(io::ErrorKind::Other, io::Error::kind),
        };
        io::Error::new(kind, err)
    }
}

impl From<HostnameError> for NtpError {
    fn from(err: HostnameError) -> NtpError {
        NtpError::InvalidHostname(err)
    }
}

impl From<ResolutionError> for NtpError {
    fn from(err: ResolutionError) -> NtpError {
        NtpError::HostResolution(err)
    }
}

impl From<ProtocolError> for NtpError {
    fn from(err: ProtocolError) -> NtpError {
        NtpError::InvalidResponse(err)
    }
}

impl From<ValidationError> for NtpError {
    fn from(err: ValidationError) -> NtpError {
        NtpError::InvalidResponse(ProtocolError::Rejected(err))
    }
}

// ── Tests ───────────────────────────────────────────────────────────
