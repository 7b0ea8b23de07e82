// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Per-query settings.

use std::time::Duration;

use crate::protocol::{self, Version};

/// Well-known NTP server port.
pub const NTP_PORT: u16 = protocol::PORT;

/// How long a single send or receive may block.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest hostname accepted, in bytes (the DNS presentation-format limit).
pub const MAX_HOSTNAME_LEN: usize = 253;

/// Settings for one NTP query.
///
/// ```
/// use std::time::Duration;
/// use ntpstamp_client::RequestConfig;
/// use ntpstamp_client::protocol::Version;
///
/// let config = RequestConfig {
///     version: Version::V3,
///     timeout: Duration::from_secs(2),
///     ..RequestConfig::default()
/// };
/// assert_eq!(config.port, 123);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RequestConfig {
    /// Version number written into the request header.
    pub version: Version,
    /// Timeout applied to both the send and the receive.
    pub timeout: Duration,
    /// Destination UDP port.
    pub port: u16,
}

impl Default for RequestConfig {
    fn default() -> Self {
        RequestConfig {
            version: Version::V4,
            timeout: DEFAULT_TIMEOUT,
            port: NTP_PORT,
        }
    }
}
