// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The public query entry points.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use log::debug;

use crate::config::{MAX_HOSTNAME_LEN, RequestConfig};
use crate::error::{HostnameError, NtpError, ResolutionError};
use crate::exchange::exchange;
use crate::net::{Network, Session, SystemNetwork};
use crate::timestamp::NtpTimestamp;

/// Check that `hostname` is non-empty and at most 253 bytes long.
pub fn validate_hostname(hostname: &str) -> Result<(), HostnameError> {
    if hostname.is_empty() {
        return Err(HostnameError::Empty);
    }
    if hostname.len() > MAX_HOSTNAME_LEN {
        return Err(HostnameError::TooLong {
            len: hostname.len(),
        });
    }
    Ok(())
}

/// Fetch the current time from the NTP server at `hostname`.
///
/// Uses the system network stack, NTPv4, port 123, and a 5 second timeout.
/// The result is the server's transmit timestamp, unconverted.
///
/// ```no_run
/// let ts = ntpstamp_client::get_ntp_timestamp("time.google.com")?;
/// println!("{}.{:09}", ts.to_unix_seconds(), ts.subsec_nanos());
/// # Ok::<(), ntpstamp_client::error::NtpError>(())
/// ```
pub fn get_ntp_timestamp(hostname: &str) -> Result<NtpTimestamp, NtpError> {
    get_ntp_timestamp_with(&SystemNetwork, hostname, &RequestConfig::default())
}

/// Fetch the current time from `hostname` using the given network and settings.
///
/// Failures are reported in this order: the hostname check (before any I/O),
/// starting the network session, resolution, finding an IPv4 address, opening
/// the UDP channel, then the exchange itself. The first failure wins; the
/// channel and the session are dropped before returning on every path.
pub fn get_ntp_timestamp_with<N>(
    network: &N,
    hostname: &str,
    config: &RequestConfig,
) -> Result<NtpTimestamp, NtpError>
where
    N: Network + ?Sized,
{
    validate_hostname(hostname)?;

    let session = network.start().map_err(NtpError::NetworkInit)?;

    let ip = first_ipv4(
        session
            .resolve(hostname)
            .map_err(ResolutionError::Lookup)?,
    )
    .ok_or(ResolutionError::NoIpv4Address)?;
    let server = SocketAddr::from((ip, config.port));
    debug!("querying {hostname} at {server}");

    let channel = session.open_udp_v4().map_err(NtpError::SocketCreation)?;
    exchange(&channel, server, config)
}

fn first_ipv4(addrs: Vec<IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}
