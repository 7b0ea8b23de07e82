// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! One request/response round trip over an already-open channel.

use std::io;
use std::net::SocketAddr;

use log::{debug, trace};

use crate::config::RequestConfig;
use crate::error::{NtpError, ParseError, ProtocolError};
use crate::net::DatagramChannel;
use crate::protocol::{ConstPackedSizeBytes, FromBytes, Packet};
use crate::timestamp::NtpTimestamp;

/// Query `server` once over `channel` and return its transmit timestamp.
///
/// Steps, each mapped to its own error kind:
///
/// 1. apply `config.timeout` to the channel ([`NtpError::TimeoutConfig`]);
/// 2. send a zeroed client request carrying `config.version`
///    ([`NtpError::Send`] on failure or a partial write; nothing is received
///    afterwards);
/// 3. receive one datagram into a 48-byte buffer ([`NtpError::Receive`],
///    including timeout expiry);
/// 4. decode and validate it ([`NtpError::InvalidResponse`]).
///
/// There is no retry, and nothing is kept between calls.
pub fn exchange<C>(
    channel: &C,
    server: SocketAddr,
    config: &RequestConfig,
) -> Result<NtpTimestamp, NtpError>
where
    C: DatagramChannel + ?Sized,
{
    channel
        .set_timeout(config.timeout)
        .map_err(NtpError::TimeoutConfig)?;

    let request = Packet::client_request(config.version);
    let wire = request.to_wire();
    let sent = channel.send_to(&wire, server).map_err(NtpError::Send)?;
    if sent != wire.len() {
        return Err(NtpError::Send(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("sent {sent} of {} request bytes", wire.len()),
        )));
    }
    debug!("sent {sent} byte NTPv{} request to {server}", config.version.value());

    let mut recv_buf = [0u8; Packet::PACKED_SIZE_BYTES];
    let received = channel.recv(&mut recv_buf).map_err(NtpError::Receive)?;
    debug!("received {received} bytes from {server}");

    if received < Packet::PACKED_SIZE_BYTES {
        return Err(ProtocolError::ResponseTooShort { received }.into());
    }
    let Some(datagram) = recv_buf.get(..received) else {
        return Err(NtpError::Receive(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "channel reported {received} bytes for a {} byte buffer",
                recv_buf.len()
            ),
        )));
    };

    let (response, _) = Packet::from_bytes(datagram).map_err(
        |ParseError::BufferTooShort { available, .. }| ProtocolError::ResponseTooShort {
            received: available,
        },
    )?;
    trace!(
        "response header: li={} vn={} mode={} stratum={} refid={:?}",
        response.leap_indicator(),
        response.version(),
        response.mode(),
        response.stratum,
        response.reference_id,
    );

    if let Err(reason) = response.validate_response() {
        debug!("rejecting response from {server}: {reason}");
        return Err(reason.into());
    }

    Ok(response.transmit_timestamp.into())
}
