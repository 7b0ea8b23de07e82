// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for integration tests.

// Integration test helpers are `pub` so each `tests/*.rs` file can import them
// via `mod common`, but not every file uses every helper.
#![allow(dead_code, unreachable_pub)]

use std::cell::RefCell;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::rc::Rc;
use std::time::Duration;

use ntpstamp_client::net::{DatagramChannel, Network, Session};
use ntpstamp_client::protocol::{Packet, TimestampFormat, Version};

/// Transmit seconds used by [`valid_reply`].
pub const REPLY_SECONDS: u32 = 3_923_987_981;

/// Address the scripted resolver returns by default.
pub const SERVER_IP: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 123);

/// Something the client did to the scripted environment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Start,
    Resolve(String),
    OpenUdp,
    SetTimeout(Duration),
    Send { to: SocketAddr, bytes: Vec<u8> },
    Recv,
    ChannelDropped,
    SessionDropped,
}

#[derive(Clone, Debug)]
pub enum SendBehavior {
    /// Report the whole buffer as written.
    Full,
    /// Report only this many bytes as written.
    Short(usize),
    Fail(io::ErrorKind),
}

#[derive(Clone, Debug)]
pub enum RecvBehavior {
    /// Deliver these bytes, truncated to the caller's buffer.
    Reply(Vec<u8>),
    /// Fill the buffer with a valid reply but report this many bytes.
    Overreport(usize),
    Fail(io::ErrorKind),
}

/// What each capability does when the client calls it.
#[derive(Clone, Debug)]
pub struct Script {
    pub start_error: Option<io::ErrorKind>,
    pub resolve: Result<Vec<IpAddr>, io::ErrorKind>,
    pub open_error: Option<io::ErrorKind>,
    pub timeout_error: Option<io::ErrorKind>,
    pub send: SendBehavior,
    pub recv: RecvBehavior,
}

impl Default for Script {
    /// Every step succeeds and the server answers with [`valid_reply`].
    fn default() -> Self {
        Script {
            start_error: None,
            resolve: Ok(vec![IpAddr::V4(SERVER_IP)]),
            open_error: None,
            timeout_error: None,
            send: SendBehavior::Full,
            recv: RecvBehavior::Reply(valid_reply().to_wire().to_vec()),
        }
    }
}

impl Script {
    pub fn replying_with(packet: Packet) -> Self {
        Script {
            recv: RecvBehavior::Reply(packet.to_wire().to_vec()),
            ..Script::default()
        }
    }
}

type EventLog = Rc<RefCell<Vec<Event>>>;

/// A [`Network`] that follows a [`Script`] and records every call.
pub struct ScriptedNetwork {
    script: Rc<Script>,
    events: EventLog,
}

pub struct ScriptedSession {
    script: Rc<Script>,
    events: EventLog,
}

pub struct ScriptedChannel {
    script: Rc<Script>,
    events: EventLog,
}

impl ScriptedNetwork {
    pub fn new(script: Script) -> Self {
        ScriptedNetwork {
            script: Rc::new(script),
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| matches(e)).count()
    }

    /// The single datagram the client sent.
    pub fn sent_bytes(&self) -> Vec<u8> {
        let sent: Vec<Vec<u8>> = self
            .events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Send { bytes, .. } => Some(bytes.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(sent.len(), 1, "expected exactly one datagram");
        sent[0].clone()
    }
}

fn record(events: &EventLog, event: Event) {
    events.borrow_mut().push(event);
}

impl Network for ScriptedNetwork {
    type Session = ScriptedSession;

    fn start(&self) -> io::Result<ScriptedSession> {
        record(&self.events, Event::Start);
        if let Some(kind) = self.script.start_error {
            return Err(kind.into());
        }
        Ok(ScriptedSession {
            script: Rc::clone(&self.script),
            events: Rc::clone(&self.events),
        })
    }
}

impl Session for ScriptedSession {
    type Channel = ScriptedChannel;

    fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        record(&self.events, Event::Resolve(host.to_string()));
        self.script.resolve.clone().map_err(io::Error::from)
    }

    fn open_udp_v4(&self) -> io::Result<ScriptedChannel> {
        record(&self.events, Event::OpenUdp);
        if let Some(kind) = self.script.open_error {
            return Err(kind.into());
        }
        Ok(ScriptedChannel {
            script: Rc::clone(&self.script),
            events: Rc::clone(&self.events),
        })
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        record(&self.events, Event::SessionDropped);
    }
}

impl DatagramChannel for ScriptedChannel {
    fn set_timeout(&self, timeout: Duration) -> io::Result<()> {
        record(&self.events, Event::SetTimeout(timeout));
        match self.script.timeout_error {
            Some(kind) => Err(kind.into()),
            None => Ok(()),
        }
    }

    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        record(
            &self.events,
            Event::Send {
                to: target,
                bytes: buf.to_vec(),
            },
        );
        match self.script.send {
            SendBehavior::Full => Ok(buf.len()),
            SendBehavior::Short(n) => Ok(n),
            SendBehavior::Fail(kind) => Err(kind.into()),
        }
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        record(&self.events, Event::Recv);
        match &self.script.recv {
            RecvBehavior::Reply(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            RecvBehavior::Overreport(n) => {
                let wire = valid_reply().to_wire();
                let m = wire.len().min(buf.len());
                buf[..m].copy_from_slice(&wire[..m]);
                Ok(*n)
            }
            RecvBehavior::Fail(kind) => Err((*kind).into()),
        }
    }
}

impl Drop for ScriptedChannel {
    fn drop(&mut self) {
        record(&self.events, Event::ChannelDropped);
    }
}

/// A server-mode reply with the given leap indicator, stratum, and transmit seconds.
pub fn server_reply(leap: u8, stratum: u8, transmit_seconds: u32) -> Packet {
    let mut packet = Packet {
        stratum,
        poll: 6,
        precision: -20,
        reference_id: *b"GPS\0",
        transmit_timestamp: TimestampFormat {
            seconds: transmit_seconds,
            fraction: 0,
        },
        ..Packet::default()
    };
    packet.set_leap_indicator(leap);
    packet.set_version(Version::V4.value());
    packet.set_mode(4);
    packet
}

/// A reply every check accepts: mode 4, LI 0, stratum 1, transmit [`REPLY_SECONDS`].
pub fn valid_reply() -> Packet {
    server_reply(0, 1, REPLY_SECONDS)
}

/// Returns `true` if the I/O error indicates a network-level failure that
/// should cause a live test to be **skipped** (not panicked).
pub fn is_network_skip_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::AddrNotAvailable
            | io::ErrorKind::NotFound
    ) || e.raw_os_error() == Some(101) // ENETUNREACH
      || e.raw_os_error() == Some(113) // EHOSTUNREACH
      || e.to_string().contains("Network is unreachable")
      || e.to_string().contains("No route to host")
      || e.to_string().contains("failed to lookup address")
      || e.to_string().contains("Temporary failure in name resolution")
}
