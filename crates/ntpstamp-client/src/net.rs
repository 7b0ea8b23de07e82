// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Network capabilities used by the client.
//!
//! A query needs three things from its environment: a started network
//! subsystem ([`Network`] producing a [`Session`]), name resolution and UDP
//! channel creation (both on the [`Session`]), and datagram I/O with a timeout
//! ([`DatagramChannel`]). Each resource is an owned value, so it is released
//! when it goes out of scope on every exit path.
//!
//! [`SystemNetwork`] is the implementation backed by the operating system.
//! Tests and embedders can supply their own.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use log::trace;
use socket2::{Domain, Protocol, Socket, Type};

/// Entry point to a network stack.
pub trait Network {
    /// Handle that keeps the subsystem alive until dropped.
    type Session: Session;

    /// Start the network subsystem for the duration of one query.
    fn start(&self) -> io::Result<Self::Session>;
}

/// A started network subsystem.
pub trait Session {
    /// Datagram channel type produced by [`open_udp_v4`](Session::open_udp_v4).
    type Channel: DatagramChannel;

    /// Resolve `host` to its addresses, in resolver order.
    fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>>;

    /// Open an IPv4 UDP channel bound to an ephemeral local port.
    fn open_udp_v4(&self) -> io::Result<Self::Channel>;
}

/// An open UDP endpoint. Dropping it closes the endpoint.
pub trait DatagramChannel {
    /// Apply `timeout` to both sending and receiving.
    fn set_timeout(&self, timeout: Duration) -> io::Result<()>;

    /// Send one datagram to `target`, returning the number of bytes written.
    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;

    /// Receive one datagram into `buf`, returning its length.
    ///
    /// Expiry of the timeout is reported as an error.
    fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<C: DatagramChannel + ?Sized> DatagramChannel for &C {
    fn set_timeout(&self, timeout: Duration) -> io::Result<()> {
        (**self).set_timeout(timeout)
    }

    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        (**self).send_to(buf, target)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).recv(buf)
    }
}

impl DatagramChannel for UdpSocket {
    fn set_timeout(&self, timeout: Duration) -> io::Result<()> {
        self.set_read_timeout(Some(timeout))?;
        self.set_write_timeout(Some(timeout))
    }

    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, target)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        let (len, src) = self.recv_from(buf)?;
        trace!("received {len} bytes from {src}");
        Ok(len)
    }
}

/// The operating system's network stack.
///
/// The standard library initializes the platform socket layer on first use,
/// so [`start`](Network::start) cannot fail here.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemNetwork;

/// Session handle for [`SystemNetwork`].
#[derive(Debug)]
pub struct SystemSession {
    _private: (),
}

impl Network for SystemNetwork {
    type Session = SystemSession;

    fn start(&self) -> io::Result<SystemSession> {
        Ok(SystemSession { _private: () })
    }
}

impl Session for SystemSession {
    type Channel = UdpSocket;

    fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let addrs: Vec<IpAddr> = (host, 0).to_socket_addrs()?.map(|a| a.ip()).collect();
        trace!("{host} resolved to {addrs:?}");
        Ok(addrs)
    }

    fn open_udp_v4(&self) -> io::Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));
        socket.bind(&bind_addr.into())?;
        Ok(socket.into())
    }
}
