//! # Network Module
//!
//! This module provides networking abstractions over UDP for sending and receiving OSC messages.
//! OSC is connectionless, so a "connected" socket here simply has a fixed peer which every message
//! is sent to.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use serde::Deserialize;
use std::{
    net::{SocketAddr, ToSocketAddrs, UdpSocket},
    time::Duration,
};

use crate::osc::{OscError, OscMessage};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Largest datagram accepted by [`OscSocket::recv`].
const MAX_PACKET_LEN: usize = 1536;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A UDP socket which sends and receives OSC messages.
pub struct OscSocket {
    socket: UdpSocket,

    peer: Option<SocketAddr>,
}

/// Options applied to an [`OscSocket`] on creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocketOptions {
    /// Local address the socket binds to. Use port `0` to let the OS pick a port.
    ///
    /// The default value is `0.0.0.0:0`.
    pub bind_addr: String,

    /// Maximum time a send may block for, in milliseconds. `0` means block forever.
    pub send_timeout_ms: u64,

    /// Maximum time a receive may block for, in milliseconds. `0` means block forever.
    pub recv_timeout_ms: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum NetError {
    #[error("Could not bind the socket to {0}: {1}")]
    BindError(String, std::io::Error),

    #[error("Could not resolve the endpoint {0:?}")]
    InvalidEndpoint(String),

    #[error("Could not connect the socket to {0}: {1}")]
    CouldNotConnect(SocketAddr, std::io::Error),

    #[error("The socket has no peer to send to")]
    NotConnected,

    #[error("Could not set the {0} socket option: {1}")]
    SocketOptionError(&'static str, std::io::Error),

    #[error("Could not encode the message: {0}")]
    EncodeError(OscError),

    #[error("Could not decode the received packet: {0}")]
    DecodeError(OscError),

    #[error("Could not send the message: {0}")]
    SendError(std::io::Error),

    #[error("Could not receive a message: {0}")]
    RecvError(std::io::Error),

    #[error("Could not get the local address of the socket: {0}")]
    LocalAddrError(std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OscSocket {
    /// Create a new socket bound according to the given options.
    ///
    /// The socket has no peer until [`OscSocket::connect`] is called, which is all a receiving
    /// socket needs.
    pub fn new(socket_options: &SocketOptions) -> Result<Self, NetError> {
        let socket = UdpSocket::bind(&socket_options.bind_addr)
            .map_err(|e| NetError::BindError(socket_options.bind_addr.clone(), e))?;

        socket_options.set(&socket)?;

        debug!("OSC socket bound to {:?}", socket.local_addr().ok());

        Ok(Self { socket, peer: None })
    }

    /// Fix the peer that every message is sent to.
    ///
    /// ## Arguments
    /// - `endpoint`: an address string, such as `"169.254.1.1:9000"`
    pub fn connect(&mut self, endpoint: &str) -> Result<(), NetError> {
        let addr = endpoint
            .to_socket_addrs()
            .map_err(|_| NetError::InvalidEndpoint(endpoint.into()))?
            .next()
            .ok_or_else(|| NetError::InvalidEndpoint(endpoint.into()))?;

        self.socket
            .connect(addr)
            .map_err(|e| NetError::CouldNotConnect(addr, e))?;
        self.peer = Some(addr);

        debug!("OSC socket connected to {}", addr);

        Ok(())
    }

    /// The peer messages are sent to, if connected.
    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// The local address of the socket.
    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        self.socket.local_addr().map_err(NetError::LocalAddrError)
    }

    /// Send a message to the connected peer.
    pub fn send(&self, msg: &OscMessage) -> Result<(), NetError> {
        if self.peer.is_none() {
            return Err(NetError::NotConnected);
        }

        let packet = msg.encode().map_err(NetError::EncodeError)?;

        self.socket.send(&packet).map_err(NetError::SendError)?;

        Ok(())
    }

    /// Block until a message is received, returning it and the address it came from.
    pub fn recv(&self) -> Result<(OscMessage, SocketAddr), NetError> {
        let mut buf = [0u8; MAX_PACKET_LEN];

        let (len, from) = self
            .socket
            .recv_from(&mut buf)
            .map_err(NetError::RecvError)?;

        let msg = OscMessage::decode(&buf[..len]).map_err(NetError::DecodeError)?;

        Ok((msg, from))
    }

    /// Close the socket.
    pub fn close(self) {
        debug!("OSC socket to {:?} closed", self.peer);
    }
}

impl SocketOptions {
    /// Set these options on the given socket.
    pub fn set(&self, socket: &UdpSocket) -> Result<(), NetError> {
        socket
            .set_write_timeout(timeout(self.send_timeout_ms))
            .map_err(|e| NetError::SocketOptionError("send_timeout", e))?;
        socket
            .set_read_timeout(timeout(self.recv_timeout_ms))
            .map_err(|e| NetError::SocketOptionError("recv_timeout", e))?;

        Ok(())
    }
}

impl Default for SocketOptions {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:0".into(),
            send_timeout_ms: 0,
            recv_timeout_ms: 0,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Convert a millisecond timeout into the form used by the std socket API.
fn timeout(ms: u64) -> Option<Duration> {
    match ms {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn loopback_options() -> SocketOptions {
        SocketOptions {
            bind_addr: "127.0.0.1:0".into(),
            recv_timeout_ms: 1000,
            ..Default::default()
        }
    }

    #[test]
    fn test_send_recv_loopback() -> Result<(), NetError> {
        let server = OscSocket::new(&loopback_options())?;
        let mut client = OscSocket::new(&loopback_options())?;

        assert_eq!(client.peer(), None);
        client.connect(&server.local_addr()?.to_string())?;
        assert_eq!(client.peer(), Some(server.local_addr()?));
        client.send(&OscMessage::pwm_duty(7, 9.0))?;

        let (msg, from) = server.recv()?;

        assert_eq!(msg.as_pwm_duty(), Some((7, 9.0)));
        assert_eq!(from, client.local_addr()?);

        Ok(())
    }

    #[test]
    fn test_send_without_peer() -> Result<(), NetError> {
        let socket = OscSocket::new(&loopback_options())?;

        assert!(matches!(
            socket.send(&OscMessage::pwm_duty(1, 3.0)),
            Err(NetError::NotConnected)
        ));

        Ok(())
    }

    #[test]
    fn test_invalid_endpoint() -> Result<(), NetError> {
        let mut socket = OscSocket::new(&loopback_options())?;

        assert!(matches!(
            socket.connect("not an endpoint"),
            Err(NetError::InvalidEndpoint(_))
        ));

        Ok(())
    }
}
