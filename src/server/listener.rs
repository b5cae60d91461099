// Listener module
// Creates the TCP listener; an occupied port surfaces as StartupError::AddrInUse

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::error::StartupError;

const BACKLOG: i32 = 128;

/// Bind the server's listening socket.
///
/// Must be called from within a Tokio runtime.
pub fn bind_listener(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    create_listener(addr).map_err(|e| StartupError::from_bind(addr, e))
}

fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // On Unix SO_REUSEADDR only admits ports in TIME_WAIT, never one with a
    // live listener. Windows lets it steal a listening port, so it stays off
    // there. SO_REUSEPORT is never set: a second instance must fail to bind.
    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_occupied_port_is_addr_in_use() {
        let first = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        match bind_listener(addr) {
            Err(StartupError::AddrInUse { port }) => assert_eq!(port, addr.port()),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("second bind on {addr} succeeded"),
        }
    }

    #[tokio::test]
    async fn test_wildcard_port_taken_is_addr_in_use() {
        let first = bind_listener("0.0.0.0:0".parse().unwrap()).unwrap();
        let port = first.local_addr().unwrap().port();

        let second = bind_listener(SocketAddr::from(([0, 0, 0, 0], port)));
        assert!(matches!(second, Err(StartupError::AddrInUse { port: p }) if p == port));
    }

    #[tokio::test]
    async fn test_port_reusable_after_listener_dropped() {
        let first = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();
        drop(first);

        assert!(bind_listener(addr).is_ok());
    }
}
