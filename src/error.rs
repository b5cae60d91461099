//! Startup error types
//!
//! Serving-time failures become HTTP responses; only failures before the
//! serve loop starts surface as errors.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    /// Another process already listens on the port
    #[error("port {port} is already in use")]
    AddrInUse { port: u16 },

    /// Any other failure while creating the listener
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] io::Error),
}

impl StartupError {
    /// Classify a listener creation failure
    pub fn from_bind(addr: SocketAddr, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::AddrInUse {
            Self::AddrInUse { port: addr.port() }
        } else {
            Self::Bind { addr, source }
        }
    }

    /// Message shown to the operator when the server cannot start
    pub fn operator_message(&self) -> String {
        match self {
            Self::AddrInUse { port } => format!(
                "Port {port} is already in use, close the other service or change the port number"
            ),
            other => format!("Failed to start server: {other}"),
        }
    }
}
