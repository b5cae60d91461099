//! Server module
//!
//! Binds the listener, opens the browser, and accepts connections until the
//! shutdown future resolves.

pub mod browser;
pub mod connection;
pub mod listener;
pub mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{self, Config};
use crate::error::StartupError;
use crate::logger;

pub use browser::{BrowserLauncher, SystemBrowser};
pub use listener::bind_listener;
pub use signal::shutdown_signal;

/// A bound server that has not started accepting yet
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    config: Arc<Config>,
}

impl Server {
    /// Bind the configured address. Must be called from within a Tokio runtime.
    pub fn bind(config: Config) -> Result<Self, StartupError> {
        let addr = config.socket_addr()?;
        let listener = bind_listener(addr)?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| StartupError::from_bind(addr, e))?;

        Ok(Self {
            listener,
            local_addr,
            config: Arc::new(config),
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accept connections until `shutdown` resolves, then drop the listener
    pub async fn serve_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => break,

                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, _peer_addr)) => {
                            connection::spawn_connection(stream, Arc::clone(&self.config));
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }
            }
        }
    }
}

/// Start the test server: bind, print the banner, open the browser once,
/// then serve until `shutdown` resolves.
pub async fn run<B, F>(config: Config, browser: &B, shutdown: F) -> Result<(), StartupError>
where
    B: BrowserLauncher + ?Sized,
    F: Future<Output = ()>,
{
    let server = Server::bind(config)?;
    let addr = server.local_addr();
    logger::log_banner(server.config(), &addr);

    let browser_config = &server.config().browser;
    if browser_config.open_on_start {
        let url = config::page_url(addr.port(), &browser_config.page);
        logger::log_browser_opening(&url);
        if let Err(e) = browser.open(&url) {
            logger::log_browser_failed(&url, &e);
        }
    }

    server.serve_until(shutdown).await;
    logger::log_stopped();
    Ok(())
}
