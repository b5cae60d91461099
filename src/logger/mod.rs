//! Logger module
//!
//! Operator-facing output of the test server:
//! - Startup banner and stop message on stdout
//! - Warnings and errors on stderr
//!
//! Requests are not logged.

use crate::config::{self, Config};
use crate::error::StartupError;
use std::net::SocketAddr;

const SEPARATOR_WIDTH: usize = 60;

fn write_info(message: &str) {
    println!("{message}");
}

fn write_error(message: &str) {
    eprintln!("{message}");
}

/// Lines printed once the listener is bound
pub fn banner_lines(config: &Config, addr: &SocketAddr) -> Vec<String> {
    let port = addr.port();
    let mut lines = vec![
        "[SERVER] Test server started".to_string(),
        format!("[SERVER] Address: {}", config::base_url(port)),
        format!("[SERVER] Serving: {}", config.server.root.display()),
    ];
    for source in &config.overrides {
        lines.push(format!("[CONFIG] Defaults overridden by {source}"));
    }
    for page in &config.banner.pages {
        lines.push(format!(
            "[PAGE] {}: {}",
            page.label,
            config::page_url(port, &page.path)
        ));
    }
    lines.push(format!(
        "[WARN] Make sure the backend service is running at {}",
        config.banner.backend_url
    ));
    lines.push("[SERVER] Press Ctrl+C to stop the server".to_string());
    lines.push("-".repeat(SEPARATOR_WIDTH));
    lines
}

pub fn log_banner(config: &Config, addr: &SocketAddr) {
    for line in banner_lines(config, addr) {
        write_info(&line);
    }
}

pub fn log_stopped() {
    write_info("\n[SERVER] Server stopped");
}

pub fn log_browser_opening(url: &str) {
    write_info(&format!("[BROWSER] Opening {url}"));
}

pub fn log_browser_failed(url: &str, err: &std::io::Error) {
    log_warning(&format!("Could not open browser ({err}), visit {url} manually"));
}

pub fn log_startup_failure(err: &StartupError) {
    write_error(&format!("[ERROR] {}", err.operator_message()));
}

pub fn log_connection_error(err: &hyper::Error) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
