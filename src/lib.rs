//! Local static file server for frontend test pages.
//!
//! Serves a directory over HTTP with permissive CORS headers and opens the
//! avatar upload test page in the default browser, so the pages can call a
//! backend on another origin without `file://` restrictions.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

#[cfg(test)]
mod test_support;
