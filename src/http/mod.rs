//! HTTP protocol layer module
//!
//! Protocol helpers shared by the request handlers: header injection,
//! content types, conditional requests, path translation and response builders.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used items
pub use cors::apply_cors_headers;
pub use response::{
    build_301_response, build_304_response, build_404_response, build_500_response,
    build_501_response, build_preflight_response,
};
