//! CORS header injection
//!
//! Every response leaving the handler gets the configured allow-all headers,
//! error responses included.

use crate::config::CorsConfig;
use crate::logger;
use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};

/// Insert the three CORS headers, replacing any existing values
pub fn apply_cors_headers(headers: &mut HeaderMap, cors: &CorsConfig) {
    insert(headers, ACCESS_CONTROL_ALLOW_ORIGIN, &cors.allow_origin);
    insert(headers, ACCESS_CONTROL_ALLOW_METHODS, &cors.allow_methods);
    insert(headers, ACCESS_CONTROL_ALLOW_HEADERS, &cors.allow_headers);
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(e) => logger::log_warning(&format!("Invalid value for {name}: '{value}' ({e})")),
    }
}
