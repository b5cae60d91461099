//! Request dispatch module
//!
//! Entry point for HTTP request processing: method dispatch, then CORS
//! headers on whatever response comes out.

use crate::config::Config;
use crate::handler::static_files;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::IF_MODIFIED_SINCE;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) URL path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
}

/// Main entry point for HTTP request handling
///
/// Request bodies are never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    // The body is dropped unread
    let (parts, _) = req.into_parts();
    let mut response = dispatch(&parts, &config).await;
    http::apply_cors_headers(response.headers_mut(), &config.cors);
    Ok(response)
}

async fn dispatch(req: &Parts, config: &Config) -> Response<Full<Bytes>> {
    let method = &req.method;
    match *method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: req.uri.path(),
                query: req.uri.query(),
                is_head: *method == Method::HEAD,
                if_modified_since: req
                    .headers
                    .get(IF_MODIFIED_SINCE)
                    .and_then(|v| v.to_str().ok()),
            };
            static_files::serve(&ctx, &config.server.root, &config.server.index_files).await
        }
        Method::OPTIONS => http::build_preflight_response(),
        _ => http::build_501_response(method.as_str()),
    }
}
