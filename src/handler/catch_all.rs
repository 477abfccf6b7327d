//! Catch-all request handling
//!
//! Entry point for every request the listener accepts. There is no per-path
//! dispatch: each GET/POST/PUT/DELETE on any path gets the same treatment —
//! snapshot, log block, fixed acknowledgment.

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::Config;
use crate::handler::snapshot;
use crate::http;
use crate::logger;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(req.method()) {
        return Ok(resp);
    }

    // 2. Check declared body size
    if let Some(resp) = check_body_size(req.headers(), config.http.max_body_size) {
        return Ok(resp);
    }

    // 3. Read the body and log the request snapshot
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            Bytes::new()
        }
    };

    if config.logging.access_log {
        let record = snapshot::build_record(&parts, &body, &config.local_authority());
        logger::log_request(&record);
    }

    // 4. Fixed acknowledgment, regardless of input
    Ok(http::build_ack_response())
}

/// Check HTTP method and return the appropriate response for methods the
/// listener does not accept
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::POST | Method::PUT | Method::DELETE => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate the declared Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_methods_pass_the_gate() {
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            assert!(check_http_method(&method).is_none(), "{method} rejected");
        }
    }

    #[test]
    fn test_options_gets_preflight_response() {
        let response = check_http_method(&Method::OPTIONS).unwrap();
        assert_eq!(response.status(), 204);
    }

    #[test]
    fn test_other_methods_get_405() {
        let response = check_http_method(&Method::PATCH).unwrap();
        assert_eq!(response.status(), 405);
    }

    #[test]
    fn test_declared_size_within_limit_passes() {
        let mut headers = HeaderMap::new();
        headers.insert("content-length", "512".parse().unwrap());
        assert!(check_body_size(&headers, 1024).is_none());
    }

    #[test]
    fn test_declared_size_above_limit_gets_413() {
        let mut headers = HeaderMap::new();
        headers.insert("content-length", "2048".parse().unwrap());
        let response = check_body_size(&headers, 1024).unwrap();
        assert_eq!(response.status(), 413);
    }

    #[test]
    fn test_missing_or_invalid_declared_size_passes() {
        assert!(check_body_size(&HeaderMap::new(), 1024).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("content-length", "not-a-number".parse().unwrap());
        assert!(check_body_size(&headers, 1024).is_none());
    }
}
