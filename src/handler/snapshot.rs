//! Request snapshot construction
//!
//! Turns the parts of an accepted request into a `RequestRecord`: rebuilds
//! the full URL, normalizes the path, reduces the query string to a
//! first-value-per-key mapping, and filters the echoed headers.

use chrono::Local;
use hyper::http::request::Parts;
use serde_json::{Map, Value};

use crate::logger::{BodyContent, RequestRecord};

/// Headers never echoed in the log block (matched case-insensitively)
const SKIPPED_HEADERS: [&str; 2] = ["host", "content-length"];

/// Build the snapshot for one request.
///
/// `local_authority` is the authority used in the rebuilt URL when the
/// client sent no `Host` header.
pub fn build_record(parts: &Parts, body: &[u8], local_authority: &str) -> RequestRecord {
    RequestRecord {
        time: Local::now(),
        method: parts.method.to_string(),
        url: reconstruct_url(parts, local_authority),
        path: normalize_path(parts.uri.path()),
        query_params: parse_query_params(parts.uri.query()),
        headers: filter_headers(&parts.headers),
        body: BodyContent::interpret(body),
    }
}

/// Rebuild the full request URL.
///
/// Origin-form requests carry only the path and query; the authority comes
/// from the `Host` header. The listener speaks plain HTTP, so the scheme is
/// fixed.
fn reconstruct_url(parts: &Parts, local_authority: &str) -> String {
    let authority = parts
        .headers
        .get(hyper::header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(local_authority);
    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or("/", hyper::http::uri::PathAndQuery::as_str);
    format!("http://{authority}{path_and_query}")
}

/// The logged path always carries a leading slash, including for an empty
/// origin-form path.
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Parse the raw query string into a first-value-per-key mapping.
///
/// Repeated keys keep their first value only; multiplicity is not preserved.
fn parse_query_params(query: Option<&str>) -> Vec<(String, String)> {
    let Some(query) = query else {
        return Vec::new();
    };

    let mut params: Vec<(String, String)> = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        if params.iter().any(|(existing, _)| *existing == key) {
            continue;
        }
        params.push((key, decode_component(value)));
    }
    params
}

/// Percent-decode one query component, keeping it verbatim when the
/// encoding is not valid UTF-8. `+` decodes as a space.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or(spaced)
}

/// Copy request headers into the echoed mapping, dropping the skipped names
/// regardless of casing. Header values that are not valid UTF-8 decode
/// lossily. Repeated header names keep the last value.
fn filter_headers(headers: &hyper::HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in headers {
        // hyper stores header names lowercased
        let name = name.as_str();
        if SKIPPED_HEADERS.contains(&name) {
            continue;
        }
        let value = value.to_str().map_or_else(
            |_| String::from_utf8_lossy(value.as_bytes()).into_owned(),
            ToString::to_string,
        );
        map.insert(name.to_string(), Value::String(value));
    }
    map
}
