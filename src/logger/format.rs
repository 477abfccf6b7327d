//! Request block formatting
//!
//! Renders one accepted request as the human-readable console block:
//! a timestamped section header, the request line fields, the filtered
//! headers as indented JSON, the interpreted body, and a closing separator.

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

/// Width of the closing separator line
const SEPARATOR_WIDTH: usize = 50;

/// Interpreted request body.
///
/// The JSON probe is an explicit branch, not a caught failure: a body that
/// does not parse is `Text`, and an absent body is `Empty`. No variant can
/// fail the request.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent {
    /// Body parsed as JSON (declared as such or probed successfully)
    Json(Value),
    /// Raw body decoded as text
    Text(String),
    /// No body sent
    Empty,
}

impl BodyContent {
    /// Interpret raw body bytes.
    ///
    /// Bodies that parse as JSON render pretty-printed whether or not the
    /// request declared a JSON content type. Non-UTF-8 bytes in the text
    /// fallback decode lossily, so a binary payload cannot fail the request.
    pub fn interpret(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Snapshot of one accepted request.
///
/// Built at request entry, consumed by exactly one log write, then dropped.
/// No field survives the request.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// Capture time, local clock
    pub time: DateTime<Local>,
    /// HTTP method
    pub method: String,
    /// Full request URL including scheme and authority
    pub url: String,
    /// Path portion, always prefixed with `/`
    pub path: String,
    /// Query parameters, first value per key
    pub query_params: Vec<(String, String)>,
    /// Request headers minus `host` and `content-length`
    pub headers: Map<String, Value>,
    /// Interpreted body
    pub body: BodyContent,
}

impl RequestRecord {
    /// Render the full console block, leading blank line included.
    pub fn format(&self) -> String {
        let mut block = String::new();
        block.push_str(&format!(
            "\n=== New Request at {} ===\n",
            self.time.format("%Y-%m-%d %H:%M:%S")
        ));
        block.push_str(&format!("Method: {}\n", self.method));
        block.push_str(&format!("URL: {}\n", self.url));
        block.push_str(&format!("Path: {}\n", self.path));
        block.push_str(&format!(
            "Query Params: {}\n",
            format_query_params(&self.query_params)
        ));
        block.push_str(&format!(
            "Headers: {}\n",
            pretty_json(&Value::Object(self.headers.clone()))
        ));
        match &self.body {
            BodyContent::Json(value) => {
                block.push_str(&format!("Body: {}\n", pretty_json(value)));
            }
            BodyContent::Text(text) => {
                block.push_str(&format!("Body: {text}\n"));
            }
            BodyContent::Empty => {}
        }
        block.push_str(&"=".repeat(SEPARATOR_WIDTH));
        block
    }
}

/// Render query parameters in `{'key': 'value'}` mapping notation.
fn format_query_params(params: &[(String, String)]) -> String {
    if params.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("'{key}': '{value}'"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Pretty-print a JSON value with 2-space indentation.
fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_record() -> RequestRecord {
        let mut headers = Map::new();
        headers.insert(
            "content-type".to_string(),
            Value::String("application/json".to_string()),
        );
        RequestRecord {
            time: Local::now(),
            method: "POST".to_string(),
            url: "http://localhost:8000/orders?id=42".to_string(),
            path: "/orders".to_string(),
            query_params: vec![("id".to_string(), "42".to_string())],
            headers,
            body: BodyContent::Json(json!({"qty": 3})),
        }
    }

    #[test]
    fn test_block_contains_request_fields() {
        let block = create_test_record().format();
        assert!(block.starts_with("\n=== New Request at "));
        assert!(block.contains(" ===\n"));
        assert!(block.contains("Method: POST\n"));
        assert!(block.contains("URL: http://localhost:8000/orders?id=42\n"));
        assert!(block.contains("Path: /orders\n"));
        assert!(block.contains("Query Params: {'id': '42'}\n"));
    }

    #[test]
    fn test_headers_render_as_indented_json() {
        let block = create_test_record().format();
        assert!(block.contains("Headers: {\n  \"content-type\": \"application/json\"\n}\n"));
    }

    #[test]
    fn test_json_body_renders_pretty_printed() {
        let block = create_test_record().format();
        assert!(block.contains("Body: {\n  \"qty\": 3\n}\n"));
    }

    #[test]
    fn test_text_body_renders_unchanged() {
        let mut record = create_test_record();
        record.body = BodyContent::Text("hello world".to_string());
        assert!(record.format().contains("Body: hello world\n"));
    }

    #[test]
    fn test_empty_body_omits_body_line() {
        let mut record = create_test_record();
        record.body = BodyContent::Empty;
        assert!(!record.format().contains("Body:"));
    }

    #[test]
    fn test_empty_query_params_render_as_braces() {
        let mut record = create_test_record();
        record.query_params.clear();
        assert!(record.format().contains("Query Params: {}\n"));
    }

    #[test]
    fn test_multiple_query_params_keep_order() {
        let mut record = create_test_record();
        record.query_params = vec![
            ("id".to_string(), "42".to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        assert!(record
            .format()
            .contains("Query Params: {'id': '42', 'page': '1'}\n"));
    }

    #[test]
    fn test_block_ends_with_separator() {
        let block = create_test_record().format();
        assert!(block.ends_with(&"=".repeat(50)));
    }

    #[test]
    fn test_interpret_empty_body() {
        assert_eq!(BodyContent::interpret(b""), BodyContent::Empty);
    }

    #[test]
    fn test_interpret_json_body() {
        assert_eq!(
            BodyContent::interpret(br#"{"a": 1}"#),
            BodyContent::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn test_interpret_non_json_body_falls_back_to_text() {
        assert_eq!(
            BodyContent::interpret(b"hello world"),
            BodyContent::Text("hello world".to_string())
        );
    }

    #[test]
    fn test_interpret_binary_body_decodes_lossily() {
        let interpreted = BodyContent::interpret(&[0xff, 0xfe, b'h', b'i']);
        match interpreted {
            BodyContent::Text(text) => assert!(text.ends_with("hi")),
            other => panic!("Expected Text, got: {other:?}"),
        }
    }
}
