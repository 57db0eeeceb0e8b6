//! Response body interpretation at the transport boundary.
//!
//! Bodies are classified once, here, into [`Payload`]; nothing deeper in the
//! call stack inspects `code`/`data` keys.

use aegis_api_models::ENVELOPE_SUCCESS_CODE;
use serde_json::{Number, Value};

/// A 2xx response body after shape detection.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// `{ code, message?, data }` wrapper carrying the success code; holds `data`.
    Data(Value),
    /// `{ code, message?, data }` wrapper carrying any other code.
    Rejected {
        /// Domain status code, truncated to an integer when sent as a fraction.
        code: i64,
        /// The untouched body, kept for message extraction and callers.
        body: Value,
    },
    /// Bare payload returned as-is.
    Raw(Value),
}

impl Payload {
    /// Classify a body: an object with a numeric `code` and a `data` key is an envelope.
    #[must_use]
    pub fn classify(body: Value) -> Self {
        let code = match &body {
            Value::Object(map) if map.contains_key("data") => match map.get("code") {
                Some(Value::Number(code)) => Some(code.clone()),
                _ => None,
            },
            _ => None,
        };
        let Some(code) = code else {
            return Self::Raw(body);
        };
        if is_success_code(&code) {
            let data = match body {
                Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
                other => other,
            };
            return Self::Data(data);
        }
        Self::Rejected {
            code: integral_code(&code),
            body,
        }
    }
}

#[allow(clippy::float_cmp)]
fn is_success_code(code: &Number) -> bool {
    code.as_i64().map_or_else(
        || code.as_f64() == Some(f64::from(ENVELOPE_SUCCESS_CODE)),
        |code| code == i64::from(ENVELOPE_SUCCESS_CODE),
    )
}

#[allow(clippy::cast_possible_truncation)]
fn integral_code(code: &Number) -> i64 {
    code.as_i64()
        .or_else(|| code.as_f64().map(|code| code as i64))
        .unwrap_or(i64::MAX)
}

/// Pull a display message out of an error body.
///
/// Probes, in order, a string `message`, a string `detail`, and
/// `detail.message`; the first string with visible text wins and is returned
/// unchanged. Empty and whitespace-only strings are skipped.
#[must_use]
pub fn extract_message(body: &Value) -> Option<String> {
    let non_empty = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    };
    non_empty(body.get("message"))
        .or_else(|| non_empty(body.get("detail")))
        .or_else(|| non_empty(body.get("detail").and_then(|detail| detail.get("message"))))
}

/// Parse response text into JSON, keeping non-JSON text as a string value.
#[must_use]
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
