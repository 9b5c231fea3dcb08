//! Response types returned by the pipeline

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use std::borrow::Cow;

/// An undecoded HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body, as received
    pub body: Bytes,
}

impl RawResponse {
    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Body parsed as JSON, if it is JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// True if the body holds nothing but whitespace
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Best-effort error message from a failed response
    ///
    /// Looks at the shapes the service and its gateways use:
    /// `errors[0].message`, `error`, `message`, `errorMessage`.
    pub fn error_message(&self) -> String {
        if let Some(body) = self.json() {
            let candidates = [
                body.pointer("/errors/0/message"),
                body.get("error"),
                body.get("message"),
                body.get("errorMessage"),
            ];
            for candidate in candidates.into_iter().flatten() {
                if let Some(s) = candidate.as_str() {
                    return s.to_string();
                }
            }
        }
        self.status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    }
}

/// A decoded response: status, headers and the typed result
///
/// `result` is `None` when the service answered with an empty body, or for
/// operations that have no result model.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body, kept for logging and inspection
    pub body: Bytes,
    /// Decoded result
    pub result: Option<T>,
}

impl<T> DetailedResponse<T> {
    /// Wrap a raw response with an already decoded result
    pub fn new(raw: RawResponse, result: Option<T>) -> Self {
        Self {
            status: raw.status,
            headers: raw.headers,
            body: raw.body,
            result,
        }
    }

    /// Numeric status code
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Borrow the result
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Take the result
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn raw(status: u16, body: &'static str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test_case(r#"{"errors":[{"code":"NoSuchBucket","message":"bucket not found"}],"trace":"abc"}"#, "bucket not found")]
    #[test_case(r#"{"error":"forbidden"}"#, "forbidden")]
    #[test_case(r#"{"message":"bad input"}"#, "bad input")]
    #[test_case(r#"{"errorMessage":"nope"}"#, "nope")]
    #[test_case("not json", "Not Found")]
    fn test_error_message(body: &'static str, expected: &str) {
        assert_eq!(raw(404, body).error_message(), expected);
    }

    #[test]
    fn test_empty_body_detection() {
        assert!(raw(200, "").is_empty());
        assert!(raw(200, " \n").is_empty());
        assert!(!raw(200, "{}").is_empty());
    }

    #[test]
    fn test_detailed_response_accessors() {
        let resp = DetailedResponse::new(raw(201, "{}"), Some(5));
        assert_eq!(resp.status_code(), 201);
        assert_eq!(resp.result(), Some(&5));
        assert_eq!(resp.into_result(), Some(5));
    }
}
