//! Per-request configuration and path templating

use crate::error::{Error, Result};
use crate::patch::MERGE_PATCH_CONTENT_TYPE;
use crate::types::{JsonObject, JsonValue, StringMap};
use reqwest::Method;
use std::time::Instant;

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent as `application/json`
    Json(JsonValue),
    /// Sent as `application/merge-patch+json`
    MergePatch(JsonObject),
}

impl RequestBody {
    /// Content type header value for this body
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::MergePatch(_) => MERGE_PATCH_CONTENT_TYPE,
        }
    }

    /// Serialize the body to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Self::Json(value) => serde_json::to_vec(value)?,
            Self::MergePatch(object) => serde_json::to_vec(object)?,
        };
        Ok(bytes)
    }
}

/// Everything needed to issue one API call
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Operation name, used in logs
    pub operation: &'static str,
    /// HTTP method
    pub method: Method,
    /// Path template with `{name}` placeholders
    pub path: &'static str,
    /// Values for the path placeholders
    pub path_params: Vec<(&'static str, String)>,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<RequestBody>,
    /// Point in time after which the call is abandoned
    pub deadline: Option<Instant>,
}

impl RequestConfig {
    /// Create a request for an operation
    pub fn new(operation: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            operation,
            method,
            path,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            deadline: None,
        }
    }

    /// Set a path parameter
    #[must_use]
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter if it has a value
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v.to_string()),
            None => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a header if it has a value
    #[must_use]
    pub fn header_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.header(key, v),
            None => self,
        }
    }

    /// Add caller-supplied headers
    #[must_use]
    pub fn headers(mut self, headers: &StringMap) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a merge-patch body
    #[must_use]
    pub fn merge_patch(mut self, body: JsonObject) -> Self {
        self.body = Some(RequestBody::MergePatch(body));
        self
    }

    /// Set the deadline
    #[must_use]
    pub fn deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Look up a path parameter
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Substitute placeholders with percent-escaped parameter values
    ///
    /// Fails with [`Error::MissingParameter`] when a placeholder has no value
    /// or an empty one.
    pub fn render_path(&self) -> Result<String> {
        let mut out = String::with_capacity(self.path.len());
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                Error::invalid_param("path", format!("unterminated placeholder in '{}'", self.path))
            })?;
            let name = &after[..end];
            let value = self
                .get_path_param(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::missing_param(name))?;
            out.push_str(&urlencoding::encode(value));
            rest = &after[end + 1..];
        }
        out.push_str(rest);

        Ok(out)
    }
}
