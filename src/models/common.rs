//! Models shared by several resources

use crate::pagination::{normalize_token, token_from_href};
use serde::{Deserialize, Serialize};

/// `delete_after_days` value meaning "keep forever"
pub const RETAIN_INDEFINITELY: i64 = -1;

/// Link to the next page of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPagination {
    /// URL of the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Continuation token for the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl NextPagination {
    /// The continuation token, falling back to the `token` query parameter of `href`
    pub fn next_token(&self) -> Option<String> {
        normalize_token(self.token.clone())
            .or_else(|| self.href.as_deref().and_then(token_from_href))
    }
}

/// Retention period in days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAfterDays {
    /// Days to retain; [`RETAIN_INDEFINITELY`] keeps data forever
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_after_days: Option<i64>,
}

impl DeleteAfterDays {
    /// Retain for the given number of days
    pub fn new(days: i64) -> Self {
        Self {
            delete_after_days: Some(days),
        }
    }

    /// Retain forever
    pub fn indefinitely() -> Self {
        Self::new(RETAIN_INDEFINITELY)
    }
}
