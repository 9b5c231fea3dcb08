//! Pagination types and traits
//!
//! Defines the page-token state machine shared by every pager.

use url::Url;

/// Query parameter that carries the continuation token
pub const TOKEN_PARAM: &str = "token";

/// A response that is one page of a listing
pub trait Pageable {
    /// Element type of the listing
    type Item;

    /// Continuation token for the following page, if any
    fn next_token(&self) -> Option<String>;

    /// Consume the page, yielding its elements
    fn into_items(self) -> Vec<Self::Item>;
}

/// Where a listing stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Another page can be fetched, using this token (`None` for the first page)
    HasMore(Option<String>),
    /// The last page has been returned
    Exhausted,
}

impl Default for PageState {
    fn default() -> Self {
        Self::HasMore(None)
    }
}

impl PageState {
    /// Initial state, optionally resuming from a token
    pub fn start(token: Option<String>) -> Self {
        Self::HasMore(normalize_token(token))
    }

    /// Check if another page can be fetched
    pub fn has_more(&self) -> bool {
        matches!(self, Self::HasMore(_))
    }

    /// Token to send with the next request
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::HasMore(token) => token.as_deref(),
            Self::Exhausted => None,
        }
    }

    /// Apply a fetched page: the new state plus the page's elements
    ///
    /// A page without a (non-empty) continuation token ends the listing.
    pub fn advance<P: Pageable>(self, page: P) -> (Self, Vec<P::Item>) {
        if matches!(self, Self::Exhausted) {
            return (Self::Exhausted, Vec::new());
        }
        let next = match normalize_token(page.next_token()) {
            Some(token) => Self::HasMore(Some(token)),
            None => Self::Exhausted,
        };
        (next, page.into_items())
    }
}

/// Treat an empty token as no token
pub fn normalize_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

/// Pull the `token` query parameter out of a `next.href` link
pub fn token_from_href(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|t| !t.is_empty())
}
