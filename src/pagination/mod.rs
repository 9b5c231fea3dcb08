//! Pagination module
//!
//! Listings return one page of items plus a continuation token. A
//! [`Pager`] walks those pages through a pure state machine
//! ([`PageState::advance`]) and exposes them incrementally, all at once,
//! or as a stream.

mod pager;
mod types;

pub use pager::Pager;
pub use types::{normalize_token, token_from_href, PageState, Pageable, TOKEN_PARAM};
