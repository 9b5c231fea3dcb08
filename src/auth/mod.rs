//! Authentication module
//!
//! Supports: No auth, Bearer token, Basic, IAM API key exchange
//!
//! The [`Authenticate`] trait is the seam the HTTP pipeline calls into.
//! [`Authenticator`] implements it for every [`AuthConfig`] variant and
//! caches IAM access tokens until shortly before they expire.

mod authenticator;
mod types;

pub use authenticator::{Authenticate, Authenticator};
pub use types::{AuthConfig, AuthType, CachedToken, DEFAULT_IAM_URL};
