//! Generic pager over token-paginated listings

use super::types::{PageState, Pageable};
use crate::error::{Error, Result};
use futures::future::BoxFuture;
use futures::stream::{unfold, Stream};
use std::future::Future;
use tracing::debug;

type FetchFn<'a, P> = Box<dyn Fn(Option<String>) -> BoxFuture<'a, Result<P>> + Send + Sync + 'a>;

/// Walks a listing one page at a time
///
/// Each call to [`Pager::next_page`] issues exactly one request. Pages are
/// fetched strictly in order, and a failed fetch leaves the pager where it
/// was so the same page can be requested again.
pub struct Pager<'a, P: Pageable> {
    fetch: FetchFn<'a, P>,
    state: PageState,
    pages_fetched: u32,
}

impl<'a, P> Pager<'a, P>
where
    P: Pageable + Send + 'a,
    P::Item: Send,
{
    /// Create a pager from a page fetch function
    ///
    /// `start_token` resumes a listing part-way through.
    pub fn new<F, Fut>(start_token: Option<String>, fetch: F) -> Self
    where
        F: Fn(Option<String>) -> Fut + Send + Sync + 'a,
        Fut: Future<Output = Result<P>> + Send + 'a,
    {
        Self {
            fetch: Box::new(move |token| Box::pin(fetch(token))),
            state: PageState::start(start_token),
            pages_fetched: 0,
        }
    }

    /// Check if another page can be fetched
    pub fn has_next(&self) -> bool {
        self.state.has_more()
    }

    /// Current state
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Fetch the next page
    ///
    /// Returns [`Error::PagesExhausted`] once the last page has been seen.
    pub async fn next_page(&mut self) -> Result<Vec<P::Item>> {
        let PageState::HasMore(token) = &self.state else {
            return Err(Error::PagesExhausted);
        };

        let page = (self.fetch)(token.clone()).await?;

        let (next, items) = std::mem::take(&mut self.state).advance(page);
        self.state = next;
        self.pages_fetched += 1;
        debug!(
            "Fetched page {} ({} items), more: {}",
            self.pages_fetched,
            items.len(),
            self.state.has_more()
        );

        Ok(items)
    }

    /// Fetch every remaining page and concatenate the results
    pub async fn all(&mut self) -> Result<Vec<P::Item>> {
        let mut items = Vec::new();
        while self.has_next() {
            items.extend(self.next_page().await?);
        }
        Ok(items)
    }

    /// Turn the pager into a stream of pages
    ///
    /// The stream ends after the last page, or after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<P::Item>>> + Send + 'a {
        unfold(Some(self), |pager| async move {
            let mut pager = pager?;
            if !pager.has_next() {
                return None;
            }
            match pager.next_page().await {
                Ok(items) => Some((Ok(items), Some(pager))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

impl<P: Pageable> std::fmt::Debug for Pager<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("state", &self.state)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
