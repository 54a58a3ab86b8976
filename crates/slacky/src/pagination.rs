//! Cursor pagination for list methods.

use futures::stream::{self, Stream, TryStreamExt};

use crate::client::SlackyClient;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::response::SlackyResponse;

/// A list method that accepts Slack's `cursor` parameter.
pub trait Paginated: Endpoint<Object = Vec<Self::Item>> {
    /// One element of a page.
    type Item;

    /// Set (or clear) the cursor sent with the next request.
    fn set_cursor(&mut self, cursor: Option<String>);
}

/// One page of a list method.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor of the following page; `None` on the last page.
    pub next_cursor: Option<String>,
    /// Envelope the page was decoded from.
    pub response: SlackyResponse,
}

/// Walks the pages of a [`Paginated`] endpoint.
///
/// The first request is sent as configured; every later one repeats it with
/// the cursor from the previous response.
#[derive(Debug)]
pub struct Pager<E> {
    client: SlackyClient,
    endpoint: E,
    pages: usize,
    done: bool,
}

impl<E: Paginated> Pager<E> {
    pub(crate) fn new(client: SlackyClient, endpoint: E) -> Self {
        Self {
            client,
            endpoint,
            pages: 0,
            done: false,
        }
    }

    /// Number of pages fetched so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Fetch the next page, or `None` once the last page was returned.
    pub async fn next_page(&mut self) -> Result<Option<Page<E::Item>>> {
        if self.done {
            return Ok(None);
        }

        let response = self.client.send(&self.endpoint).await?;
        let items = self.endpoint.object(&self.client, &response)?;
        let next_cursor = response.next_cursor().map(str::to_string);
        self.pages += 1;

        tracing::debug!(
            method = E::NAME,
            page = self.pages,
            items = items.len(),
            more = next_cursor.is_some(),
            "Fetched page"
        );

        match &next_cursor {
            Some(cursor) => self.endpoint.set_cursor(Some(cursor.clone())),
            None => self.done = true,
        }

        Ok(Some(Page {
            items,
            next_cursor,
            response,
        }))
    }

    /// Stream every item of every remaining page.
    pub fn into_stream(self) -> impl Stream<Item = Result<E::Item>> {
        stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok::<_, Error>(page.map(|page| (page.items, pager)))
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<_, Error>)))
        .try_flatten()
    }
}
