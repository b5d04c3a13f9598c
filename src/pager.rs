//! Lazy traversal of cursor-paginated forge connections.
//!
//! A [`CursorPager`] owns the cursor and the buffered page for a single
//! traversal. Pages are fetched on demand: the next remote call happens only
//! when the buffer is empty and the consumer asks for another item. A
//! consumer stops early by dropping the pager. A fetcher stops early by
//! returning a page with [`Page::halt`] set, in which case the buffered
//! items are still yielded but no further page is requested.
use async_trait::async_trait;
use futures_util::{Stream, stream};
use log::*;
use std::collections::VecDeque;

use crate::{DraftkeeperError, Result, forge::request::Page};

/// Fetches one page of a connection starting after `cursor`.
#[async_trait]
pub trait PageFetcher: Send {
    type Item: Send;

    async fn fetch_page(
        &mut self,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<Self::Item>>;
}

#[derive(Debug, Clone, PartialEq)]
enum Driver {
    /// Fetch the page after this cursor once the buffer runs dry.
    Continue(Option<String>),
    /// Drain the buffer, then stop without fetching again.
    StopBeforeNextFetch,
    /// More pages exist but the page limit forbids fetching them.
    LimitReached,
    Exhausted,
}

pub struct CursorPager<F: PageFetcher> {
    fetcher: F,
    page_size: usize,
    page_limit: Option<usize>,
    buffer: VecDeque<F::Item>,
    driver: Driver,
    fetch_count: usize,
    truncated: bool,
}

impl<F: PageFetcher> CursorPager<F> {
    pub fn new(fetcher: F, page_size: usize) -> Self {
        Self {
            fetcher,
            page_size,
            page_limit: None,
            buffer: VecDeque::new(),
            driver: Driver::Continue(None),
            fetch_count: 0,
            truncated: false,
        }
    }

    /// Stop after `limit` pages even if the connection reports more.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Number of page fetches issued so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    /// Whether the traversal ended at the page limit with pages left
    /// unread. Only set once the consumer asked for an item past the limit.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Next item, fetching a page if the buffer is empty.
    pub async fn next(&mut self) -> Result<Option<F::Item>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }

            match std::mem::replace(&mut self.driver, Driver::Exhausted) {
                Driver::Continue(cursor) => {
                    // driver stays Exhausted if the fetch fails
                    self.fetch_count += 1;
                    let page =
                        self.fetcher.fetch_page(cursor, self.page_size).await?;
                    self.driver = self.advance(&page);
                    self.buffer.extend(page.items);
                }
                Driver::LimitReached => {
                    warn!(
                        "reached page limit of {} pages: stopping traversal",
                        self.fetch_count
                    );
                    self.truncated = true;
                    return Ok(None);
                }
                Driver::StopBeforeNextFetch | Driver::Exhausted => {
                    return Ok(None);
                }
            }
        }
    }

    /// Drain every remaining item into a list.
    pub async fn collect(mut self) -> Result<Vec<F::Item>> {
        let mut items = vec![];
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Convert into a stream that ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<F::Item>> {
        stream::try_unfold(self, |mut pager| async move {
            let item = pager.next().await?;
            Ok::<_, DraftkeeperError>(item.map(|item| (item, pager)))
        })
    }

    fn advance(&self, page: &Page<F::Item>) -> Driver {
        if page.halt {
            debug!("page fetcher halted traversal");
            return Driver::StopBeforeNextFetch;
        }

        if !page.has_next_page {
            return Driver::StopBeforeNextFetch;
        }

        if let Some(limit) = self.page_limit
            && self.fetch_count >= limit
        {
            return Driver::LimitReached;
        }

        match &page.end_cursor {
            Some(cursor) => Driver::Continue(Some(cursor.clone())),
            None => Driver::StopBeforeNextFetch,
        }
    }
}
