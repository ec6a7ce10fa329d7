//! Batch Scanner Module
//!
//! Cursor-driven iteration over a store's keyspace, one page of keys at a
//! time, without ever issuing a blocking KEYS-style command.

use std::ops::ControlFlow;

use tracing::debug;

use crate::error::Result;
use crate::store::{Store, SCAN_CURSOR_START};

// == Batch Scanner ==
/// Walks the keys matching a glob pattern in batches.
///
/// Each batch is one page of the store's scan. Batches can be empty while
/// the walk continues, and the walk always delivers at least one batch,
/// even over an empty keyspace. The store may hand out a key more than
/// once across batches, and keys written or deleted mid-walk may or may
/// not appear; callers that need exact sets must dedupe themselves.
pub struct BatchScanner<'a, S: ?Sized> {
    /// Store being walked
    store: &'a S,
    /// Glob filter applied by the store
    pattern: String,
    /// Optional per-page count hint
    count: Option<usize>,
    /// Position token for the next page
    cursor: u64,
    /// Set once the store reports the walk complete
    done: bool,
}

impl<'a, S: Store + ?Sized> BatchScanner<'a, S> {
    // == Constructor ==
    /// Creates a scanner over the keys of `store` matching `pattern`.
    pub fn new(store: &'a S, pattern: impl Into<String>) -> Self {
        Self {
            store,
            pattern: pattern.into(),
            count: None,
            cursor: SCAN_CURSOR_START,
            done: false,
        }
    }

    // == Count Hint ==
    /// Sets the per-page count hint passed to the store.
    pub fn count(mut self, hint: usize) -> Self {
        self.count = Some(hint);
        self
    }

    // == Next Batch ==
    /// Fetches the next batch of keys.
    ///
    /// # Returns
    /// - `Ok(Some(keys))` for each page, including the final one
    /// - `Ok(None)` once the walk has completed
    pub async fn next_batch(&mut self) -> Result<Option<Vec<String>>> {
        if self.done {
            return Ok(None);
        }

        let (next, keys) = self
            .store
            .scan(self.cursor, &self.pattern, self.count)
            .await?;

        self.cursor = next;
        if next == SCAN_CURSOR_START {
            self.done = true;
        }

        Ok(Some(keys))
    }

    // == For Each Batch ==
    /// Drives the walk to completion, handing every batch to `on_batch`.
    ///
    /// Returning [`ControlFlow::Break`] from the callback stops the walk
    /// immediately; remaining pages are never fetched.
    pub async fn for_each_batch<F>(mut self, mut on_batch: F) -> Result<()>
    where
        F: FnMut(Vec<String>) -> ControlFlow<()>,
    {
        while let Some(keys) = self.next_batch().await? {
            if on_batch(keys).is_break() {
                debug!("batch scan of '{}' stopped early by caller", self.pattern);
                break;
            }
        }

        Ok(())
    }
}
