//! Lock-free handle for serving a finished index to concurrent readers.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::{Error, Result};
use crate::posting::AttributeIndex;

/// Atomically swappable, read-only index.
///
/// Readers take an `Arc` snapshot with [`load`](Self::load) and keep using
/// it even if a rebuild is swapped in with [`replace`](Self::replace).
///
/// # Example
///
/// ```
/// use homefinder_core::{AttributeIndex, SetPostingIndex, SharedIndex};
///
/// let shared = SharedIndex::new(SetPostingIndex::new(50_000)?)?;
/// let before = shared.load();
///
/// let mut rebuilt = SetPostingIndex::new(50_000)?;
/// rebuilt.add_row(0, "3", "2", "150000");
/// shared.replace(rebuilt)?;
///
/// assert_eq!(before.row_count(), 0);
/// assert_eq!(shared.load().row_count(), 1);
/// # Ok::<(), homefinder_core::Error>(())
/// ```
#[derive(Debug)]
pub struct SharedIndex<I> {
    inner: ArcSwap<I>,
}

impl<I: AttributeIndex> SharedIndex<I> {
    /// Wraps a queryable index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFinalized`] if `index` is still loading.
    pub fn new(index: I) -> Result<Self> {
        if !index.is_queryable() {
            return Err(Error::NotFinalized);
        }
        Ok(Self {
            inner: ArcSwap::from_pointee(index),
        })
    }

    /// Current snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<I> {
        self.inner.load_full()
    }

    /// Swaps in `index` and returns the previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFinalized`] if `index` is still loading; the
    /// current snapshot is left in place.
    pub fn replace(&self, index: I) -> Result<Arc<I>> {
        if !index.is_queryable() {
            return Err(Error::NotFinalized);
        }
        let previous = self.inner.swap(Arc::new(index));
        tracing::debug!(
            variant = %previous.variant(),
            rows = previous.row_count(),
            "index snapshot replaced"
        );
        Ok(previous)
    }
}
