//! Debug-only exclusive-section tracker for the chained table.
//!
//! A table call may leave a bucket in an intermediate state while it runs
//! user code (`K: Eq`, `K: Hash`, `V: PartialEq`): a hollow head observed
//! but not yet detached, or an entry unlinked from one chain and not yet
//! linked into another during a rehash. Calling back into the same table
//! from that user code would observe the intermediate state. In debug
//! builds `enter` panics on such a nested call; release builds compile the
//! tracker down to nothing.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table tracker. Public entry points open a section with
/// `let _s = self.section.enter();` before touching any chain.
#[derive(Debug)]
pub(crate) struct ExclusiveSection {
    #[cfg(debug_assertions)]
    open: Cell<bool>,
    // Tables are single-threaded; keep the owner !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl ExclusiveSection {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            open: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Open the section. Debug builds panic if it is already open.
    #[inline]
    pub(crate) fn enter(&self) -> SectionGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.open.replace(true),
                "nested call into a chained table while a bucket was being traversed"
            );
            SectionGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            SectionGuard {
                _owner: PhantomData,
            }
        }
    }
}

impl Default for ExclusiveSection {
    fn default() -> Self {
        Self::new()
    }
}

/// Closes the section on drop.
pub(crate) struct SectionGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ExclusiveSection,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ()>,
}

impl Drop for SectionGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let was_open = self.owner.open.replace(false);
            debug_assert!(was_open);
        }
    }
}
