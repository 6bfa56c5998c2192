//! Range-qualified bulk mutation over ordered stores.
//!
//! Every operation works on a half-open index range of the store:
//! - The range is validated first (`start <= end <= len`); a bad range, or a
//!   store that cannot change length, fails before any element is looked at.
//! - The range is then scanned once, left to right, and each element is
//!   tested against the operation's criterion. A `Window` decides which of
//!   the matches are acted upon; it never changes which elements are
//!   scanned.
//! - Finally the acted-upon elements are removed in one compaction. The
//!   relative order of everything else is preserved.

use crate::equalator::{Equalator, NaturalEq, Nullable};
use crate::error::CollectionError;
use crate::store::OrderedStore;
use core::ops::Range;
use tracing::trace;

/// Selects which matches of a scan are acted upon: the first `skip` are
/// passed over, then at most `limit` (unbounded when `None`) are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    skip: usize,
    limit: Option<usize>,
}

impl Window {
    pub const ALL: Window = Window {
        skip: 0,
        limit: None,
    };

    pub const fn new(skip: usize, limit: Option<usize>) -> Self {
        Self { skip, limit }
    }

    pub const fn skipping(skip: usize) -> Self {
        Self { skip, limit: None }
    }

    pub const fn first(limit: usize) -> Self {
        Self {
            skip: 0,
            limit: Some(limit),
        }
    }

    pub const fn with_limit(self, limit: usize) -> Self {
        Self {
            skip: self.skip,
            limit: Some(limit),
        }
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn admission(self) -> Admission {
        Admission {
            window: self,
            seen: 0,
            acted: 0,
        }
    }
}

// Counts matches as a scan reports them.
struct Admission {
    window: Window,
    seen: usize,
    acted: usize,
}

impl Admission {
    fn admit(&mut self) -> bool {
        let ordinal = self.seen;
        self.seen += 1;
        if ordinal < self.window.skip || self.window.limit.is_some_and(|l| self.acted >= l) {
            return false;
        }
        self.acted += 1;
        true
    }
}

fn check_range<E, S>(
    store: &S,
    range: &Range<usize>,
    operation: &'static str,
) -> Result<(), CollectionError>
where
    S: OrderedStore<E> + ?Sized,
{
    let len = store.len();
    if range.start > range.end || range.end > len {
        return Err(CollectionError::IndexRange {
            start: range.start,
            end: range.end,
            len,
        });
    }
    store.ensure_resizable(operation)
}

fn mark<E, S, P>(store: &S, range: Range<usize>, window: Window, mut is_match: P) -> Vec<bool>
where
    S: OrderedStore<E> + ?Sized,
    P: FnMut(&E) -> bool,
{
    let mut admission = window.admission();
    range
        .filter_map(|i| store.element(i))
        .map(|e| is_match(e) && admission.admit())
        .collect()
}

fn apply<E, S, F>(
    store: &mut S,
    start: usize,
    marked: &[bool],
    operation: &'static str,
    sink: F,
) -> Result<usize, CollectionError>
where
    S: OrderedStore<E> + ?Sized,
    F: FnMut(E),
{
    let removed = marked.iter().filter(|&&m| m).count();
    if removed > 0 {
        store.compact(start, marked, sink)?;
    }
    trace!(
        operation,
        start,
        scanned = marked.len(),
        removed,
        "ranged mutation"
    );
    Ok(removed)
}

fn remove_matching<E, S, P>(
    store: &mut S,
    range: Range<usize>,
    operation: &'static str,
    window: Window,
    predicate: P,
) -> Result<usize, CollectionError>
where
    S: OrderedStore<E> + ?Sized,
    P: FnMut(&E) -> bool,
{
    check_range(store, &range, operation)?;
    let start = range.start;
    let marked = mark(store, range, window, predicate);
    apply(store, start, &marked, operation, drop::<E>)
}

/// Bulk removal over index ranges. Implemented for every `OrderedStore`.
pub trait RangedMutation<E>: OrderedStore<E> {
    /// Remove elements equal to `element` within `range`, windowed.
    /// Returns how many were removed.
    fn rng_remove(
        &mut self,
        range: Range<usize>,
        element: &E,
        window: Window,
    ) -> Result<usize, CollectionError>
    where
        E: PartialEq,
    {
        self.rng_remove_with(range, element, &NaturalEq, window)
    }

    fn rng_remove_with<Q>(
        &mut self,
        range: Range<usize>,
        element: &E,
        equalator: &Q,
        window: Window,
    ) -> Result<usize, CollectionError>
    where
        Q: Equalator<E> + ?Sized,
    {
        remove_matching(self, range, "rng_remove", window, |e| {
            equalator.equal(element, e)
        })
    }

    /// Remove every element of `range` that has no equal in `retained`.
    fn rng_retain_all(
        &mut self,
        range: Range<usize>,
        retained: &[E],
    ) -> Result<usize, CollectionError>
    where
        E: PartialEq,
    {
        self.rng_retain_all_with(range, retained, &NaturalEq)
    }

    fn rng_retain_all_with<Q>(
        &mut self,
        range: Range<usize>,
        retained: &[E],
        equalator: &Q,
    ) -> Result<usize, CollectionError>
    where
        Q: Equalator<E> + ?Sized,
    {
        remove_matching(self, range, "rng_retain_all", Window::ALL, |e| {
            !retained.iter().any(|r| equalator.equal(r, e))
        })
    }

    /// Keep the first element of each equivalence class within `range` and
    /// remove the later ones. With `ignore_nulls` every null is kept and
    /// never counts as a representative.
    fn rng_remove_duplicates(
        &mut self,
        range: Range<usize>,
        ignore_nulls: bool,
    ) -> Result<usize, CollectionError>
    where
        E: PartialEq + Nullable,
    {
        self.rng_remove_duplicates_with(range, ignore_nulls, &NaturalEq)
    }

    fn rng_remove_duplicates_with<Q>(
        &mut self,
        range: Range<usize>,
        ignore_nulls: bool,
        equalator: &Q,
    ) -> Result<usize, CollectionError>
    where
        E: Nullable,
        Q: Equalator<E> + ?Sized,
    {
        const OP: &str = "rng_remove_duplicates";
        check_range(self, &range, OP)?;
        let start = range.start;
        let marked: Vec<bool> = {
            let store: &Self = self;
            let mut kept: Vec<&E> = Vec::new();
            range
                .filter_map(|i| store.element(i))
                .map(|e| {
                    if ignore_nulls && e.is_null() {
                        return false;
                    }
                    if kept.iter().any(|k| equalator.equal(k, e)) {
                        return true;
                    }
                    kept.push(e);
                    false
                })
                .collect()
        };
        apply(self, start, &marked, OP, drop::<E>)
    }

    /// Remove elements satisfying `predicate` within `range`, windowed.
    fn rng_reduce<P>(
        &mut self,
        range: Range<usize>,
        predicate: P,
        window: Window,
    ) -> Result<usize, CollectionError>
    where
        P: FnMut(&E) -> bool,
    {
        remove_matching(self, range, "rng_reduce", window, predicate)
    }

    /// Move elements satisfying `predicate` within `range` to the end of
    /// `target`, in encounter order. Returns `target`.
    fn rng_move_to<'t, C, P>(
        &mut self,
        range: Range<usize>,
        target: &'t mut C,
        predicate: P,
        window: Window,
    ) -> Result<&'t mut C, CollectionError>
    where
        C: Extend<E>,
        P: FnMut(&E) -> bool,
    {
        const OP: &str = "rng_move_to";
        check_range(self, &range, OP)?;
        let start = range.start;
        let marked = mark(self, range, window, predicate);
        let mut moved: Vec<E> = Vec::new();
        apply(self, start, &marked, OP, |e| moved.push(e))?;
        target.extend(moved);
        Ok(target)
    }

    fn remove_all(&mut self, element: &E) -> Result<usize, CollectionError>
    where
        E: PartialEq,
    {
        let len = self.len();
        self.rng_remove(0..len, element, Window::ALL)
    }

    fn remove_all_with<Q>(&mut self, element: &E, equalator: &Q) -> Result<usize, CollectionError>
    where
        Q: Equalator<E> + ?Sized,
    {
        let len = self.len();
        self.rng_remove_with(0..len, element, equalator, Window::ALL)
    }

    fn retain_all(&mut self, retained: &[E]) -> Result<usize, CollectionError>
    where
        E: PartialEq,
    {
        let len = self.len();
        self.rng_retain_all(0..len, retained)
    }

    fn retain_all_with<Q>(
        &mut self,
        retained: &[E],
        equalator: &Q,
    ) -> Result<usize, CollectionError>
    where
        Q: Equalator<E> + ?Sized,
    {
        let len = self.len();
        self.rng_retain_all_with(0..len, retained, equalator)
    }

    fn remove_duplicates(&mut self, ignore_nulls: bool) -> Result<usize, CollectionError>
    where
        E: PartialEq + Nullable,
    {
        let len = self.len();
        self.rng_remove_duplicates(0..len, ignore_nulls)
    }

    fn remove_duplicates_with<Q>(
        &mut self,
        ignore_nulls: bool,
        equalator: &Q,
    ) -> Result<usize, CollectionError>
    where
        E: Nullable,
        Q: Equalator<E> + ?Sized,
    {
        let len = self.len();
        self.rng_remove_duplicates_with(0..len, ignore_nulls, equalator)
    }

    fn reduce<P>(&mut self, predicate: P) -> Result<usize, CollectionError>
    where
        P: FnMut(&E) -> bool,
    {
        let len = self.len();
        self.rng_reduce(0..len, predicate, Window::ALL)
    }

    fn move_to<'t, C, P>(
        &mut self,
        target: &'t mut C,
        predicate: P,
    ) -> Result<&'t mut C, CollectionError>
    where
        C: Extend<E>,
        P: FnMut(&E) -> bool,
    {
        let len = self.len();
        self.rng_move_to(0..len, target, predicate, Window::ALL)
    }
}

impl<E, S> RangedMutation<E> for S where S: OrderedStore<E> + ?Sized {}
