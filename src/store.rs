//! Ordered backing stores consumed by the ranged algebra.

use crate::error::CollectionError;
use std::collections::VecDeque;

/// An ordered, indexable sequence with a single structural primitive.
///
/// `compact` removes the marked elements of one window in a single pass,
/// handing each removed element to `sink` in order and shifting the rest
/// left. Stores that cannot change length report that up front through
/// `ensure_resizable` so a request fails before any element is inspected.
pub trait OrderedStore<E> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, index: usize) -> Option<&E>;

    fn ensure_resizable(&self, _operation: &'static str) -> Result<(), CollectionError> {
        Ok(())
    }

    /// Remove every element `start + i` with `marked[i]` set.
    ///
    /// Callers guarantee `start + marked.len() <= self.len()`.
    fn compact<F>(&mut self, start: usize, marked: &[bool], sink: F) -> Result<(), CollectionError>
    where
        F: FnMut(E);
}

impl<E> OrderedStore<E> for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> Option<&E> {
        self.as_slice().get(index)
    }

    fn compact<F>(
        &mut self,
        start: usize,
        marked: &[bool],
        mut sink: F,
    ) -> Result<(), CollectionError>
    where
        F: FnMut(E),
    {
        let mut window = self.split_off(start);
        let tail = window.split_off(marked.len());
        for (e, &gone) in window.into_iter().zip(marked) {
            if gone {
                sink(e);
            } else {
                self.push(e);
            }
        }
        self.extend(tail);
        Ok(())
    }
}

impl<E> OrderedStore<E> for VecDeque<E> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn element(&self, index: usize) -> Option<&E> {
        VecDeque::get(self, index)
    }

    fn compact<F>(
        &mut self,
        start: usize,
        marked: &[bool],
        mut sink: F,
    ) -> Result<(), CollectionError>
    where
        F: FnMut(E),
    {
        let mut window = self.split_off(start);
        let tail = window.split_off(marked.len());
        for (e, &gone) in window.into_iter().zip(marked) {
            if gone {
                sink(e);
            } else {
                self.push_back(e);
            }
        }
        self.extend(tail);
        Ok(())
    }
}

/// Fixed-length view over a mutable slice.
///
/// Elements can be read and replaced; anything that would change the length
/// fails with `CollectionError::Unsupported`.
#[derive(Debug)]
pub struct FixedView<'a, E> {
    items: &'a mut [E],
}

impl<'a, E> FixedView<'a, E> {
    pub fn new(items: &'a mut [E]) -> Self {
        Self { items }
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.items.get(index)
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: E) -> Result<E, CollectionError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(CollectionError::IndexRange {
                start: index,
                end: index.saturating_add(1),
                len,
            }),
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        self.items
    }
}

impl<E> OrderedStore<E> for FixedView<'_, E> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn element(&self, index: usize) -> Option<&E> {
        self.items.get(index)
    }

    fn ensure_resizable(&self, operation: &'static str) -> Result<(), CollectionError> {
        Err(CollectionError::Unsupported { operation })
    }

    fn compact<F>(
        &mut self,
        _start: usize,
        _marked: &[bool],
        _sink: F,
    ) -> Result<(), CollectionError>
    where
        F: FnMut(E),
    {
        Err(CollectionError::Unsupported {
            operation: "compact",
        })
    }
}
