//! Bucket chains: singly-linked entry lists whose nodes live in one arena
//! shared by every bucket of a table.
//!
//! A `Chain` is only the head link of a bucket. All operations take the
//! arena explicitly, so the owning table decides where heads are stored and
//! when the bucket array is resized. Chains never grow on their own: `set`
//! reports a vacant key and leaves appending to the table.
//!
//! Hollow heads
//! - `remove_lazy` on the head takes the pair out and leaves the node in
//!   place as a tombstone. Only the head may be hollow; any other match is
//!   unlinked immediately.
//! - Lookups that meet a hollow head report `Lookup::HeadTombstoned`
//!   instead of an answer. The table then calls `detach_hollow_head`,
//!   stores the returned head in its slot and repeats the lookup.
//! - Structural operations (`remove`, `remove_lazy`, `append`) detach a
//!   hollow head themselves before traversing.
//!
//! Insertion order: new entries are appended at the tail, so chain order is
//! insertion order.

use core::borrow::Borrow;
use core::mem;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena handle of one chain entry.
    pub struct EntryKey;
}

#[derive(Debug)]
struct Entry<K, V> {
    hash: u64,
    // `None` marks a hollow head.
    pair: Option<(K, V)>,
    next: Option<EntryKey>,
}

impl<K, V> Entry<K, V> {
    #[inline]
    fn matches<Q>(&self, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.hash == hash && matches!(&self.pair, Some((k, _)) if k.borrow() == q)
    }
}

/// Storage for the entries of every chain of one table.
#[derive(Debug)]
pub struct EntryArena<K, V> {
    slots: SlotMap<EntryKey, Entry<K, V>>,
}

impl<K, V> EntryArena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of allocated nodes, hollow heads included.
    pub fn nodes(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    // Chain links only ever point at live slots.
    #[inline]
    fn node(&self, k: EntryKey) -> &Entry<K, V> {
        &self.slots[k]
    }

    #[inline]
    fn node_mut(&mut self, k: EntryKey) -> &mut Entry<K, V> {
        &mut self.slots[k]
    }

    pub(crate) fn value(&self, k: EntryKey) -> Option<&V> {
        self.slots
            .get(k)
            .and_then(|e| e.pair.as_ref())
            .map(|(_, v)| v)
    }

    pub(crate) fn value_mut(&mut self, k: EntryKey) -> Option<&mut V> {
        self.slots
            .get_mut(k)
            .and_then(|e| e.pair.as_mut())
            .map(|(_, v)| v)
    }

    /// Live pairs in arena order, values mutable.
    pub(crate) fn pairs_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.slots
            .values_mut()
            .filter_map(|e| e.pair.as_mut().map(|(k, v)| (&*k, v)))
    }

    /// Relink every live entry of `old` into `bucket_count` fresh chains.
    ///
    /// Entries keep their arena slot (no reallocation, handles stay valid)
    /// and their relative order within each new chain. Hollow heads are
    /// freed along the way.
    pub(crate) fn redistribute(&mut self, old: &[Chain], bucket_count: usize) -> Vec<Chain> {
        debug_assert!(bucket_count.is_power_of_two());
        let mut order = Vec::with_capacity(self.slots.len());
        for chain in old {
            let mut cur = chain.detach_hollow_head(self).head;
            while let Some(k) = cur {
                order.push(k);
                cur = self.node(k).next;
            }
        }

        let mut buckets = vec![Chain::EMPTY; bucket_count];
        let mut tails: Vec<Option<EntryKey>> = vec![None; bucket_count];
        for k in order {
            let idx = bucket_index(self.node(k).hash, bucket_count);
            self.node_mut(k).next = None;
            match tails[idx] {
                Some(t) => self.node_mut(t).next = Some(k),
                None => buckets[idx].head = Some(k),
            }
            tails[idx] = Some(k);
        }
        buckets
    }
}

impl<K, V> Default for EntryArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket for `hash` in a power-of-two bucket array.
#[inline]
pub(crate) fn bucket_index(hash: u64, bucket_count: usize) -> usize {
    (hash as usize) & (bucket_count - 1)
}

/// Outcome of a chain lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// The head is hollow; detach it and ask again.
    HeadTombstoned,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_tombstoned(&self) -> bool {
        matches!(self, Lookup::HeadTombstoned)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(t) => Lookup::Found(f(t)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::HeadTombstoned => Lookup::HeadTombstoned,
        }
    }
}

/// Outcome of `Chain::set`. Unless a value was replaced, the caller gets
/// its value back.
#[derive(Debug, PartialEq, Eq)]
pub enum SetOutcome<V> {
    /// Holds the previous value.
    Replaced(V),
    /// Key absent; append it through the table.
    Vacant(V),
    HeadTombstoned(V),
}

/// Head link of one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chain {
    head: Option<EntryKey>,
}

impl Chain {
    pub const EMPTY: Chain = Chain { head: None };

    pub fn head(&self) -> Option<EntryKey> {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// True only while the head is a tombstone.
    pub fn is_hollow<K, V>(&self, arena: &EntryArena<K, V>) -> bool {
        self.head.is_some_and(|h| arena.node(h).pair.is_none())
    }

    // Visit live entries in order until `visit` yields a result.
    fn walk<'a, K, V, R>(
        &self,
        arena: &'a EntryArena<K, V>,
        mut visit: impl FnMut(EntryKey, u64, &'a K, &'a V) -> Option<R>,
    ) -> Lookup<R> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let e = arena.node(k);
            match &e.pair {
                Some((key, value)) => {
                    if let Some(r) = visit(k, e.hash, key, value) {
                        return Lookup::Found(r);
                    }
                }
                None if cur == self.head => return Lookup::HeadTombstoned,
                None => debug_assert!(false, "hollow entry behind the chain head"),
            }
            cur = e.next;
        }
        Lookup::NotFound
    }

    /// Handle of the entry stored under `(hash, q)`. The key comparison runs
    /// only for entries whose stored hash equals `hash`.
    pub fn find<K, V, Q>(&self, arena: &EntryArena<K, V>, hash: u64, q: &Q) -> Lookup<EntryKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.walk(arena, |k, h, key, _| {
            (h == hash && key.borrow() == q).then_some(k)
        })
    }

    pub fn get<'a, K, V, Q>(&self, arena: &'a EntryArena<K, V>, hash: u64, q: &Q) -> Lookup<&'a V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.walk(arena, |_, h, key, value| {
            (h == hash && key.borrow() == q).then_some(value)
        })
    }

    pub fn get_mut<'a, K, V, Q>(
        &self,
        arena: &'a mut EntryArena<K, V>,
        hash: u64,
        q: &Q,
    ) -> Lookup<&'a mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self.find(arena, hash, q) {
            Lookup::Found(k) => arena.value_mut(k).map_or(Lookup::NotFound, Lookup::Found),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::HeadTombstoned => Lookup::HeadTombstoned,
        }
    }

    /// Overwrite the value stored under `(hash, q)`. Never links a new
    /// entry.
    pub fn set<K, V, Q>(
        &self,
        arena: &mut EntryArena<K, V>,
        hash: u64,
        q: &Q,
        value: V,
    ) -> SetOutcome<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self.find(arena, hash, q) {
            Lookup::Found(k) => match arena.value_mut(k) {
                Some(slot) => SetOutcome::Replaced(mem::replace(slot, value)),
                None => SetOutcome::Vacant(value),
            },
            Lookup::NotFound => SetOutcome::Vacant(value),
            Lookup::HeadTombstoned => SetOutcome::HeadTombstoned(value),
        }
    }

    pub fn has_key<K, V, Q>(&self, arena: &EntryArena<K, V>, hash: u64, q: &Q) -> Lookup<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.find(arena, hash, q).map(|_| ())
    }

    pub fn has_value<K, V>(&self, arena: &EntryArena<K, V>, value: &V) -> Lookup<()>
    where
        V: PartialEq,
    {
        self.walk(arena, |_, _, _, v| (v == value).then_some(()))
    }

    /// Unlink the entry stored under `(hash, q)`.
    ///
    /// Returns the chain's new head, which the table must store back into
    /// its slot, and the removed pair. A hollow head met on the way is freed.
    pub fn remove<K, V, Q>(
        self,
        arena: &mut EntryArena<K, V>,
        hash: u64,
        q: &Q,
    ) -> (Chain, Option<(K, V)>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut chain = self.detach_hollow_head(arena);
        let mut prev: Option<EntryKey> = None;
        let mut cur = chain.head;
        while let Some(k) = cur {
            let (hit, next) = {
                let e = arena.node(k);
                (e.matches(hash, q), e.next)
            };
            if hit {
                let removed = arena.slots.remove(k).and_then(|e| e.pair);
                match prev {
                    Some(p) => arena.node_mut(p).next = next,
                    None => chain.head = next,
                }
                return (chain, removed);
            }
            prev = Some(k);
            cur = next;
        }
        (chain, None)
    }

    /// Like `remove`, but a matching head is only hollowed out; its node
    /// stays linked until the next structural operation or until the table
    /// handles `HeadTombstoned`.
    pub fn remove_lazy<K, V, Q>(
        self,
        arena: &mut EntryArena<K, V>,
        hash: u64,
        q: &Q,
    ) -> (Chain, Option<(K, V)>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let chain = self.detach_hollow_head(arena);
        match chain.head {
            Some(h) if arena.node(h).matches(hash, q) => {
                let pair = arena.node_mut(h).pair.take();
                (chain, pair)
            }
            _ => chain.remove(arena, hash, q),
        }
    }

    /// Link a new entry at the tail and return the possibly new head.
    pub fn append<K, V>(self, arena: &mut EntryArena<K, V>, hash: u64, key: K, value: V) -> Chain {
        let chain = self.detach_hollow_head(arena);
        let tail = chain.tail(arena);
        let node = arena.slots.insert(Entry {
            hash,
            pair: Some((key, value)),
            next: None,
        });
        match tail {
            Some(t) => {
                arena.node_mut(t).next = Some(node);
                chain
            }
            None => Chain { head: Some(node) },
        }
    }

    /// Free a hollow head and return the chain that starts at its
    /// successor. A live or absent head is returned unchanged.
    pub fn detach_hollow_head<K, V>(self, arena: &mut EntryArena<K, V>) -> Chain {
        match self.head {
            Some(h) if arena.node(h).pair.is_none() => Chain {
                head: arena.slots.remove(h).and_then(|e| e.next),
            },
            _ => self,
        }
    }

    /// Read-only view that starts past a hollow head.
    pub fn skip_hollow_head<K, V>(&self, arena: &EntryArena<K, V>) -> Chain {
        match self.head {
            Some(h) if arena.node(h).pair.is_none() => Chain {
                head: arena.node(h).next,
            },
            _ => *self,
        }
    }

    fn tail<K, V>(&self, arena: &EntryArena<K, V>) -> Option<EntryKey> {
        let mut cur = self.head?;
        while let Some(next) = arena.node(cur).next {
            cur = next;
        }
        Some(cur)
    }

    /// Append clones of every live value to `dest` in chain order; returns
    /// how many were appended.
    pub fn add_values<K, V, D>(&self, arena: &EntryArena<K, V>, dest: &mut D) -> usize
    where
        V: Clone,
        D: Extend<V>,
    {
        let mut appended = 0;
        dest.extend(self.iter(arena).map(|(_, v)| {
            appended += 1;
            v.clone()
        }));
        appended
    }

    pub fn iter<'a, K, V>(&self, arena: &'a EntryArena<K, V>) -> ChainIter<'a, K, V> {
        ChainIter {
            arena,
            cur: self.head,
        }
    }

    /// Live entries; a hollow head does not count.
    pub fn len<K, V>(&self, arena: &EntryArena<K, V>) -> usize {
        self.iter(arena).count()
    }
}

/// Live pairs of one chain, in chain order.
pub struct ChainIter<'a, K, V> {
    arena: &'a EntryArena<K, V>,
    cur: Option<EntryKey>,
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let e = self.arena.node(self.cur?);
            self.cur = e.next;
            if let Some((k, v)) = &e.pair {
                return Some((k, v));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn chain_of(
        arena: &mut EntryArena<&'static str, i32>,
        items: &[(u64, &'static str, i32)],
    ) -> Chain {
        items
            .iter()
            .fold(Chain::EMPTY, |c, &(h, k, v)| c.append(arena, h, k, v))
    }

    fn pairs(chain: Chain, arena: &EntryArena<&'static str, i32>) -> Vec<(&'static str, i32)> {
        chain.iter(arena).map(|(k, v)| (*k, *v)).collect()
    }

    /// Invariant: an empty chain answers NotFound and never signals.
    #[test]
    fn empty_chain_is_not_found() {
        let arena: EntryArena<&str, i32> = EntryArena::new();
        let c = Chain::EMPTY;
        assert_eq!(c.get(&arena, 1, "a"), Lookup::NotFound);
        assert_eq!(c.has_key(&arena, 1, "a"), Lookup::NotFound);
        assert_eq!(c.has_value(&arena, &1), Lookup::NotFound);
        assert!(!c.is_hollow(&arena));
        assert_eq!(c.len(&arena), 0);
    }

    /// Invariant: entries are appended at the tail; iteration and
    /// `add_values` follow insertion order.
    #[test]
    fn append_keeps_insertion_order() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(7, "a", 1), (7, "b", 2), (7, "c", 3)]);
        assert_eq!(pairs(c, &arena), vec![("a", 1), ("b", 2), ("c", 3)]);

        let mut out = vec![0];
        assert_eq!(c.add_values(&arena, &mut out), 3);
        assert_eq!(out, vec![0, 1, 2, 3]);
    }

    /// Invariant: lookups match on stored hash and key together.
    #[test]
    fn lookup_requires_hash_and_key() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 10), (2, "b", 20)]);
        assert_eq!(c.get(&arena, 1, "a"), Lookup::Found(&10));
        assert_eq!(c.get(&arena, 2, "b"), Lookup::Found(&20));
        assert_eq!(c.get(&arena, 2, "a"), Lookup::NotFound);
        assert!(c.has_key(&arena, 1, "a").is_found());
        assert!(c.has_value(&arena, &20).is_found());
        assert!(!c.has_value(&arena, &30).is_found());
    }

    /// Invariant: key equality is not evaluated for entries whose hash
    /// differs from the lookup hash.
    #[test]
    fn key_eq_skipped_on_hash_mismatch() {
        thread_local!(static EQ_CALLS: Cell<usize> = const { Cell::new(0) });

        #[derive(Debug)]
        struct Counted(u32);
        impl PartialEq for Counted {
            fn eq(&self, other: &Self) -> bool {
                EQ_CALLS.with(|c| c.set(c.get() + 1));
                self.0 == other.0
            }
        }
        impl Eq for Counted {}

        let mut arena = EntryArena::new();
        let c = Chain::EMPTY
            .append(&mut arena, 1, Counted(1), ())
            .append(&mut arena, 2, Counted(2), ())
            .append(&mut arena, 3, Counted(3), ());

        EQ_CALLS.with(|c| c.set(0));
        assert!(c.get(&arena, 3, &Counted(3)).is_found());
        assert_eq!(EQ_CALLS.with(|c| c.get()), 1);

        EQ_CALLS.with(|c| c.set(0));
        assert!(!c.get(&arena, 9, &Counted(3)).is_found());
        assert_eq!(EQ_CALLS.with(|c| c.get()), 0);
    }

    /// Invariant: `set` on an existing key returns the old value, later
    /// lookups see the new one and the chain length is unchanged.
    #[test]
    fn set_overwrites_in_place() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 1), (1, "b", 2)]);
        assert_eq!(c.set(&mut arena, 1, "b", 20), SetOutcome::Replaced(2));
        assert_eq!(c.get(&arena, 1, "b"), Lookup::Found(&20));
        assert_eq!(c.len(&arena), 2);
        assert_eq!(arena.nodes(), 2);
    }

    /// Invariant: `set` on a missing key hands the value back and does not
    /// grow the chain.
    #[test]
    fn set_on_missing_key_does_not_grow() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 1)]);
        assert_eq!(c.set(&mut arena, 1, "z", 9), SetOutcome::Vacant(9));
        assert_eq!(c.len(&arena), 1);
        assert_eq!(arena.nodes(), 1);
    }

    /// Invariant: removing the head yields the successor as the new head;
    /// removing an inner entry keeps the head.
    #[test]
    fn remove_head_and_inner() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 1), (1, "b", 2), (1, "c", 3)]);
        let old_head = c.head();

        let (c, removed) = c.remove(&mut arena, 1, "b");
        assert_eq!(removed, Some(("b", 2)));
        assert_eq!(c.head(), old_head);
        assert_eq!(pairs(c, &arena), vec![("a", 1), ("c", 3)]);

        let (c, removed) = c.remove(&mut arena, 1, "a");
        assert_eq!(removed, Some(("a", 1)));
        assert_ne!(c.head(), old_head);
        assert_eq!(pairs(c, &arena), vec![("c", 3)]);

        let (c, removed) = c.remove(&mut arena, 1, "missing");
        assert_eq!(removed, None);

        let (c, removed) = c.remove(&mut arena, 1, "c");
        assert_eq!(removed, Some(("c", 3)));
        assert!(c.is_empty());
        assert_eq!(arena.nodes(), 0);
    }

    /// Invariant: a lazily removed single-entry chain signals on every
    /// lookup until the head is detached, after which the chain is empty.
    #[test]
    fn hollow_single_entry_signals_then_detaches() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(5, "only", 1)]);
        let (c, removed) = c.remove_lazy(&mut arena, 5, "only");
        assert_eq!(removed, Some(("only", 1)));
        assert!(c.is_hollow(&arena));
        assert_eq!(arena.nodes(), 1);
        assert_eq!(c.len(&arena), 0);

        assert_eq!(c.get(&arena, 5, "only"), Lookup::HeadTombstoned);
        assert_eq!(c.get(&arena, 99, "other"), Lookup::HeadTombstoned);
        assert!(c.has_key(&arena, 5, "only").is_tombstoned());
        assert!(c.has_value(&arena, &1).is_tombstoned());
        assert!(matches!(
            c.set(&mut arena, 5, "only", 2),
            SetOutcome::HeadTombstoned(2)
        ));

        let c = c.detach_hollow_head(&mut arena);
        assert!(c.is_empty());
        assert_eq!(arena.nodes(), 0);
        assert_eq!(c.get(&arena, 5, "only"), Lookup::NotFound);
    }

    /// Invariant: only the head can become hollow; a lazy remove of an
    /// inner entry unlinks it immediately.
    #[test]
    fn lazy_remove_of_inner_entry_unlinks() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 1), (1, "b", 2)]);
        let (c, removed) = c.remove_lazy(&mut arena, 1, "b");
        assert_eq!(removed, Some(("b", 2)));
        assert!(!c.is_hollow(&arena));
        assert_eq!(arena.nodes(), 1);
        assert_eq!(pairs(c, &arena), vec![("a", 1)]);
    }

    /// Invariant: a hollow head is skipped by iteration and by `add_values`,
    /// and `skip_hollow_head` answers lookups without mutating.
    #[test]
    fn hollow_head_is_invisible_to_readers() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 1), (1, "b", 2)]);
        let (c, _) = c.remove_lazy(&mut arena, 1, "a");
        assert_eq!(pairs(c, &arena), vec![("b", 2)]);

        let mut out = Vec::new();
        assert_eq!(c.add_values(&arena, &mut out), 1);
        assert_eq!(out, vec![2]);

        let view = c.skip_hollow_head(&arena);
        assert_eq!(view.get(&arena, 1, "b"), Lookup::Found(&2));
        assert!(c.is_hollow(&arena));
    }

    /// Invariant: structural operations compact a hollow head before
    /// traversing.
    #[test]
    fn structural_ops_compact_hollow_head() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 1), (1, "b", 2)]);
        let (c, _) = c.remove_lazy(&mut arena, 1, "a");
        let c = c.append(&mut arena, 1, "c", 3);
        assert!(!c.is_hollow(&arena));
        assert_eq!(arena.nodes(), 2);
        assert_eq!(pairs(c, &arena), vec![("b", 2), ("c", 3)]);

        let (c, _) = c.remove_lazy(&mut arena, 1, "b");
        let (c, removed) = c.remove(&mut arena, 1, "nope");
        assert_eq!(removed, None);
        assert!(!c.is_hollow(&arena));
        assert_eq!(arena.nodes(), 1);
    }

    /// Invariant: a hollow head never matches a key, even its former one.
    #[test]
    fn hollow_head_never_matches() {
        let mut arena = EntryArena::new();
        let c = chain_of(&mut arena, &[(1, "a", 1)]);
        let (c, _) = c.remove_lazy(&mut arena, 1, "a");
        let (c, removed) = c.remove(&mut arena, 1, "a");
        assert_eq!(removed, None);
        assert!(c.is_empty());
    }

    /// Invariant: redistribution keeps per-bucket relative order, drops
    /// hollow heads and keeps handles valid.
    #[test]
    fn redistribute_preserves_order() {
        let mut arena = EntryArena::new();
        let c0 = chain_of(&mut arena, &[(0, "a", 1), (2, "b", 2), (4, "c", 3)]);
        let c1 = chain_of(&mut arena, &[(1, "d", 4), (3, "e", 5)]);
        let (c1, _) = c1.remove_lazy(&mut arena, 1, "d");
        let e_key = c1
            .skip_hollow_head(&arena)
            .find(&arena, 3, "e")
            .found()
            .unwrap();

        let buckets = arena.redistribute(&[c0, c1], 4);
        assert_eq!(buckets.len(), 4);
        assert_eq!(arena.nodes(), 4);
        assert_eq!(pairs(buckets[0], &arena), vec![("a", 1), ("c", 3)]);
        assert_eq!(pairs(buckets[1], &arena), vec![]);
        assert_eq!(pairs(buckets[2], &arena), vec![("b", 2)]);
        assert_eq!(pairs(buckets[3], &arena), vec![("e", 5)]);
        assert_eq!(arena.value(e_key), Some(&5));
    }
}
