//! ChainedHashMap: separate-chaining table over `Chain` buckets.
//!
//! The table owns the bucket array and the entry arena. Chains report a
//! tombstoned head through `Lookup::HeadTombstoned` / `SetOutcome`; the
//! table detaches the head, writes the new head back into the slot and
//! repeats the lookup, all inside the same `&mut self` call.

use crate::chain::{bucket_index, Chain, ChainIter, EntryArena, Lookup, SetOutcome};
use crate::config::{buckets_for, MapConfig};
use crate::reentrancy::ExclusiveSection;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;
use tracing::{debug, trace};

pub struct ChainedHashMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<Chain>,
    entries: EntryArena<K, V>,
    len: usize,
    max_load_factor: f32,
    section: ExclusiveSection,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(MapConfig::with_capacity(capacity), Default::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

// Query bucket `idx` until it answers without a tombstone, detaching the
// hollow head each time one is reported.
fn resolve<K, V, R>(
    buckets: &mut [Chain],
    entries: &mut EntryArena<K, V>,
    idx: usize,
    lookup: impl Fn(Chain, &EntryArena<K, V>) -> Lookup<R>,
) -> Option<R> {
    loop {
        match lookup(buckets[idx], entries) {
            Lookup::Found(r) => return Some(r),
            Lookup::NotFound => return None,
            Lookup::HeadTombstoned => detach_head(buckets, entries, idx),
        }
    }
}

fn detach_head<K, V>(buckets: &mut [Chain], entries: &mut EntryArena<K, V>, idx: usize) {
    buckets[idx] = buckets[idx].detach_hollow_head(entries);
    trace!(bucket = idx, "detached tombstoned chain head");
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config(MapConfig::default(), hasher)
    }

    pub fn with_config(config: MapConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: vec![Chain::EMPTY; config.initial_buckets()],
            entries: EntryArena::with_capacity(config.initial_buckets()),
            len: 0,
            max_load_factor: config.max_load_factor(),
            section: ExclusiveSection::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Hollow heads still linked into a bucket.
    pub fn tombstones(&self) -> usize {
        self.entries.nodes() - self.len
    }

    /// Look up `q`, detaching a tombstoned head of its bucket on the way.
    pub fn get<Q>(&mut self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _s = self.section.enter();
        let hash = self.make_hash(q);
        let idx = bucket_index(hash, self.buckets.len());
        let k = resolve(&mut self.buckets, &mut self.entries, idx, |c, e| {
            c.find(e, hash, q)
        })?;
        self.entries.value(k)
    }

    /// Read-only lookup. Steps over a tombstoned head without detaching it.
    pub fn peek<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _s = self.section.enter();
        let hash = self.make_hash(q);
        let idx = bucket_index(hash, self.buckets.len());
        self.buckets[idx]
            .skip_hollow_head(&self.entries)
            .get(&self.entries, hash, q)
            .found()
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _s = self.section.enter();
        let hash = self.make_hash(q);
        let idx = bucket_index(hash, self.buckets.len());
        let k = resolve(&mut self.buckets, &mut self.entries, idx, |c, e| {
            c.find(e, hash, q)
        })?;
        self.entries.value_mut(k)
    }

    pub fn contains_key<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _s = self.section.enter();
        let hash = self.make_hash(q);
        let idx = bucket_index(hash, self.buckets.len());
        resolve(&mut self.buckets, &mut self.entries, idx, |c, e| {
            c.has_key(e, hash, q)
        })
        .is_some()
    }

    /// Linear scan over every bucket.
    pub fn contains_value(&mut self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let _s = self.section.enter();
        (0..self.buckets.len()).any(|idx| {
            resolve(&mut self.buckets, &mut self.entries, idx, |c, e| {
                c.has_value(e, value)
            })
            .is_some()
        })
    }

    /// Insert or overwrite. Returns the previous value for an existing key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let s = self.section.enter();
        let hash = self.make_hash(&key);
        let idx = bucket_index(hash, self.buckets.len());
        let mut value = value;
        loop {
            match self.buckets[idx].set(&mut self.entries, hash, &key, value) {
                SetOutcome::Replaced(old) => return Some(old),
                SetOutcome::Vacant(v) => {
                    value = v;
                    break;
                }
                SetOutcome::HeadTombstoned(v) => {
                    value = v;
                    detach_head(&mut self.buckets, &mut self.entries, idx);
                }
            }
        }
        self.buckets[idx] = self.buckets[idx].append(&mut self.entries, hash, key, value);
        self.len += 1;
        drop(s);
        self.grow_if_needed();
        None
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    /// Unlink and free the entry for `q`. The pair is returned after the
    /// bucket is consistent again, so its `Drop` may call back into the map.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _s = self.section.enter();
        let hash = self.make_hash(q);
        let idx = bucket_index(hash, self.buckets.len());
        let (chain, removed) = self.buckets[idx].remove(&mut self.entries, hash, q);
        self.buckets[idx] = chain;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Remove `q` without unlinking a matching bucket head: the head is left
    /// hollow and freed by the next access to that bucket (or `compact`).
    pub fn remove_lazy<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _s = self.section.enter();
        let hash = self.make_hash(q);
        let idx = bucket_index(hash, self.buckets.len());
        let (chain, removed) = self.buckets[idx].remove_lazy(&mut self.entries, hash, q);
        self.buckets[idx] = chain;
        if removed.is_some() {
            self.len -= 1;
            if chain.is_hollow(&self.entries) {
                trace!(bucket = idx, "left chain head hollow");
            }
        }
        drop(_s);
        removed.map(|(_, v)| v)
    }

    /// Free every hollow head. Returns how many were detached.
    pub fn compact(&mut self) -> usize {
        let _s = self.section.enter();
        let mut detached = 0;
        for chain in self.buckets.iter_mut() {
            if chain.is_hollow(&self.entries) {
                *chain = chain.detach_hollow_head(&mut self.entries);
                detached += 1;
            }
        }
        if detached > 0 {
            debug!(detached, "compacted tombstoned chain heads");
        }
        detached
    }

    /// Make room for `additional` more entries without a rehash.
    pub fn reserve(&mut self, additional: usize) {
        let wanted = buckets_for(self.len.saturating_add(additional), self.max_load_factor);
        if wanted > self.buckets.len() {
            self.rehash(wanted);
        }
    }

    fn grow_if_needed(&mut self) {
        if self.len as f32 > self.buckets.len() as f32 * self.max_load_factor {
            self.rehash(self.buckets.len() * 2);
        }
    }

    fn rehash(&mut self, bucket_count: usize) {
        let _s = self.section.enter();
        let old = core::mem::take(&mut self.buckets);
        self.buckets = self.entries.redistribute(&old, bucket_count);
        debug!(
            from = old.len(),
            to = bucket_count,
            len = self.len,
            "rehashed chained table"
        );
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Append clones of all values to `dest`, bucket by bucket and in chain
    /// order within a bucket. Returns how many were appended.
    pub fn add_values<D>(&self, dest: &mut D) -> usize
    where
        V: Clone,
        D: Extend<V>,
    {
        self.buckets
            .iter()
            .map(|c| c.add_values(&self.entries, dest))
            .sum()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            entries: &self.entries,
            current: None,
            remaining: self.len,
        }
    }

    /// Mutable access to every value, in unspecified order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.pairs_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.fill(Chain::EMPTY);
        self.len = 0;
    }
}

/// Live pairs, bucket by bucket.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain>,
    entries: &'a EntryArena<K, V>,
    current: Option<ChainIter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(pair);
            }
            self.current = Some(self.buckets.next()?.iter(self.entries));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
