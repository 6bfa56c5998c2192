//! xcollections: a separate-chaining hash map whose bucket heads can be
//! tombstoned, and range-qualified bulk mutation for ordered sequences.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the two algorithmic pieces small and independently
//!   testable, with the owning containers doing the bookkeeping.
//! - Layers:
//!   - `Chain`: the head link of one bucket. Entries live in an
//!     `EntryArena` (generational slot map) and are linked by arena handle.
//!     Lookups return a tagged `Lookup` so a tombstoned head is reported
//!     instead of answered.
//!   - `ChainedHashMap<K, V, S>`: the owning table. Computes bucket indices,
//!     stores chain heads, grows and rehashes, and handles
//!     `Lookup::HeadTombstoned` by detaching the head and probing again.
//!   - `RangedMutation<E>`: remove / retain / reduce / remove-duplicates /
//!     move-to over `[start, end)` of any `OrderedStore`, with skip/limit
//!     `Window`s over the matches and pluggable `Equalator`s.
//!
//! Constraints
//! - Single-threaded. The table is `!Send`/`!Sync`; callers that share one
//!   must serialise access themselves.
//! - Each entry stores its `u64` hash; `K: Hash` runs once per insert or
//!   lookup and never during a rehash.
//! - Key equality only runs on entries whose stored hash matches.
//! - Only a chain head may be hollow. An empty bucket is an empty `Chain`,
//!   never a lone tombstone that has been observed by a lookup.
//! - Bulk mutation either fails before touching the store or completes;
//!   there is no partial compaction.
//!
//! Hollow heads
//! - `remove_lazy` takes the pair out of a matching head but leaves the node
//!   linked. The next `get`, `insert`, `contains_*` or structural operation
//!   on that bucket frees it; `peek` reads past it without mutating.
//!
//! Reentrancy policy
//! - Table entry points open a debug-only exclusive section before touching
//!   a chain; user code (`Eq`/`Hash`/`PartialEq` on values) calling back into
//!   the same table panics in debug builds. Removed pairs are handed back
//!   after the section closes, so their `Drop` may reenter.
//!
//! Notes and non-goals
//! - Insertion order within a bucket is append-at-tail.
//! - No weak-reference views or per-thread caches.
//! - `FixedView` is the only length-preserving store provided; it exists so
//!   structural requests can be refused with `CollectionError::Unsupported`.

pub mod chain;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
pub mod config;
pub mod equalator;
pub mod error;
pub mod ranged;
mod reentrancy;
pub mod store;

// Public surface
pub use chain::{Chain, EntryArena, EntryKey, Lookup, SetOutcome};
pub use chained_hash_map::ChainedHashMap;
pub use config::MapConfig;
pub use equalator::{ByKey, Equalator, NaturalEq, Nullable};
pub use error::{CollectionError, ConfigError};
pub use ranged::{RangedMutation, Window};
pub use store::{FixedView, OrderedStore};
