#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so the harness can
// assert on tombstone bookkeeping alongside the public behaviour.

use crate::chained_hash_map::ChainedHashMap;
use crate::config::MapConfig;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking converges on a few keys.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    RemoveLazy(usize),
    Get(usize),
    Peek(usize),
    Contains(String),
    ContainsValue(i32),
    Mutate(usize, i32),
    Iterate,
    Compact,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), -4i32..4).prop_map(|(i, v)| Op::Insert(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::RemoveLazy),
            idx.clone().prop_map(Op::Get),
            idx.clone().prop_map(Op::Peek),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(Op::Contains),
            (-4i32..4).prop_map(Op::ContainsValue),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            Just(Op::Iterate),
            Just(Op::Compact),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap:
// - insert returns the model's previous value; remove/remove_lazy return
//   the removed value.
// - get/peek/contains_key agree with the model whether or not a tombstone
//   sits in front of the key.
// - iteration yields exactly the model's keys; add_values yields `len` values.
// - a tombstone never outlives a lookup of its bucket; compact clears all.
fn run_state_machine<S: BuildHasher>(
    mut sut: ChainedHashMap<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let key = |i: usize| Key(pool[i].clone());

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = key(i);
                prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
            }
            Op::Remove(i) => {
                let k = key(i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
            }
            Op::RemoveLazy(i) => {
                let k = key(i);
                prop_assert_eq!(sut.remove_lazy(&k), model.remove(&k));
            }
            Op::Get(i) => {
                let k = key(i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            Op::Peek(i) => {
                let k = key(i);
                let tombstones = sut.tombstones();
                prop_assert_eq!(sut.peek(&k), model.get(&k));
                prop_assert_eq!(sut.tombstones(), tombstones, "peek must not mutate");
            }
            Op::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
            }
            Op::ContainsValue(v) => {
                let has_model = model.values().any(|&mv| mv == v);
                prop_assert_eq!(sut.contains_value(&v), has_model);
            }
            Op::Mutate(i, d) => {
                let k = key(i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", s, m),
                }
            }
            Op::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                let mut values = Vec::new();
                prop_assert_eq!(sut.add_values(&mut values), model.len());
            }
            Op::Compact => {
                let hollow = sut.tombstones();
                prop_assert_eq!(sut.compact(), hollow);
                prop_assert_eq!(sut.tombstones(), 0);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.iter().count(), model.len());
        prop_assert!(sut.tombstones() <= sut.bucket_count());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::with_hasher(RandomState::new()), pool, ops)?;
    }

    // A single starting bucket at load factor 1 forces rehashes while
    // tombstones are outstanding.
    #[test]
    fn prop_state_machine_with_growth((pool, ops) in arb_scenario()) {
        let config = MapConfig::new(1, 1.0).unwrap();
        run_state_machine(ChainedHashMap::with_config(config, RandomState::new()), pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}
