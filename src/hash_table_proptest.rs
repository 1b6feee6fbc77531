#![cfg(test)]

// Property tests for SymTableHash kept inside the crate so they can check the
// bucket placement invariant through crate-private accessors.

use crate::hash_table::SymTableHash;
use crate::schedule::Schedule;
use crate::table::{PutError, SymTable};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Tiny schedule so a few dozen keys walk the table through every growth step.
static TINY: [usize; 5] = [1, 2, 3, 7, 13];

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, usize),
    Replace(usize, usize),
    Remove(usize),
    Get(usize),
    Contains(String),
    Map,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let val = 0usize..VALUES.len();
        let op = prop_oneof![
            3 => (idx.clone(), val.clone()).prop_map(|(i, v)| Op::Put(i, v)),
            1 => (idx.clone(), val).prop_map(|(i, v)| Op::Replace(i, v)),
            1 => idx.clone().prop_map(Op::Remove),
            1 => idx.prop_map(Op::Get),
            1 => "[a-z]{0,4}".prop_map(Op::Contains),
            1 => Just(Op::Map),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

static VALUES: [i64; 8] = [0, 1, -1, 7, 42, 1000, i64::MIN, i64::MAX];

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate puts are rejected and leave the stored value untouched.
// - `replace`/`remove` return the exact reference that was stored.
// - Absent keys report `None`/false and change nothing.
// - `map` visits every binding exactly once.
// - After every op, each key lives in the bucket its hash selects and `len`
//   matches both the chains and the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: SymTableHash<'static, i64> =
            SymTableHash::with_schedule(Schedule::new(&TINY).unwrap());
        let mut model: HashMap<String, &'static i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(i, v) => {
                    let k = &pool[i];
                    let res = sut.put(k, &VALUES[v]);
                    if let Some(&prev) = model.get(k) {
                        prop_assert_eq!(res, Err(PutError::DuplicateKey));
                        prop_assert!(core::ptr::eq(sut.get(k).unwrap(), prev));
                    } else {
                        prop_assert_eq!(res, Ok(()));
                        model.insert(k.clone(), &VALUES[v]);
                    }
                }
                Op::Replace(i, v) => {
                    let k = &pool[i];
                    let got = sut.replace(k, &VALUES[v]);
                    match model.get_mut(k) {
                        Some(slot) => {
                            prop_assert!(got.is_some_and(|g| core::ptr::eq(g, *slot)));
                            *slot = &VALUES[v];
                        }
                        None => prop_assert!(got.is_none()),
                    }
                }
                Op::Remove(i) => {
                    let k = &pool[i];
                    let got = sut.remove(k);
                    match model.remove(k) {
                        Some(prev) => prop_assert!(got.is_some_and(|g| core::ptr::eq(g, prev))),
                        None => prop_assert!(got.is_none()),
                    }
                    prop_assert!(!sut.contains(k));
                }
                Op::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k).copied());
                }
                Op::Contains(s) => {
                    prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
                }
                Op::Map => {
                    let mut seen: Vec<String> = Vec::new();
                    sut.map(|k, _, acc: &mut Vec<String>| acc.push(k.to_string()), &mut seen);
                    let unique: BTreeSet<String> = seen.iter().cloned().collect();
                    prop_assert_eq!(unique.len(), seen.len(), "map visited a binding twice");
                    let expected: BTreeSet<String> = model.keys().cloned().collect();
                    prop_assert_eq!(unique, expected);
                }
            }

            sut.assert_placement();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Property: the bucket count only ever moves forward through the schedule and
// equals the size a table with that many insertions must have reached.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_is_monotonic(n in 0usize..200) {
        let v = 0u8;
        let schedule = Schedule::new(&TINY).unwrap();
        let mut t = SymTableHash::with_schedule(schedule);
        let mut last = t.bucket_count();
        for i in 0..n {
            t.put(&format!("k{}", i), &v).unwrap();
            let now = t.bucket_count();
            prop_assert!(now == last || Some(now) == schedule.next_after(last));
            last = now;
        }
        t.assert_placement();
        if n > 14 {
            prop_assert_eq!(t.bucket_count(), schedule.largest());
        }
    }
}
