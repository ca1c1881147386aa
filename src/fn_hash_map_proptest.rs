#![cfg(test)]

// Property tests for FnHashMap kept inside the crate so each step can also
// assert internal bucket/arena consistency, not just observable behavior.
//
// The key semantics under test are caller-supplied: keys are `String`s
// compared case-insensitively, with a hash over the lowercased bytes. The
// model is a `std::collections::HashMap` keyed by the lowercased form.

use crate::{FnHashMap, HashCode};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

fn ci_hash(k: &String) -> HashCode {
    k.bytes().fold(0xcbf29ce484222325u64, |h, b| {
        (h ^ b.to_ascii_lowercase() as u64).wrapping_mul(0x100000001b3)
    })
}

fn ci_equal(a: &String, b: &String) -> bool {
    a.eq_ignore_ascii_case(b)
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length. Pools mix case
// variants, so distinct pool entries may be the same logical key.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-zA-Z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            idx.clone().prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<H, E>(mut sut: FnHashMap<String, i32, H, E>, pool: &[String], ops: Vec<OpI>)
where
    H: Fn(&String) -> HashCode,
    E: Fn(&String, &String) -> bool,
{
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let prev = sut.put(pool[i].clone(), v);
                let model_prev = model.insert(pool[i].to_ascii_lowercase(), v);
                assert_eq!(prev, model_prev, "put must return the displaced value");
            }
            OpI::Remove(i) => {
                let got = sut.remove(&pool[i]);
                let want = model.remove(&pool[i].to_ascii_lowercase());
                assert_eq!(got, want, "remove must return the removed value");
            }
            OpI::Get(i) => {
                let got = sut.get(&pool[i]).copied();
                let want = model.get(&pool[i].to_ascii_lowercase()).copied();
                assert_eq!(got, want);
            }
            OpI::Contains(i) => {
                assert_eq!(
                    sut.contains_key(&pool[i]),
                    model.contains_key(&pool[i].to_ascii_lowercase())
                );
            }
            OpI::Mutate(i, d) => {
                match (sut.get_mut(&pool[i]), model.get_mut(&pool[i].to_ascii_lowercase())) {
                    (Some(v), Some(mv)) => {
                        *v = v.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (None, None) => {}
                    _ => panic!("get_mut presence diverged from model"),
                }
            }
            OpI::Iterate => {
                let got: BTreeMap<String, i32> = sut
                    .iter()
                    .map(|(k, v)| (k.to_ascii_lowercase(), *v))
                    .collect();
                let want: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                assert_eq!(got, want, "iteration must yield each logical key once");
            }
        }

        // Post-conditions after each op.
        sut.check_consistency();
        assert_eq!(sut.len(), model.len());
        assert_eq!(sut.is_empty(), model.is_empty());
    }
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - put replaces (returning the old value) or appends, matching the model.
// - get/get_mut/contains_key parity for present and absent keys.
// - remove returns the owned value and is a no-op on absent keys.
// - iteration yields each logical key exactly once with the model's value.
// - len/is_empty parity and internal bucket/arena consistency after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(FnHashMap::new(ci_hash, ci_equal), &pool, ops);
    }
}

// Property: same state-machine invariants under worst-case collisions. A
// constant hash funnels every key into a single bucket, stressing the
// linear equality scan, swap-remove and compaction paths.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(FnHashMap::new(|_: &String| 0, ci_equal), &pool, ops);
    }
}
