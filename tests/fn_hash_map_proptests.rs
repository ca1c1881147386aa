// FnHashMap property tests (black box, byte-sequence keys).
//
// Property 1: traversal completeness. After building a map from a model,
//  for_each visits every live entry exactly once with its latest value.
// Property 2: early exit. A visit that stops on the k-th call sees
//  exactly min(k, len) entries.
// Property 3: removal in arbitrary order drains the map entry by entry,
//  with absent-key removals staying no-ops throughout.
use fn_hashmap::{FnHashMap, HashCode};
use proptest::prelude::*;
use std::collections::HashMap;

fn fnv_hash(k: &Vec<u8>) -> HashCode {
    k.iter()
        .fold(0xcbf29ce484222325u64, |h, &b| {
            (h ^ b as u64).wrapping_mul(0x100000001b3)
        })
}

fn content_equal(a: &Vec<u8>, b: &Vec<u8>) -> bool {
    a == b
}

fn build(model: &HashMap<Vec<u8>, i32>) -> FnHashMap<Vec<u8>, i32, fn(&Vec<u8>) -> HashCode, fn(&Vec<u8>, &Vec<u8>) -> bool> {
    let mut m: FnHashMap<Vec<u8>, i32, fn(&Vec<u8>) -> HashCode, fn(&Vec<u8>, &Vec<u8>) -> bool> =
        FnHashMap::new(fnv_hash, content_equal);
    for (k, v) in model {
        m.put(k.clone(), *v);
    }
    m
}

fn arb_model() -> impl Strategy<Value = HashMap<Vec<u8>, i32>> {
    proptest::collection::hash_map(proptest::collection::vec(any::<u8>(), 0..6), any::<i32>(), 0..40)
}

proptest! {
    #[test]
    fn prop_for_each_visits_each_entry_exactly_once(model in arb_model()) {
        let m = build(&model);
        prop_assert_eq!(m.len(), model.len());

        let mut seen: HashMap<Vec<u8>, i32> = HashMap::new();
        m.for_each(|k, v| {
            let dup = seen.insert(k.clone(), *v);
            assert!(dup.is_none(), "entry visited twice");
            false
        });
        prop_assert_eq!(seen, model);
    }

    #[test]
    fn prop_early_exit_visits_exactly_k(model in arb_model(), stop_after in 1usize..64) {
        let m = build(&model);
        let mut visited = 0;
        m.for_each(|_, _| {
            visited += 1;
            visited == stop_after
        });
        prop_assert_eq!(visited, stop_after.min(m.len()));
    }

    #[test]
    fn prop_remove_in_arbitrary_order_drains_the_map(model in arb_model()) {
        let mut m = build(&model);
        let mut remaining = model.len();
        for (k, v) in &model {
            prop_assert_eq!(m.remove(k), Some(*v));
            prop_assert_eq!(m.remove(k), None, "second removal must be a no-op");
            remaining -= 1;
            prop_assert_eq!(m.len(), remaining);
            prop_assert!(m.get(k).is_none());
        }
        prop_assert!(m.is_empty());
        prop_assert_eq!(m.to_string(), "{}");
    }
}
