use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::Llrb;

#[derive(Clone, Debug)]
enum Op {
    Put(u16, u64),
    Get(u16),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // narrow key space, so that overwrites are frequent.
    let key = 0u16..512;
    let op = prop_oneof![
        70 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Put(k, v)),
        30 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=1000)
}

fn height_bound(n: usize) -> f64 {
    2.0 * ((n + 1) as f64).log2()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ops_match_btreemap(ops in ops_strategy()) {
        let mut llrb: Llrb<u16, u64> = Llrb::new("prop-llrb");
        let mut refns: BTreeMap<u16, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    let old_value = llrb.put(key, value);
                    prop_assert_eq!(old_value, refns.insert(key, value));
                    // every put must leave all invariants in place.
                    if let Err(err) = llrb.validate() {
                        return Err(TestCaseError::fail(err.to_string()));
                    }
                }
                Op::Get(key) => prop_assert_eq!(llrb.get(&key), refns.get(&key)),
            }
        }

        prop_assert_eq!(llrb.len(), refns.len());
        prop_assert_eq!(llrb.keys().len(), llrb.len());
        prop_assert_eq!(llrb.keys(), refns.keys().cloned().collect::<Vec<u16>>());
        prop_assert_eq!(llrb.min(), refns.keys().next());
        prop_assert_eq!(llrb.max(), refns.keys().next_back());
        prop_assert!(llrb.iter().eq(refns.iter()));
    }

    #[test]
    fn prop_height_bound(keys in prop::collection::vec(any::<i32>(), 1..=5000)) {
        let llrb: Llrb<i32, ()> = Llrb::load_from("prop-llrb", keys.into_iter().map(|k| (k, ())));

        let stats = llrb.validate().map_err(|err| TestCaseError::fail(err.to_string()))?;
        let depths = stats.depths().expect("non-empty tree has depths");
        prop_assert!(
            (depths.max() as f64) <= height_bound(llrb.len()),
            "height {} entries {}", depths.max(), llrb.len()
        );
    }

    #[test]
    fn prop_keys_strictly_ascending(keys in prop::collection::vec(any::<i64>(), 0..=2000)) {
        let llrb: Llrb<i64, usize> =
            Llrb::load_from("prop-llrb", keys.iter().cloned().zip(0..));

        let sorted = llrb.keys();
        prop_assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        for (i, key) in keys.iter().enumerate().rev() {
            // later puts overwrite earlier ones, last position wins.
            if keys[i + 1..].contains(key) {
                continue;
            }
            prop_assert_eq!(llrb.get(key), Some(&i));
        }
    }

    #[test]
    fn prop_overwrite_is_idempotent(key in any::<i64>(), v1 in any::<u32>(), v2 in any::<u32>()) {
        let mut llrb: Llrb<i64, u32> = Llrb::new("prop-llrb");
        llrb.put(key, v1);
        let n = llrb.len();
        prop_assert_eq!(llrb.put(key, v2), Some(v1));
        prop_assert_eq!(llrb.get(&key), Some(&v2));
        prop_assert_eq!(llrb.len(), n);
    }
}
