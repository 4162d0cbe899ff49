use super::tests::validate_tree;
use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{BTreeMap, BTreeSet};

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet and short sequences so that paths overlap heavily.
    prop::collection::vec(0u8..4, 0..=6)
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Add(#[proptest(strategy = "key_strategy()")] Vec<u8>, Option<u32>),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "key_strategy()")] Vec<u8>),
    #[proptest(weight = 2)]
    Search(#[proptest(strategy = "key_strategy()")] Vec<u8>),
    #[proptest(weight = 2)]
    Prefix(#[proptest(strategy = "key_strategy()")] Vec<u8>),
}

/// Longest leading run of `key` shared with any stored sequence.
fn model_prefix(m: &BTreeMap<Vec<u8>, u32>, key: &[u8]) -> Option<Vec<u8>> {
    let n = m
        .keys()
        .map(|k| k.iter().zip(key).take_while(|(a, b)| a == b).count())
        .max()
        .unwrap_or(0);
    (n > 0).then(|| key[..n].to_vec())
}

/// Every distinct non-empty prefix of a stored sequence owns one node.
fn model_node_count(m: &BTreeMap<Vec<u8>, u32>) -> usize {
    let mut prefixes: BTreeSet<&[u8]> = BTreeSet::new();
    for k in m.keys() {
        for n in 1..=k.len() {
            prefixes.insert(&k[..n]);
        }
    }
    prefixes.len()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let mut t: EntryTree<u8, u32> = EntryTree::new();
        let mut m: BTreeMap<Vec<u8>, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    let nodes_before = t.node_count();
                    let existed = m.contains_key(&key);
                    let changed = t.add(&key, value).unwrap();
                    match value {
                        Some(v) if !key.is_empty() => {
                            prop_assert!(changed);
                            m.insert(key, v);
                            if existed {
                                prop_assert_eq!(t.node_count(), nodes_before);
                            }
                        }
                        _ => {
                            prop_assert!(!changed);
                            prop_assert_eq!(t.node_count(), nodes_before);
                        }
                    }
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key).unwrap(), m.remove(&key));
                }
                Op::Search(key) => {
                    prop_assert_eq!(t.search(&key).unwrap(), m.get(&key));
                }
                Op::Prefix(key) => {
                    prop_assert_eq!(t.longest_stored_prefix(&key).unwrap(), model_prefix(&m, &key));
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.node_count(), model_node_count(&m));
        }

        validate_tree(&t);
    }

    #[test]
    fn prop_missing_element_never_mutates(
        keys in prop::collection::vec(prop::option::of(0u8..4), 1..=6),
        stored in prop::collection::vec(key_strategy(), 0..=20),
    ) {
        prop_assume!(keys.iter().any(Option::is_none));
        let position = keys.iter().position(Option::is_none).unwrap();
        let err = EntryTreeError::InvalidArgument { position };

        let mut t: EntryTree<u8, u32> = EntryTree::new();
        for (i, k) in stored.iter().enumerate() {
            t.add(k, Some(i as u32)).unwrap();
        }
        let before = t.dump();

        prop_assert_eq!(t.search(&keys), Err(err));
        prop_assert_eq!(t.longest_stored_prefix(&keys), Err(err));
        prop_assert_eq!(t.add(&keys, Some(0)), Err(err));
        prop_assert_eq!(t.remove(&keys), Err(err));
        prop_assert_eq!(t.dump(), before);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn small_set() -> Vec<Vec<char>> {
    vec![
        vec!['a'],
        vec!['b'],
        vec!['a', 'a'],
        vec!['a', 'b'],
        vec!['a', 'b', 'c'],
        vec!['b', 'a'],
    ]
}

#[test]
fn exhaustive_add_order_small_set() {
    for_each_permutation(&small_set(), |perm| {
        let mut t: EntryTree<char, usize> = EntryTree::new();
        for (i, k) in perm.iter().enumerate() {
            assert_eq!(t.add(k, Some(i)), Ok(true));
        }

        validate_tree(&t);
        assert_eq!(t.len(), 6);
        // a, b, aa, ab, abc, ba
        assert_eq!(t.node_count(), 6);
        for (i, k) in perm.iter().enumerate() {
            assert_eq!(t.search(k), Ok(Some(&i)));
        }
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = small_set();

    let mut base: EntryTree<char, usize> = EntryTree::new();
    for (i, k) in keys.iter().enumerate() {
        base.add(k, Some(i)).unwrap();
    }

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        let mut remaining: BTreeMap<Vec<char>, usize> =
            keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();

        for k in perm {
            let expected = remaining.remove(&k);
            assert_eq!(t.remove(&k), Ok(expected));
            assert_eq!(t.len(), remaining.len());
            validate_tree(&t);
            for (rk, rv) in &remaining {
                assert_eq!(t.search(rk), Ok(Some(rv)));
            }
        }
        assert_eq!(t.node_count(), 0);
        assert!(t.root().child().is_none());
    });
}
