// ==============================================
// COMPOSITE KEY PROPERTY TESTS (integration)
// ==============================================
//
// Properties of CompositeKey that must hold for arbitrary value sequences:
// determinism, order sensitivity, checksum independence and clone isolation.

use proptest::prelude::*;
use softcache::key::{CompositeKey, KeyValue};

fn scalar() -> impl Strategy<Value = KeyValue> {
    prop_oneof![
        Just(KeyValue::Null),
        any::<bool>().prop_map(KeyValue::Bool),
        any::<i64>().prop_map(KeyValue::Int),
        "[a-z]{0,8}".prop_map(KeyValue::Str),
        prop::collection::vec(any::<u8>(), 0..6).prop_map(KeyValue::Bytes),
    ]
}

fn key_value() -> impl Strategy<Value = KeyValue> {
    scalar().prop_recursive(3, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(KeyValue::List)
    })
}

// ==============================================
// Concrete Scenario
// ==============================================

mod concrete {
    use super::*;

    #[test]
    fn select_keys_match_and_reordered_key_does_not() {
        let k1 = CompositeKey::from_values(["select".into(), 5.into(), KeyValue::Null]);
        let k2 = CompositeKey::from_values(["select".into(), 5.into(), KeyValue::Null]);
        assert_eq!(k1, k2);
        assert_eq!(k1.hash_code(), k2.hash_code());

        let k3 = CompositeKey::from_values([5.into(), "select".into(), KeyValue::Null]);
        assert_ne!(k1, k3);
    }

    #[test]
    fn repeated_null_updates_are_reproducible() {
        let build = || {
            let mut key = CompositeKey::new();
            key.update(KeyValue::Null);
            key.update(KeyValue::Null);
            key
        };
        let (a, b) = (build(), build());
        assert_eq!(a.hash_code(), b.hash_code());
        assert_eq!(a.checksum(), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn nested_lists_compare_deeply() {
        let a = CompositeKey::from_values([KeyValue::list([KeyValue::list([1, 2])])]);
        let b = CompositeKey::from_values([KeyValue::list([KeyValue::list([1, 2])])]);
        let c = CompositeKey::from_values([KeyValue::list([KeyValue::list([2, 1])])]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

// ==============================================
// Properties
// ==============================================

proptest! {
    /// Property: the same sequence always yields equal keys with equal hashes
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_same_sequence_same_key(values in prop::collection::vec(key_value(), 0..12)) {
        let a = CompositeKey::from_values(values.clone());
        let b = CompositeKey::from_values(values);
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert_eq!(a.checksum(), b.checksum());
        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(a, b);
    }

    /// Property: swapping two distinct values changes the key
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_order_matters(a in key_value(), b in key_value()) {
        prop_assume!(a != b);
        let ab = CompositeKey::from_values([a.clone(), b.clone()]);
        let ba = CompositeKey::from_values([b, a]);
        prop_assert_eq!(ab.checksum(), ba.checksum());
        prop_assert_ne!(ab, ba);
    }

    /// Property: the checksum ignores order, equality never does
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_reversed_sequence_shares_checksum(
        values in prop::collection::vec(key_value(), 2..10)
    ) {
        let forward = CompositeKey::from_values(values.clone());
        let reversed: Vec<KeyValue> = values.iter().rev().cloned().collect();
        let backward = CompositeKey::from_values(reversed.clone());
        prop_assert_eq!(forward.checksum(), backward.checksum());
        prop_assert_eq!(forward == backward, values == reversed);
    }

    /// Property: updates on a clone never leak into the original and vice versa
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_clone_isolation(
        base in prop::collection::vec(key_value(), 0..8),
        extra in key_value(),
    ) {
        let mut original = CompositeKey::from_values(base);
        let snapshot = (original.hash_code(), original.checksum(), original.values().to_vec());

        let mut copy = original.clone();
        copy.update(extra.clone());
        prop_assert_eq!(
            (original.hash_code(), original.checksum(), original.values().to_vec()),
            snapshot.clone()
        );

        original.update(extra);
        prop_assert_eq!(copy.update_count(), snapshot.2.len() + 1);
        prop_assert_eq!(original, copy);
    }

    /// Property: equal keys always report equal hashes
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_eq_implies_same_hash(
        a in prop::collection::vec(scalar(), 0..4),
        b in prop::collection::vec(scalar(), 0..4),
    ) {
        let ka = CompositeKey::from_values(a);
        let kb = CompositeKey::from_values(b);
        if ka == kb {
            prop_assert_eq!(ka.hash_code(), kb.hash_code());
        }
    }

    /// Property: the null key never equals a regular key
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_null_key_is_distinct(values in prop::collection::vec(key_value(), 0..4)) {
        prop_assert_ne!(CompositeKey::null(), CompositeKey::from_values(values));
    }
}
