//! Property tests for key derivation and the stream transform.

use motebridge_cipher::{ANSWER_ROWS, CipherTables};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every key built from a seed and an answer row derives, and decode
    /// inverts encode at every register offset.
    #[test]
    fn prop_roundtrip_derivable_keys(
        seed in prop::array::uniform10(any::<u8>()),
        idx in 0usize..ANSWER_ROWS,
        data in prop::collection::vec(any::<u8>(), 0..64),
        addr in 0usize..256,
    ) {
        let tables = CipherTables::builtin();
        let key = tables.key_material(seed, idx);
        let state = tables.derive(&key);
        prop_assert!(state.is_some());
        if let Some(state) = state {
            let mut buf = data.clone();
            state.encode(&mut buf, addr);
            state.decode(&mut buf, addr);
            prop_assert_eq!(buf, data);
        }
    }

    /// Derivation is a pure function of the key.
    #[test]
    fn prop_derive_deterministic(key in prop::array::uniform16(any::<u8>())) {
        let tables = CipherTables::builtin();
        prop_assert_eq!(tables.derive(&key), tables.derive(&key));
    }

    /// Encoding a split buffer at the matching offsets equals encoding it whole.
    #[test]
    fn prop_encode_is_positional(
        seed in prop::array::uniform10(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 1..32),
        split in 0usize..32,
    ) {
        let tables = CipherTables::builtin();
        let key = tables.key_material(seed, 0);
        if let Some(state) = tables.derive(&key) {
            let split = split.min(data.len());
            let mut whole = data.clone();
            state.encode(&mut whole, 0);
            let (a, b) = data.split_at(split);
            let mut a = a.to_vec();
            let mut b = b.to_vec();
            state.encode(&mut a, 0);
            state.encode(&mut b, split);
            a.extend_from_slice(&b);
            prop_assert_eq!(whole, a);
        }
    }
}
