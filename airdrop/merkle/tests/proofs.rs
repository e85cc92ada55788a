use {
    airdrop_merkle::{verify_proof, MerkleTree},
    airdrop_types::{Addr, Recipient, Uint128},
    proptest::{collection::btree_map, prelude::*},
};

/// Between 1 and 64 recipients with distinct, non-zero addresses and positive
/// amounts.
fn recipient_list() -> impl Strategy<Value = Vec<Recipient>> {
    btree_map(
        any::<[u8; 20]>().prop_filter("zero address", |bytes| bytes != &[0; 20]),
        1..=Uint128::MAX / 1024,
        1..64,
    )
    .prop_map(|map| {
        map.into_iter()
            .map(|(bytes, amount)| Recipient::new(Addr::from_array(bytes), amount))
            .collect()
    })
}

proptest! {
    /// Building from any permutation of the same list yields the same root
    /// and the same proofs.
    #[test]
    fn root_is_order_independent(
        (recipients, shuffled) in recipient_list().prop_flat_map(|list| {
            (Just(list.clone()), Just(list).prop_shuffle())
        }),
    ) {
        let a = MerkleTree::build(recipients.clone()).unwrap();
        let b = MerkleTree::build(shuffled).unwrap();

        prop_assert_eq!(a.root(), b.root());

        for recipient in &recipients {
            prop_assert_eq!(a.proof(recipient.address), b.proof(recipient.address));
        }
    }

    /// Every generated proof verifies, and flipping any single bit of the
    /// proof or the amount breaks it.
    #[test]
    fn proofs_are_sound(
        recipients in recipient_list(),
        pick in any::<prop::sample::Index>(),
        bit in 0..256usize,
        amount_bit in 0..128u32,
    ) {
        let tree = MerkleTree::build(recipients.clone()).unwrap();
        let root = tree.root();

        for entry in tree.entries() {
            prop_assert!(verify_proof(root, entry.address, entry.amount, &entry.proof));
        }

        let entry = &tree.entries()[pick.index(recipients.len())];

        let amount = entry.amount ^ (1 << amount_bit);
        prop_assert!(!verify_proof(root, entry.address, amount, &entry.proof));

        if !entry.proof.is_empty() {
            let mut proof = entry.proof.clone();
            let i = bit % proof.len();
            proof[i] = proof[i].with_flipped_bit(bit);
            prop_assert!(!verify_proof(root, entry.address, entry.amount, &proof));
        }
    }
}
