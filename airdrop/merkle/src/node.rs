use {
    airdrop_types::{Addr, Hash256, Uint128},
    sha3::{Digest, Keccak256},
};

/// Length of a leaf preimage: a 20-byte address followed by a 32-byte
/// big-endian amount, same as Solidity's `abi.encodePacked(address, uint256)`.
pub const LEAF_PREIMAGE_LENGTH: usize = Addr::LENGTH + 32;

pub fn keccak256(data: &[u8]) -> Hash256 {
    let mut bytes = [0; Hash256::LENGTH];
    bytes.copy_from_slice(&Keccak256::digest(data));
    Hash256::from_inner(bytes)
}

pub fn hash_leaf(address: Addr, amount: Uint128) -> Hash256 {
    let mut preimage = [0; LEAF_PREIMAGE_LENGTH];
    preimage[..Addr::LENGTH].copy_from_slice(address.inner());
    // The upper 16 bytes of the uint256 stay zero.
    preimage[LEAF_PREIMAGE_LENGTH - 16..].copy_from_slice(&amount.to_be_bytes());
    keccak256(&preimage)
}

/// Hash two sibling nodes into their parent. The pair is sorted first, so the
/// result doesn't depend on which side each child is on.
pub fn hash_pair(a: Hash256, b: Hash256) -> Hash256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut preimage = [0; Hash256::LENGTH * 2];
    preimage[..Hash256::LENGTH].copy_from_slice(lo.inner());
    preimage[Hash256::LENGTH..].copy_from_slice(hi.inner());
    keccak256(&preimage)
}

/// Fold a proof, ordered from leaf to root, into the root it implies.
pub fn compute_root(leaf: Hash256, proof: &[Hash256]) -> Hash256 {
    proof.iter().fold(leaf, |node, sibling| hash_pair(node, *sibling))
}

/// Check that `(address, amount)` is committed to by `root`.
pub fn verify_proof(root: Hash256, address: Addr, amount: Uint128, proof: &[Hash256]) -> bool {
    compute_root(hash_leaf(address, amount), proof) == root
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            keccak256(&[]),
            Hash256::from_inner(hex!(
                "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
            ))
        );
    }

    #[test]
    fn leaf_encoding_is_packed() {
        let address = Addr::from_array([0x11; 20]);

        let mut preimage = [0; 52];
        preimage[..20].copy_from_slice(&[0x11; 20]);
        preimage[51] = 100;

        assert_eq!(hash_leaf(address, 100), keccak256(&preimage));
        assert_ne!(hash_leaf(address, 100), hash_leaf(address, 99));
    }

    #[test]
    fn pairs_are_order_independent() {
        let a = keccak256(b"a");
        let b = keccak256(b"b");

        assert_eq!(hash_pair(a, b), hash_pair(b, a));
        assert_ne!(hash_pair(a, b), hash_pair(a, a));
    }

    #[test]
    fn empty_proof_means_leaf_is_root() {
        let leaf = hash_leaf(Addr::mock(1), 5);

        assert_eq!(compute_root(leaf, &[]), leaf);
        assert!(verify_proof(leaf, Addr::mock(1), 5, &[]));
        assert!(!verify_proof(leaf, Addr::mock(1), 6, &[]));
    }
}
