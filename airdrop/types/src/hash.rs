use crate::{EncodedBytes, HashEncoder};

/// A 32-byte hash, in `0x`-prefixed lowercase hex encoding.
///
/// Used for Merkle leaves, internal nodes, roots and proof elements.
pub type Hash256 = EncodedBytes<32, HashEncoder>;

impl Hash256 {
    pub const ZERO: Self = Self::from_inner([0; 32]);

    /// Flip a single bit of the hash. Used in testing to produce a hash that
    /// differs from the original in exactly one bit.
    pub fn with_flipped_bit(self, bit: usize) -> Self {
        let mut bytes = self.into_inner();
        bytes[(bit / 8) % 32] ^= 1 << (bit % 8);
        Self::from_inner(bytes)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        crate::{Hash256, ResultExt},
        std::str::FromStr,
    };

    #[test]
    fn parsing_hashes() {
        let hash = Hash256::from_inner([0xab; 32]);
        let hex = format!("0x{}", "ab".repeat(32));

        assert_eq!(hash.to_string(), hex);
        Hash256::from_str(&hex).should_succeed_and_equal(hash);
        Hash256::from_str(&hex.to_uppercase().replace("0X", "0x")).should_succeed_and_equal(hash);
        Hash256::from_str(&hex[2..]).should_fail_with_error("missing prefix");
        Hash256::from_str(&hex[..64]).should_fail_with_error("invalid length");
    }

    #[test]
    fn zero_hash_is_allowed() {
        Hash256::from_str(&format!("0x{}", "0".repeat(64))).should_succeed_and_equal(Hash256::ZERO);
    }

    #[test]
    fn flipping_a_bit() {
        let flipped = Hash256::ZERO.with_flipped_bit(9);

        assert_ne!(flipped, Hash256::ZERO);
        assert_eq!(flipped.inner()[1], 0b10);
        assert_eq!(flipped.with_flipped_bit(9), Hash256::ZERO);
    }
}
