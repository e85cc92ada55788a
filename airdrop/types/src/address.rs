use crate::{AddrEncoder, EncodedBytes};

/// An account address.
///
/// Addresses are of 20-byte length, in hex encoding with the `0x` prefix,
/// same as Ethereum addresses. Parsing accepts any letter case, so ERC-55
/// checksummed strings are accepted (the checksum itself isn't verified).
/// The all-zero address is rejected, since tokens sent there are burnt.
///
/// Addresses are validated during deserialization. If deserialization doesn't
/// throw an error, you can be sure the address is well-formed.
pub type Addr = EncodedBytes<20, AddrEncoder>;

impl Addr {
    /// Create a new address from a 20-byte array.
    pub const fn from_array(array: [u8; 20]) -> Self {
        Self::from_inner(array)
    }

    /// Generate a mock address from use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; 20];
        bytes[19] = index;
        Self::from_inner(bytes)
    }
}

// ----------------------------------- tests -----------------------------------
