use {
    crate::{StdError, StdResult},
    data_encoding::{Encoding, HEXLOWER_PERMISSIVE},
};

/// Describes a scheme for encoding bytes to strings.
pub trait Encoder {
    const NAME: &str;
    const ENCODING: Encoding;
    const PREFIX: &str;

    /// Additional checks on the decoded bytes, beyond the length check.
    fn check(_bytes: &[u8]) -> StdResult<()> {
        Ok(())
    }
}

/// Binary encoder for addresses.
///
/// Decoding is case-insensitive so that ERC-55 checksummed addresses are
/// accepted as-is; encoding always produces lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddrEncoder;

impl Encoder for AddrEncoder {
    const ENCODING: Encoding = HEXLOWER_PERMISSIVE;
    const NAME: &str = "Addr";
    const PREFIX: &str = "0x";

    fn check(bytes: &[u8]) -> StdResult<()> {
        if bytes.iter().all(|byte| *byte == 0) {
            return Err(StdError::deserialize::<crate::Addr, _>(
                Self::NAME,
                "zero address is not allowed",
            ));
        }

        Ok(())
    }
}

/// Binary encoder for hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashEncoder;

impl Encoder for HashEncoder {
    const ENCODING: Encoding = HEXLOWER_PERMISSIVE;
    const NAME: &str = "Hash";
    const PREFIX: &str = "0x";
}
