mod address;
mod campaign;
mod claim;
mod encoded_bytes;
mod encoders;
mod error;
mod hash;
mod recipient;
mod result;
mod serializers;
mod time;

pub use {
    address::*, campaign::*, claim::*, encoded_bytes::*, encoders::*, error::*, hash::*,
    recipient::*, result::*, serializers::*, time::*,
};

// -------------------------------- re-exports ---------------------------------

pub use serde_json::{json, Value as Json};

/// Token amounts, in the token's minimal unit.
///
/// Amounts are serialized to JSON as decimal strings, since ERC-20 amounts
/// routinely exceed the range that JSON numbers can represent losslessly.
pub type Uint128 = u128;
