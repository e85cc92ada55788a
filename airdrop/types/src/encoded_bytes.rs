use {
    crate::{Encoder, StdError, StdResult},
    serde::{de, ser},
    std::{
        fmt::{self, Debug, Display},
        marker::PhantomData,
        ops::Deref,
        str::FromStr,
    },
};

/// A wrapper over a fixed-size byte array that encodes it into a string with
/// a specific encoding scheme.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedBytes<const N: usize, E>
where
    E: Encoder,
{
    bytes: [u8; N],
    encoder: PhantomData<E>,
}

impl<const N: usize, E> EncodedBytes<N, E>
where
    E: Encoder,
{
    pub const LENGTH: usize = N;

    pub const fn from_inner(bytes: [u8; N]) -> Self {
        Self {
            bytes,
            encoder: PhantomData,
        }
    }

    pub const fn inner(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn into_inner(self) -> [u8; N] {
        self.bytes
    }
}

impl<const N: usize, E> From<[u8; N]> for EncodedBytes<N, E>
where
    E: Encoder,
{
    fn from(inner: [u8; N]) -> Self {
        EncodedBytes::from_inner(inner)
    }
}

impl<const N: usize, E> TryFrom<&[u8]> for EncodedBytes<N, E>
where
    E: Encoder,
{
    type Error = StdError;

    fn try_from(slice: &[u8]) -> StdResult<Self> {
        let bytes = slice
            .try_into()
            .map_err(|_| StdError::incorrect_length(N, slice.len()))?;

        Ok(Self::from_inner(bytes))
    }
}

impl<const N: usize, E> AsRef<[u8]> for EncodedBytes<N, E>
where
    E: Encoder,
{
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize, E> Deref for EncodedBytes<N, E>
where
    E: Encoder,
{
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl<const N: usize, E> Display for EncodedBytes<N, E>
where
    E: Encoder,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", E::PREFIX, E::ENCODING.encode(&self.bytes))
    }
}

impl<const N: usize, E> Debug for EncodedBytes<N, E>
where
    E: Encoder,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}({}{})",
            E::NAME,
            E::PREFIX,
            E::ENCODING.encode(&self.bytes)
        )
    }
}

impl<const N: usize, E> FromStr for EncodedBytes<N, E>
where
    E: Encoder,
{
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let Some(encoded) = s.trim().strip_prefix(E::PREFIX) else {
            return Err(StdError::deserialize::<Self, _>(
                E::NAME,
                format!("missing prefix: expecting `{}`", E::PREFIX),
            ));
        };

        if encoded.len() != N * 2 {
            return Err(StdError::deserialize::<Self, _>(
                E::NAME,
                format!(
                    "invalid length: expecting {} hex characters, found {}",
                    N * 2,
                    encoded.len()
                ),
            ));
        }

        let vec = E::ENCODING.decode(encoded.as_bytes())?;

        E::check(&vec)?;

        Self::try_from(vec.as_slice())
    }
}

impl<const N: usize, E> ser::Serialize for EncodedBytes<N, E>
where
    E: Encoder,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, const N: usize, E> de::Deserialize<'de> for EncodedBytes<N, E>
where
    E: Encoder,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(Visitor(PhantomData))
    }
}

struct Visitor<const N: usize, E>(PhantomData<E>);

impl<const N: usize, E> de::Visitor<'_> for Visitor<N, E>
where
    E: Encoder,
{
    type Value = EncodedBytes<N, E>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a {}-byte string in {} encoding", N, E::NAME)
    }

    fn visit_str<Err>(self, value: &str) -> Result<Self::Value, Err>
    where
        Err: de::Error,
    {
        Self::Value::from_str(value).map_err(Err::custom)
    }
}
