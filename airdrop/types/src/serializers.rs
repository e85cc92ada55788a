use {
    crate::{StdError, StdResult},
    serde::{de::DeserializeOwned, ser::Serialize},
};

/// JSON encoding for anything serializable, with errors as [`StdError`].
pub trait JsonSerExt {
    fn to_json_string(&self) -> StdResult<String>;

    /// Indented, for files meant to be read by people.
    fn to_json_string_pretty(&self) -> StdResult<String>;
}

impl<T> JsonSerExt for T
where
    T: Serialize,
{
    fn to_json_string(&self) -> StdResult<String> {
        serde_json::to_string(self).map_err(|err| StdError::serialize::<T, _>("json", err))
    }

    fn to_json_string_pretty(&self) -> StdResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| StdError::serialize::<T, _>("json", err))
    }
}

/// JSON decoding from anything byte-like: strings, byte slices, file contents.
pub trait JsonDeExt {
    fn deserialize_json<D>(self) -> StdResult<D>
    where
        D: DeserializeOwned;
}

impl<B> JsonDeExt for &B
where
    B: AsRef<[u8]> + ?Sized,
{
    fn deserialize_json<D>(self) -> StdResult<D>
    where
        D: DeserializeOwned,
    {
        serde_json::from_slice(self.as_ref()).map_err(|err| StdError::deserialize::<D, _>("json", err))
    }
}
