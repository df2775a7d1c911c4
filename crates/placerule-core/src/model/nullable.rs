//! Null-tolerant field decoding
//!
//! Rule documents written by other tools may carry an explicit `null` for
//! any field. Such fields decode to their zero value, the same as a missing
//! key.

use serde::{Deserialize, Deserializer};

/// Deserialize `T`, mapping `null` to `T::default()`
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
