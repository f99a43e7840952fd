//! Ledger value encoding
//!
//! Entities are stored as JSON. Decoding ignores fields it does not know, so
//! entries written by newer schema versions still load.

use crate::ContractError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) fn encode<T: Serialize>(entity: &T) -> Result<Vec<u8>, ContractError> {
    Ok(serde_json::to_vec(entity)?)
}

/// Decode a stored value; `None` when the bytes are not a valid `T`
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    serde_json::from_slice(bytes).ok()
}
