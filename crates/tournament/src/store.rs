//! JSON persistence for tournaments and their parts

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::StoreError;

/// Writes `value` as pretty-printed JSON.
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, StoreError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
