pub mod auth_dto;
pub mod candidate_dto;
pub mod job_dto;
pub mod permission_dto;
pub mod user_dto;

use serde::{Deserialize, Deserializer};

/// Distinguishes "field absent" (`None`) from "field explicitly null"
/// (`Some(None)`) in PATCH bodies. Pair with `#[serde(default)]`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
