use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GrantPayload {
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 1))]
    pub ability: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleGrants {
    pub role: String,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevokeResponse {
    pub ok: bool,
    pub removed: bool,
}

/// What the logged-in caller may do; drives UI control visibility.
#[derive(Debug, Clone, Serialize)]
pub struct MyAbilitiesResponse {
    pub role: String,
    pub abilities: Vec<String>,
}
