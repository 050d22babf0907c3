use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub notes: Option<Option<String>>,
    pub status: Option<String>,
}
