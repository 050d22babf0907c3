use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub job_number: Option<String>,
    pub department: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub filled_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Partial update. Double-`Option` fields distinguish "leave alone" from
/// "clear". Setting `employee` here never changes `status`; status moves
/// only via assign/unassign or an explicit `status` value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub job_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub filled_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub employee: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub employee_photo_url: Option<Option<String>>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignJobPayload {
    pub candidate_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
