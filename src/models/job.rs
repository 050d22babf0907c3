use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub job_number: Option<String>,
    pub department: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub filled_date: Option<NaiveDate>,
    pub employee: Option<String>,
    pub employee_photo_url: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Filled means the status says so AND there is an actual assignee.
    /// Legacy rows sometimes carry status 'Filled' with an empty employee;
    /// those are treated as open for assignment purposes.
    pub fn is_filled(&self) -> bool {
        JobStatus::parse(&self.status) == Some(JobStatus::Filled)
            && self
                .employee
                .as_deref()
                .map(|e| !e.trim().is_empty())
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Filled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::Filled => "Filled",
        }
    }

    pub fn parse(raw: &str) -> Option<JobStatus> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" => Some(JobStatus::Open),
            "filled" => Some(JobStatus::Filled),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(JobStatus::parse("open"), Some(JobStatus::Open));
        assert_eq!(JobStatus::parse(" FILLED "), Some(JobStatus::Filled));
        assert_eq!(JobStatus::parse("archived"), None);
    }

    #[test]
    fn filled_requires_an_assignee() {
        let mut job = Job {
            id: Uuid::nil(),
            title: "Welder".into(),
            job_number: None,
            department: None,
            due_date: None,
            filled_date: None,
            employee: None,
            employee_photo_url: None,
            status: "Filled".into(),
            created_at: None,
        };
        assert!(!job.is_filled());
        job.employee = Some("  ".into());
        assert!(!job.is_filled());
        job.employee = Some("Jane Doe".into());
        assert!(job.is_filled());
        job.status = "Open".into();
        assert!(!job.is_filled());
    }
}
