use sqlx::PgPool;
use uuid::Uuid;

use crate::database::patch::Patch;
use crate::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, PipelineStatus};

const CANDIDATE_COLUMNS: &str =
    "id, full_name, email, phone, notes, status, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        candidate.ok_or_else(|| Error::NotFound("candidate_not_found".to_string()))
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let full_name = payload.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(Error::BadRequest("full_name is required".to_string()));
        }
        let status = match payload.status.as_deref() {
            None => PipelineStatus::PendingPreEmployment,
            Some(raw) => PipelineStatus::parse(raw)
                .ok_or_else(|| Error::BadRequest("invalid status".to_string()))?,
        };

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates (full_name, email, phone, notes, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(full_name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.notes)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(candidate)
    }

    /// Direct status set goes through here too, bypassing the ordered
    /// walk (the UI's manual dropdown).
    pub async fn update(&self, id: Uuid, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let mut patch = Patch::new("candidates");

        if let Some(full_name) = payload.full_name {
            let full_name = full_name.trim().to_string();
            if full_name.is_empty() {
                return Err(Error::BadRequest("full_name cannot be empty".to_string()));
            }
            patch.set("full_name", full_name);
        }
        if let Some(email) = payload.email {
            patch.set("email", email);
        }
        if let Some(phone) = payload.phone {
            patch.set("phone", phone);
        }
        if let Some(notes) = payload.notes {
            patch.set("notes", notes);
        }
        if let Some(raw) = payload.status {
            let status = PipelineStatus::parse(&raw)
                .ok_or_else(|| Error::BadRequest("invalid status".to_string()))?;
            patch.set("status", status.as_str());
        }

        if patch.is_empty() {
            return Err(Error::BadRequest("no fields to update".to_string()));
        }
        patch.set_now("updated_at");

        let mut builder = patch.by_id(id, CANDIDATE_COLUMNS);
        let candidate = builder
            .build_query_as::<Candidate>()
            .fetch_optional(&self.pool)
            .await?;
        candidate.ok_or_else(|| Error::NotFound("candidate_not_found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("candidate_not_found".to_string()));
        }
        Ok(())
    }

    pub async fn advance(&self, id: Uuid) -> Result<Candidate> {
        self.step(id, PipelineStatus::advanced).await
    }

    pub async fn revert(&self, id: Uuid) -> Result<Candidate> {
        self.step(id, PipelineStatus::reverted).await
    }

    /// Moves one step along the pipeline. Clamped steps are a no-op that
    /// returns the candidate unchanged, never an error.
    async fn step(
        &self,
        id: Uuid,
        next: impl Fn(&PipelineStatus) -> PipelineStatus,
    ) -> Result<Candidate> {
        let candidate = self.get_by_id(id).await?;
        let current = PipelineStatus::parse(&candidate.status)
            .ok_or_else(|| Error::Internal(format!("corrupt pipeline status: {}", candidate.status)))?;
        let target = next(&current);
        if target == current {
            return Ok(candidate);
        }

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates SET status = $1, updated_at = NOW() \
             WHERE id = $2 RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(target.as_str())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }
}
