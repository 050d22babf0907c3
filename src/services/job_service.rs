use sqlx::PgPool;
use uuid::Uuid;

use crate::database::patch::Patch;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, PipelineStatus};
use crate::models::job::{Job, JobStatus};

const JOB_COLUMNS: &str = "id, title, job_number, department, due_date, filled_date, employee, \
     employee_photo_url, status, created_at";

const CANDIDATE_COLUMNS: &str =
    "id, full_name, email, phone, notes, status, created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: JobListQuery) -> Result<Vec<Job>> {
        let limit = query.limit.unwrap_or(100).clamp(1, 1000);
        let offset = query.offset.unwrap_or(0).max(0);

        let status = match query.status.as_deref() {
            None => None,
            Some(raw) if raw.eq_ignore_ascii_case("all") => None,
            Some(raw) => Some(
                JobStatus::parse(raw)
                    .ok_or_else(|| Error::BadRequest("invalid status filter".to_string()))?,
            ),
        };

        let jobs = match status {
            Some(status) => {
                sqlx::query_as::<_, Job>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs WHERE LOWER(status) = LOWER($1) \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Job>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job =
            sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        job.ok_or_else(|| Error::NotFound("job_not_found".to_string()))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let status = match payload.status.as_deref() {
            None => JobStatus::Open,
            Some(raw) => JobStatus::parse(raw)
                .ok_or_else(|| Error::BadRequest("invalid status".to_string()))?,
        };

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (title, job_number, department, due_date, filled_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {JOB_COLUMNS}"
        ))
        .bind(payload.title)
        .bind(payload.job_number)
        .bind(payload.department)
        .bind(payload.due_date)
        .bind(payload.filled_date)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    /// Generic edit. Never touches the assign/unassign invariants: an
    /// edit that clears `employee` leaves `status` alone unless the
    /// payload sets `status` explicitly.
    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let mut patch = Patch::new("jobs");

        if let Some(title) = payload.title {
            patch.set("title", title);
        }
        if let Some(job_number) = payload.job_number {
            patch.set("job_number", job_number);
        }
        if let Some(department) = payload.department {
            patch.set("department", department);
        }
        if let Some(due_date) = payload.due_date {
            patch.set("due_date", due_date);
        }
        if let Some(filled_date) = payload.filled_date {
            patch.set("filled_date", filled_date);
        }
        if let Some(employee) = payload.employee {
            patch.set("employee", employee);
        }
        if let Some(employee_photo_url) = payload.employee_photo_url {
            patch.set("employee_photo_url", employee_photo_url);
        }
        if let Some(raw) = payload.status {
            let status = JobStatus::parse(&raw)
                .ok_or_else(|| Error::BadRequest("invalid status".to_string()))?;
            patch.set("status", status.as_str());
        }

        if patch.is_empty() {
            return Err(Error::BadRequest("no fields to update".to_string()));
        }

        let mut builder = patch.by_id(id, JOB_COLUMNS);
        let job = builder
            .build_query_as::<Job>()
            .fetch_optional(&self.pool)
            .await?;
        job.ok_or_else(|| Error::NotFound("job_not_found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("job_not_found".to_string()));
        }
        Ok(())
    }

    /// Open -> Filled. The whole check-then-write sequence runs in one
    /// transaction: the job row is locked, and an advisory lock keyed on
    /// the lowercased candidate name serializes concurrent assigns of the
    /// same person, so at most one of N racing calls can win.
    ///
    /// Failure precedence: job_not_found, job_already_filled,
    /// candidate_not_found, candidate_not_hired, candidate_already_assigned.
    pub async fn assign(&self, job_id: Uuid, candidate_id: Uuid) -> Result<Job> {
        let mut tx = self.pool.begin().await?;

        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 FOR UPDATE"
        ))
        .bind(job_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("job_not_found".to_string()))?;

        if job.is_filled() {
            return Err(Error::Conflict("job_already_filled".to_string()));
        }

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(candidate_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("candidate_not_found".to_string()))?;

        if PipelineStatus::parse(&candidate.status) != Some(PipelineStatus::Hired) {
            return Err(Error::Conflict("candidate_not_hired".to_string()));
        }

        // Held until commit/rollback; a racing assign for the same name
        // blocks here and then sees the winner's committed row below.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext(LOWER(TRIM($1))))")
            .bind(&candidate.full_name)
            .execute(&mut *tx)
            .await?;

        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM jobs \
             WHERE TRIM(COALESCE(employee, '')) <> '' \
               AND LOWER(employee) = LOWER($1) AND id <> $2)",
        )
        .bind(&candidate.full_name)
        .bind(job_id)
        .fetch_one(&mut *tx)
        .await?;

        if taken {
            return Err(Error::Conflict("candidate_already_assigned".to_string()));
        }

        // filled_date is only stamped if still empty, so a re-assignment
        // after an edit keeps the original date.
        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET employee = $1, status = 'Filled', \
             filled_date = COALESCE(filled_date, CURRENT_DATE) \
             WHERE id = $2 RETURNING {JOB_COLUMNS}"
        ))
        .bind(&candidate.full_name)
        .bind(job_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(job)
    }

    /// Filled -> Open. Idempotent: unassigning an already-open job just
    /// returns it.
    pub async fn unassign(&self, job_id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET employee = NULL, employee_photo_url = NULL, \
             status = 'Open', filled_date = NULL \
             WHERE id = $1 RETURNING {JOB_COLUMNS}"
        ))
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        job.ok_or_else(|| Error::NotFound("job_not_found".to_string()))
    }
}
