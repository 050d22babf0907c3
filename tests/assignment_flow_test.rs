//! Database-backed assignment workflow tests. Run with a disposable
//! Postgres behind DATABASE_URL:
//!
//!     cargo test -- --ignored

use sqlx::PgPool;
use uuid::Uuid;

use nots_pmh_backend::dto::candidate_dto::CreateCandidatePayload;
use nots_pmh_backend::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use nots_pmh_backend::error::Error;
use nots_pmh_backend::models::candidate::Candidate;
use nots_pmh_backend::models::job::Job;
use nots_pmh_backend::services::candidate_service::CandidateService;
use nots_pmh_backend::services::job_service::JobService;

async fn db() -> PgPool {
    dotenvy::dotenv().ok();
    std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    std::env::set_var("JWT_SECRET", "test_secret_key");
    let _ = nots_pmh_backend::config::init_config();
    let pool = nots_pmh_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    pool
}

fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4())
}

async fn seed_job(jobs: &JobService, title: &str) -> Job {
    jobs.create(CreateJobPayload {
        title: title.to_string(),
        job_number: Some("J-100".to_string()),
        department: Some("Plant A".to_string()),
        due_date: None,
        filled_date: None,
        status: None,
    })
    .await
    .expect("create job")
}

async fn seed_candidate(candidates: &CandidateService, name: &str, status: &str) -> Candidate {
    candidates
        .create(CreateCandidatePayload {
            full_name: name.to_string(),
            email: None,
            phone: None,
            notes: None,
            status: Some(status.to_string()),
        })
        .await
        .expect("create candidate")
}

fn conflict_code(err: Error) -> String {
    match err {
        Error::Conflict(code) => code,
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn assign_unassign_scenario_end_to_end() {
    let pool = db().await;
    let jobs = JobService::new(pool.clone());
    let candidates = CandidateService::new(pool.clone());

    let job = seed_job(&jobs, "Welder").await;
    assert_eq!(job.status, "Open");
    assert!(job.employee.is_none());

    let jane = unique_name("Jane Doe");
    let candidate = seed_candidate(&candidates, &jane, "hired").await;

    let job = jobs.assign(job.id, candidate.id).await.expect("assign");
    assert_eq!(job.status, "Filled");
    assert_eq!(job.employee.as_deref(), Some(jane.as_str()));
    assert_eq!(job.filled_date, Some(chrono::Utc::now().date_naive()));

    // The same person cannot fill a second job.
    let second = seed_job(&jobs, "Fitter").await;
    let err = jobs.assign(second.id, candidate.id).await.unwrap_err();
    assert_eq!(conflict_code(err), "candidate_already_assigned");

    // Unassign reopens the first job and frees the name.
    let job = jobs.unassign(job.id).await.expect("unassign");
    assert_eq!(job.status, "Open");
    assert!(job.employee.is_none());
    assert!(job.filled_date.is_none());
    assert!(job.employee_photo_url.is_none());

    let second = jobs.assign(second.id, candidate.id).await.expect("re-assign");
    assert_eq!(second.employee.as_deref(), Some(jane.as_str()));
}

#[tokio::test]
#[ignore]
async fn assign_preconditions_report_stable_codes() {
    let pool = db().await;
    let jobs = JobService::new(pool.clone());
    let candidates = CandidateService::new(pool.clone());

    let job = seed_job(&jobs, "Electrician").await;
    let pending =
        seed_candidate(&candidates, &unique_name("Early Bird"), "pending_onboarding").await;

    // Not hired yet: same code whether or not the job is open.
    let err = jobs.assign(job.id, pending.id).await.unwrap_err();
    assert_eq!(conflict_code(err), "candidate_not_hired");

    let hired = seed_candidate(&candidates, &unique_name("On Time"), "hired").await;
    jobs.assign(job.id, hired.id).await.expect("assign");
    let err = jobs.assign(job.id, pending.id).await.unwrap_err();
    assert_eq!(conflict_code(err), "job_already_filled");

    let err = jobs.assign(Uuid::new_v4(), hired.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(code) if code == "job_not_found"));

    let open = seed_job(&jobs, "Painter").await;
    let err = jobs.assign(open.id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(code) if code == "candidate_not_found"));
}

#[tokio::test]
#[ignore]
async fn concurrent_assigns_of_one_candidate_pick_a_single_winner() {
    let pool = db().await;
    let jobs = JobService::new(pool.clone());
    let candidates = CandidateService::new(pool.clone());

    let candidate =
        seed_candidate(&candidates, &unique_name("Hot Commodity"), "hired").await;

    let n = 8;
    let mut open_jobs = Vec::new();
    for i in 0..n {
        open_jobs.push(seed_job(&jobs, &format!("Rigger {}", i)).await);
    }

    let mut handles = Vec::new();
    for job in &open_jobs {
        let jobs = jobs.clone();
        let job_id = job.id;
        let candidate_id = candidate.id;
        handles.push(tokio::spawn(async move {
            jobs.assign(job_id, candidate_id).await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task") {
            Ok(_) => wins += 1,
            Err(Error::Conflict(code)) if code == "candidate_already_assigned" => conflicts += 1,
            Err(other) => panic!("unexpected failure: {:?}", other),
        }
    }
    assert_eq!(wins, 1, "exactly one concurrent assign must win");
    assert_eq!(conflicts, n - 1);
}

#[tokio::test]
#[ignore]
async fn unassign_open_job_is_idempotent() {
    let pool = db().await;
    let jobs = JobService::new(pool.clone());

    let job = seed_job(&jobs, "Machinist").await;
    let job = jobs.unassign(job.id).await.expect("first unassign");
    assert_eq!(job.status, "Open");
    let job = jobs.unassign(job.id).await.expect("second unassign");
    assert_eq!(job.status, "Open");
}

#[tokio::test]
#[ignore]
async fn reassign_after_edit_keeps_existing_filled_date() {
    let pool = db().await;
    let jobs = JobService::new(pool.clone());
    let candidates = CandidateService::new(pool.clone());

    let job = seed_job(&jobs, "Inspector").await;
    let backdated = chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let job = jobs
        .update(
            job.id,
            UpdateJobPayload {
                filled_date: Some(Some(backdated)),
                ..Default::default()
            },
        )
        .await
        .expect("edit");
    assert_eq!(job.filled_date, Some(backdated));

    let candidate = seed_candidate(&candidates, &unique_name("Backdated"), "hired").await;
    let job = jobs.assign(job.id, candidate.id).await.expect("assign");
    assert_eq!(job.filled_date, Some(backdated));
}

#[tokio::test]
#[ignore]
async fn edit_clearing_employee_does_not_flip_status() {
    let pool = db().await;
    let jobs = JobService::new(pool.clone());
    let candidates = CandidateService::new(pool.clone());

    let job = seed_job(&jobs, "Foreman").await;
    let candidate = seed_candidate(&candidates, &unique_name("Shift Lead"), "hired").await;
    let job = jobs.assign(job.id, candidate.id).await.expect("assign");
    assert_eq!(job.status, "Filled");

    let job = jobs
        .update(
            job.id,
            UpdateJobPayload {
                employee: Some(None),
                ..Default::default()
            },
        )
        .await
        .expect("edit");
    assert!(job.employee.is_none());
    assert_eq!(job.status, "Filled", "generic edit never infers status");
}

#[tokio::test]
#[ignore]
async fn job_roundtrips_through_create_and_get() {
    let pool = db().await;
    let jobs = JobService::new(pool.clone());

    let due = chrono::NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
    let created = jobs
        .create(CreateJobPayload {
            title: "Welder".to_string(),
            job_number: Some("J-7".to_string()),
            department: Some("Plant A".to_string()),
            due_date: Some(due),
            filled_date: None,
            status: None,
        })
        .await
        .expect("create");

    let fetched = jobs.get_by_id(created.id).await.expect("get");
    assert_eq!(fetched.title, "Welder");
    assert_eq!(fetched.job_number.as_deref(), Some("J-7"));
    assert_eq!(fetched.department.as_deref(), Some("Plant A"));
    assert_eq!(fetched.due_date, Some(due));
    assert_eq!(fetched.status, "Open");
    assert!(fetched.employee.is_none());
}
