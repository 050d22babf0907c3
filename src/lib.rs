pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    candidate_service::CandidateService, job_service::JobService,
    permission_service::PermissionService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub permission_service: PermissionService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let permission_service = PermissionService::new(pool.clone());

        Self {
            pool,
            user_service,
            job_service,
            candidate_service,
            permission_service,
        }
    }
}
