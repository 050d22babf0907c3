pub mod candidate_service;
pub mod job_service;
pub mod permission_service;
pub mod user_service;
