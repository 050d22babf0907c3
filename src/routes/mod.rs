pub mod auth;
pub mod candidates;
pub mod health;
pub mod jobs;
pub mod permissions;
pub mod uploads;
pub mod users;
