//! Database-backed permission catalog tests. Run with a disposable
//! Postgres behind DATABASE_URL:
//!
//!     cargo test -- --ignored

use sqlx::PgPool;

use nots_pmh_backend::models::authz::{Ability, Role};
use nots_pmh_backend::services::permission_service::PermissionService;

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

#[tokio::test]
#[ignore]
async fn granting_twice_equals_granting_once() {
    let pool = db().await;
    let permissions = PermissionService::new(pool.clone());

    permissions
        .revoke(Role::Manager, Ability::JobCreate)
        .await
        .expect("reset");

    permissions
        .grant(Role::Manager, Ability::JobCreate)
        .await
        .expect("first grant");
    permissions
        .grant(Role::Manager, Ability::JobCreate)
        .await
        .expect("second grant is a no-op");

    let grants = permissions.grants_for(Role::Manager).await.expect("grants");
    let count = grants.iter().filter(|a| **a == Ability::JobCreate).count();
    assert_eq!(count, 1);

    permissions
        .revoke(Role::Manager, Ability::JobCreate)
        .await
        .expect("cleanup");
}

#[tokio::test]
#[ignore]
async fn revoke_reports_whether_a_row_was_removed() {
    let pool = db().await;
    let permissions = PermissionService::new(pool.clone());

    permissions
        .grant(Role::User, Ability::CandidateView)
        .await
        .expect("grant");
    assert!(permissions
        .revoke(Role::User, Ability::CandidateView)
        .await
        .expect("first revoke"));
    assert!(!permissions
        .revoke(Role::User, Ability::CandidateView)
        .await
        .expect("second revoke removes nothing"));
}

#[tokio::test]
#[ignore]
async fn admin_holds_the_full_catalog_without_rows() {
    let pool = db().await;
    let permissions = PermissionService::new(pool.clone());

    let grants = permissions.grants_for(Role::Admin).await.expect("grants");
    assert_eq!(grants.len(), Ability::ALL.len());
    for ability in Ability::ALL {
        assert!(grants.contains(&ability));
    }
}

#[tokio::test]
#[ignore]
async fn seeded_operations_role_can_assign_jobs() {
    let pool = db().await;
    let permissions = PermissionService::new(pool.clone());

    let grants = permissions
        .grants_for(Role::Operations)
        .await
        .expect("grants");
    assert!(grants.contains(&Ability::JobAssign));
    assert!(!grants.contains(&Ability::CandidateDelete));
}
