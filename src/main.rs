use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use nots_pmh_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::auth::require_bearer_auth,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login));

    let protected_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/jobs",
            get(routes::jobs::list_jobs).post(routes::jobs::create_job),
        )
        .route(
            "/api/jobs/:id",
            get(routes::jobs::get_job)
                .patch(routes::jobs::update_job)
                .delete(routes::jobs::delete_job),
        )
        .route("/api/jobs/:id/assign", post(routes::jobs::assign_job))
        .route("/api/jobs/:id/unassign", post(routes::jobs::unassign_job))
        .route(
            "/api/candidates",
            get(routes::candidates::list_candidates).post(routes::candidates::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidates::get_candidate)
                .patch(routes::candidates::update_candidate)
                .delete(routes::candidates::delete_candidate),
        )
        .route(
            "/api/candidates/:id/advance",
            post(routes::candidates::advance_candidate),
        )
        .route(
            "/api/candidates/:id/revert",
            post(routes::candidates::revert_candidate),
        )
        .route(
            "/api/permissions",
            get(routes::permissions::list_permissions)
                .post(routes::permissions::grant_permission)
                .delete(routes::permissions::revoke_permission),
        )
        .route("/api/permissions/me", get(routes::permissions::my_abilities))
        .route(
            "/api/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/api/users/:id",
            get(routes::users::get_user)
                .patch(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/api/uploads/photo", post(routes::uploads::upload_photo))
        .layer(axum::middleware::from_fn(require_bearer_auth));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = public_api
        .merge(protected_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
