use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use training_backend::{config::Config, database::pool::create_pool, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env()?;

    let pool = create_pool(&config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool, config.clone());

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let training_api = Router::new()
        .route("/api/training/exam", get(routes::exam::exam_info))
        .route("/api/training/exam/submit", post(routes::exam::submit_exam))
        .route("/api/training/attempts", get(routes::exam::list_my_attempts))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            training_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            training_backend::middleware::rate_limit::RateLimiter::new(config.public_rps),
            training_backend::middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/enrollments",
            post(routes::admin::create_enrollment),
        )
        .route(
            "/api/admin/enrollments/:user_id",
            get(routes::admin::list_user_enrollments),
        )
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            training_backend::middleware::auth::require_admin,
        ));

    let app = base_routes
        .merge(training_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
