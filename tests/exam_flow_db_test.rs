use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use training_backend::{config::Config, routes, AppState};

const JWT_SECRET: &str = "test_secret_key";

#[derive(Clone, Default)]
struct IssuedCerts {
    inner: Arc<Mutex<Vec<JsonValue>>>,
}

async fn record_issue(State(certs): State<IssuedCerts>, Json(body): Json<JsonValue>) -> StatusCode {
    certs.inner.lock().unwrap().push(body);
    StatusCode::OK
}

async fn spawn_cert_stub(certs: IssuedCerts) -> String {
    let app = Router::new()
        .route("/api/cert/issue", post(record_issue))
        .with_state(certs);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

fn app_for(state: AppState) -> Router {
    let base = Router::new().route("/health", get(routes::health::health));
    let training_api = Router::new()
        .route("/api/training/exam", get(routes::exam::exam_info))
        .route("/api/training/exam/submit", post(routes::exam::submit_exam))
        .route("/api/training/attempts", get(routes::exam::list_my_attempts))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            training_backend::middleware::auth::require_bearer_auth,
        ));
    base.merge(training_api).with_state(state)
}

fn bearer_for(user_id: Uuid) -> String {
    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        role: Option<String>,
    }
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
    let token = encode(
        &Header::default(),
        &Claims {
            sub: user_id.to_string(),
            exp,
            role: Some("user".to_string()),
        },
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("sign token");
    format!("Bearer {}", token)
}

async fn submit(app: &Router, auth: &str, body: JsonValue) -> JsonValue {
    let req = Request::builder()
        .method("POST")
        .uri("/api/training/exam/submit")
        .header("content-type", "application/json")
        .header("authorization", auth)
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// Needs a live Postgres. Run with:
//   DATABASE_URL=postgres://... cargo test --test exam_flow_db_test -- --ignored
#[tokio::test]
#[ignore]
async fn exam_flow_end_to_end() {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let certs = IssuedCerts::default();
    let cert_url = spawn_cert_stub(certs.clone()).await;

    let config = Config {
        server_address: "127.0.0.1:0".to_string(),
        database_url: database_url.clone(),
        jwt_secret: JWT_SECRET.to_string(),
        cert_service_url: cert_url,
        internal_api_secret: "internal_test_secret".to_string(),
        exam_bank_dir: "data/exam".to_string(),
        public_rps: 100,
    };
    let state = AppState::new(pool.clone(), config);
    let app = app_for(state);

    let user_id = Uuid::new_v4();
    let auth = bearer_for(user_id);

    let enrollment_service =
        training_backend::services::enrollment_service::EnrollmentService::new(pool.clone());
    let enrollment = enrollment_service
        .create(user_id, "forklift-operator", 40)
        .await
        .expect("seed enrollment");
    assert!(!enrollment.passed);

    let body = submit(
        &app,
        &auth,
        json!({
            "selected_ids": [
                "preop-inspection",
                "capacity-plate",
                "fork-height-travel",
                "pedestrian-priority",
                "ramp-travel"
            ],
            "answers": {
                "preop-inspection": "a",
                "capacity-plate": "c",
                "fork-height-travel": "b",
                "pedestrian-priority": "d",
                "ramp-travel": "b"
            }
        }),
    )
    .await;

    assert_eq!(body["passed"], true);
    assert_eq!(body["score_pct"], 100);
    assert_eq!(body["certificate_issued"], true);
    assert!(body["certificate_error"].is_null());

    let (passed, progress_pct): (bool, i32) =
        sqlx::query_as::<_, (bool, i32)>(r#"SELECT passed, progress_pct FROM enrollments WHERE id = $1"#)
            .bind(enrollment.id)
            .fetch_one(&pool)
            .await
            .expect("enrollment row");
    assert!(passed);
    assert_eq!(progress_pct, 100);

    let issued = certs.inner.lock().unwrap().clone();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0]["enrollment_id"], enrollment.id.to_string());

    // A later failed attempt must not reset the enrollment
    let body = submit(
        &app,
        &auth,
        json!({
            "selected_ids": ["preop-inspection", "capacity-plate"],
            "answers": {"preop-inspection": "b"}
        }),
    )
    .await;
    assert_eq!(body["passed"], false);
    assert_eq!(body["certificate_issued"], false);

    let (passed, progress_pct): (bool, i32) =
        sqlx::query_as::<_, (bool, i32)>(r#"SELECT passed, progress_pct FROM enrollments WHERE id = $1"#)
            .bind(enrollment.id)
            .fetch_one(&pool)
            .await
            .expect("enrollment row");
    assert!(passed);
    assert_eq!(progress_pct, 100);

    let attempts = sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM exam_attempts WHERE user_id = $1"#,
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .expect("attempt count");
    assert_eq!(attempts, 2);

    let audits = sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM audit_logs WHERE actor_id = $1 AND action = 'final_exam_submitted'"#,
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .expect("audit count");
    assert_eq!(audits, 2);

    // History endpoint reflects both attempts, newest first
    let req = Request::builder()
        .uri("/api/training/attempts")
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let history: JsonValue = serde_json::from_slice(&bytes).unwrap();
    let rows = history.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["passed"], false);
    assert_eq!(rows[1]["passed"], true);
}
