use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::admin_dto::{CreateEnrollmentPayload, EnrollmentResponse};
use crate::error::Result;
use crate::extract::AppJson;
use crate::services::enrollment_service::EnrollmentService;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/admin/enrollments",
    request_body = CreateEnrollmentPayload,
    responses(
        (status = 201, description = "Enrollment created", body = Json<EnrollmentResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown course slug")
    )
)]
#[axum::debug_handler]
pub async fn create_enrollment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEnrollmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let enrollments = EnrollmentService::new(state.pool.clone());
    let enrollment = enrollments
        .create(
            payload.user_id,
            &payload.course_slug,
            payload.progress_pct.unwrap_or(0),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from(enrollment))))
}

#[utoipa::path(
    get,
    path = "/api/admin/enrollments/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Platform user ID")
    ),
    responses(
        (status = 200, description = "Enrollments for the user, newest first", body = Json<Vec<EnrollmentResponse>>),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn list_user_enrollments(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let enrollments = EnrollmentService::new(state.pool.clone());
    let rows = enrollments.list_for_user(user_id).await?;
    let out: Vec<EnrollmentResponse> = rows.into_iter().map(EnrollmentResponse::from).collect();
    Ok(Json(out))
}
