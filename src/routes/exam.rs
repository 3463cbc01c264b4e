use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::dto::exam_dto::{
    AttemptSummary, ExamInfoQuery, ExamInfoResponse, ListAttemptsQuery, SubmitExamRequest,
    SubmitExamResponse,
};
use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::auth::Claims;
use crate::services::attempt_service::AttemptService;
use crate::services::audit_service::AuditService;
use crate::services::enrollment_service::EnrollmentService;
use crate::services::scoring_service::ScoringService;
use crate::AppState;

/// The single final exam this service grades.
pub const EXAM_SLUG: &str = "forklift-operator-final";

#[utoipa::path(
    get,
    path = "/api/training/exam",
    params(
        ("locale" = Option<String>, Query, description = "Preferred bank locale")
    ),
    responses(
        (status = 200, description = "Exam metadata for the served locale", body = Json<ExamInfoResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Default exam bank unavailable")
    )
)]
#[axum::debug_handler]
pub async fn exam_info(
    State(state): State<AppState>,
    Query(query): Query<ExamInfoQuery>,
) -> Result<impl IntoResponse> {
    let (locale, bank) = state.exam_bank.load(query.locale.as_deref()).await?;
    Ok(Json(ExamInfoResponse {
        exam_slug: EXAM_SLUG.to_string(),
        locale,
        total_questions: bank.questions.len(),
        pass_pct: bank.pass_mark(),
    }))
}

/// Grades a submission and runs the follow-ups for a pass. Grading itself is
/// the only step allowed to fail the request once the caller is known; the
/// attempt insert, enrollment update, certificate call and audit entry each
/// log their own failures and the response reports what actually happened.
#[utoipa::path(
    post,
    path = "/api/training/exam/submit",
    request_body = SubmitExamRequest,
    responses(
        (status = 200, description = "Graded result, including certificate outcome", body = Json<SubmitExamResponse>),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Default exam bank unavailable")
    )
)]
#[axum::debug_handler]
pub async fn submit_exam(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(req): AppJson<SubmitExamRequest>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;

    let (locale, bank) = state.exam_bank.load(req.locale.as_deref()).await?;
    let result = ScoringService::score(&bank, &req.selected_ids, &req.answers);

    tracing::info!(
        "Exam graded: user={}, locale={}, score={}%, correct={}/{}, passed={}",
        user_id,
        locale,
        result.score_pct,
        result.correct,
        result.total,
        result.passed
    );

    let attempts = AttemptService::new(state.pool.clone());
    if let Err(e) = attempts
        .record(
            user_id,
            EXAM_SLUG,
            &req.selected_ids,
            &req.answers,
            result.score_pct,
            result.passed,
        )
        .await
    {
        tracing::error!("Failed to record exam attempt for user {}: {:?}", user_id, e);
    }

    let mut certificate_issued = false;
    let mut certificate_error: Option<String> = None;

    if result.passed {
        let enrollments = EnrollmentService::new(state.pool.clone());
        match enrollments.latest_for_user(user_id).await {
            Ok(Some(enrollment)) => {
                if let Err(e) = enrollments.mark_passed(enrollment.id).await {
                    tracing::error!(
                        "Failed to mark enrollment {} passed: {:?}",
                        enrollment.id,
                        e
                    );
                }
                match state.certificate_service.issue(enrollment.id).await {
                    Ok(()) => certificate_issued = true,
                    Err(e) => {
                        tracing::error!(
                            "Certificate issue failed for enrollment {}: {}",
                            enrollment.id,
                            e
                        );
                        certificate_error = Some(e);
                    }
                }
            }
            Ok(None) => {
                tracing::warn!(
                    "User {} passed the exam without an enrollment on file",
                    user_id
                );
            }
            Err(e) => {
                tracing::error!("Enrollment lookup failed for user {}: {:?}", user_id, e);
                certificate_error = Some(format!("enrollment lookup failed: {}", e));
            }
        }
    }

    let audit = AuditService::new(state.pool.clone());
    if let Err(e) = audit
        .log(
            Some(user_id),
            "final_exam_submitted",
            Some(format!(
                "locale={} score={}% passed={}",
                locale, result.score_pct, result.passed
            )),
        )
        .await
    {
        tracing::error!("Failed to write audit entry for user {}: {:?}", user_id, e);
    }

    Ok(Json(SubmitExamResponse {
        ok: true,
        passed: result.passed,
        score_pct: result.score_pct,
        correct: result.correct,
        total: result.total,
        incorrect: result.incorrect,
        certificate_issued,
        certificate_error,
    }))
}

#[utoipa::path(
    get,
    path = "/api/training/attempts",
    params(
        ("limit" = Option<i64>, Query, description = "Max rows, capped at 100")
    ),
    responses(
        (status = 200, description = "Most recent attempts for the caller", body = Json<Vec<AttemptSummary>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_my_attempts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListAttemptsQuery>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let attempts = AttemptService::new(state.pool.clone());
    let rows = attempts.list_for_user(user_id, limit).await?;
    let summaries: Vec<AttemptSummary> = rows.into_iter().map(AttemptSummary::from).collect();
    Ok(Json(summaries))
}
