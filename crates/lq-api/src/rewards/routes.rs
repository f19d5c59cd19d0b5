use axum::{Json, Router, extract::State, routing::post};

use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    rewards::{
        engine::{self, RewardEvent},
        model::{
            CourseCompleteRequest, LessonCompleteRequest, QuizCompleteRequest, RewardResponse,
        },
    },
    validation,
};
use lq_rules::xp::EventKind;

/// Create the reward event routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/gamification/events/lesson-complete",
            post(lesson_complete),
        )
        .route("/gamification/events/quiz-complete", post(quiz_complete))
        .route(
            "/gamification/events/course-complete",
            post(course_complete),
        )
}

fn authorize(auth_user: &AuthUser, user_id: uuid::Uuid) -> Result<(), ApiError> {
    if auth_user.user_id != user_id {
        return Err(ApiError::Auth(
            "You are not authorized to report events for this user".to_string(),
        ));
    }
    Ok(())
}

async fn lesson_complete(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<LessonCompleteRequest>,
) -> Result<Json<RewardResponse>, ApiError> {
    authorize(&auth_user, payload.user_id)?;
    validation::check(&payload)?;

    let response = engine::process_event(
        &state.pool,
        RewardEvent {
            user_id: payload.user_id,
            kind: EventKind::LessonComplete,
            reference_id: payload.lesson_id.to_string(),
            perfect: false,
        },
    )
    .await?;

    Ok(Json(response))
}

async fn quiz_complete(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<QuizCompleteRequest>,
) -> Result<Json<RewardResponse>, ApiError> {
    authorize(&auth_user, payload.user_id)?;
    validation::check(&payload)?;
    validation::validate_quiz_score(payload.score, payload.max_score)?;

    // The quiz subsystem only reports passing results; a 100% score earns the
    // perfect award and counter.
    let perfect = payload.percentage >= 100.0;

    let response = engine::process_event(
        &state.pool,
        RewardEvent {
            user_id: payload.user_id,
            kind: EventKind::QuizComplete,
            reference_id: payload.quiz_id.to_string(),
            perfect,
        },
    )
    .await?;

    Ok(Json(response))
}

async fn course_complete(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CourseCompleteRequest>,
) -> Result<Json<RewardResponse>, ApiError> {
    authorize(&auth_user, payload.user_id)?;
    validation::check(&payload)?;

    let response = engine::process_event(
        &state.pool,
        RewardEvent {
            user_id: payload.user_id,
            kind: EventKind::CourseComplete,
            reference_id: payload.course_id.to_string(),
            perfect: false,
        },
    )
    .await?;

    Ok(Json(response))
}
