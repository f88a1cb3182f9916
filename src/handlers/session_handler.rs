use std::sync::Arc;

use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{StartWatchSessionRequest, SubmitQuizRequest, WatchProgressRequest},
    models::dto::response::{QuizResultDto, VideoCompletionDto, WatchSessionDto},
};

#[post("/api/watch-sessions")]
async fn start_watch_session(
    state: web::Data<Arc<AppState>>,
    request: web::Json<StartWatchSessionRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let session = state
        .reward_sessions
        .start_task(&request.user_id, &request.task_id)
        .await?;
    Ok(HttpResponse::Ok().json(WatchSessionDto::from(session)))
}

#[get("/api/watch-sessions/{id}")]
async fn get_watch_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session = state.reward_sessions.session(&id).await?;
    Ok(HttpResponse::Ok().json(WatchSessionDto::from(session)))
}

#[put("/api/watch-sessions/{id}/progress")]
async fn report_progress(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<WatchProgressRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let session = state
        .reward_sessions
        .report_progress(&id, request.watch_duration_seconds, request.percent_viewed)
        .await?;
    Ok(HttpResponse::Ok().json(WatchSessionDto::from(session)))
}

#[post("/api/watch-sessions/{id}/complete-video")]
async fn complete_video(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.reward_sessions.finish_video(&id).await?;
    Ok(HttpResponse::Ok().json(VideoCompletionDto {
        session: outcome.session.into(),
        points_awarded: outcome.points_awarded,
    }))
}

#[post("/api/watch-sessions/{id}/quiz-responses")]
async fn submit_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let outcome = state
        .reward_sessions
        .submit_quiz(&id, request.into_inner().responses)
        .await?;
    let dto = QuizResultDto::from_result(outcome.result, state.config.video_completion_points);
    Ok(HttpResponse::Ok().json(dto))
}
