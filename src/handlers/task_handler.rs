use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::VideoTaskDto};

#[get("/api/video-tasks")]
async fn get_video_tasks(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let tasks = state.task_service.list_tasks().await?;
    let dtos: Vec<VideoTaskDto> = tasks.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

#[get("/api/video-tasks/{id}")]
async fn get_video_task(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = state.task_service.get_task(&id).await?;
    Ok(HttpResponse::Ok().json(VideoTaskDto::from(task)))
}
