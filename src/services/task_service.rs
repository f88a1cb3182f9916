use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::VideoTask,
    repositories::TaskRepository,
};

/// Read surface over the task catalog. Tasks are seeded out of band, so
/// there is no write path here.
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_tasks(&self) -> AppResult<Vec<VideoTask>> {
        self.repository.find_all().await
    }

    pub async fn get_task(&self, id: &str) -> AppResult<VideoTask> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video task '{}' not found", id)))
    }
}
