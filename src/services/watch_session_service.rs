use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::watch_session::{QuizSubmission, SessionStatus, WatchSession},
    repositories::WatchSessionRepository,
};

/// Result of a completion attempt. `first_completion` tells the caller
/// whether this call performed the transition or replayed one.
pub struct VideoCompletion {
    pub session: WatchSession,
    pub first_completion: bool,
}

/// Drives the session state machine. The repository performs each
/// transition atomically; this service turns a refused transition into
/// the right error by re-reading the session.
pub struct WatchSessionService {
    repository: Arc<dyn WatchSessionRepository>,
}

impl WatchSessionService {
    pub fn new(repository: Arc<dyn WatchSessionRepository>) -> Self {
        Self { repository }
    }

    /// Start a session for (user, task), or resume the live one.
    pub async fn start_session(&self, user_id: &str, task_id: &str) -> AppResult<WatchSession> {
        if let Some(existing) = self.repository.find_live(user_id, task_id).await? {
            return Ok(existing);
        }

        let session = self
            .repository
            .create_live(WatchSession::new_active(user_id, task_id))
            .await?;

        log::info!(
            "Watch session {} started for user {} on task {}",
            session.id,
            user_id,
            task_id
        );
        Ok(session)
    }

    pub async fn get_session(&self, id: &str) -> AppResult<WatchSession> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Watch session '{}' not found", id)))
    }

    pub async fn record_progress(
        &self,
        id: &str,
        watch_duration_seconds: i64,
        percent_viewed: Option<f64>,
    ) -> AppResult<WatchSession> {
        match self
            .repository
            .apply_progress(id, watch_duration_seconds, percent_viewed)
            .await?
        {
            Some(session) => Ok(session),
            None => match self.repository.find_by_id(id).await? {
                None => Err(AppError::NotFound(format!(
                    "Watch session '{}' not found",
                    id
                ))),
                Some(session) => Err(AppError::InvalidState(format!(
                    "Session '{}' no longer accepts progress (status: {})",
                    id, session.status
                ))),
            },
        }
    }

    /// Mark the video watched. Replaying against an already-completed
    /// session is a no-op, not an error.
    pub async fn complete_video(&self, id: &str) -> AppResult<VideoCompletion> {
        match self.repository.transition_to_video_completed(id).await? {
            Some(session) => {
                log::info!("Watch session {} completed its video", id);
                Ok(VideoCompletion {
                    session,
                    first_completion: true,
                })
            }
            None => match self.repository.find_by_id(id).await? {
                None => Err(AppError::NotFound(format!(
                    "Watch session '{}' not found",
                    id
                ))),
                Some(session) if session.status == SessionStatus::VideoCompleted => {
                    Ok(VideoCompletion {
                        session,
                        first_completion: false,
                    })
                }
                Some(session) => Err(AppError::InvalidState(format!(
                    "Session '{}' cannot complete its video (status: {})",
                    id, session.status
                ))),
            },
        }
    }

    /// Attach the one quiz submission the session may hold. The session
    /// must have its video completed and no earlier submission.
    pub async fn submit_quiz(
        &self,
        id: &str,
        submission: QuizSubmission,
    ) -> AppResult<WatchSession> {
        match self
            .repository
            .transition_to_quiz_submitted(id, submission)
            .await?
        {
            Some(session) => {
                log::info!("Watch session {} received its quiz submission", id);
                Ok(session)
            }
            None => match self.repository.find_by_id(id).await? {
                None => Err(AppError::NotFound(format!(
                    "Watch session '{}' not found",
                    id
                ))),
                Some(session) if session.status == SessionStatus::Active => {
                    Err(AppError::PrecedenceViolation(format!(
                        "Session '{}' has not completed its video yet",
                        id
                    )))
                }
                Some(_) => Err(AppError::AlreadySubmitted(format!(
                    "Session '{}' already has a quiz submission",
                    id
                ))),
            },
        }
    }
}
