use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, to_bson},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::repositories::is_duplicate_key_error;
use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::watch_session::{QuizSubmission, SessionStatus, WatchSession},
};

/// Storage for watch sessions. Every state transition here is a single
/// conditional update; a `None` return means the precondition did not
/// hold and the caller should re-read to find out why.
#[async_trait]
pub trait WatchSessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WatchSession>>;
    async fn find_live(&self, user_id: &str, task_id: &str) -> AppResult<Option<WatchSession>>;

    /// Insert `session` as the live session for its (user, task) pair.
    /// If another live session already holds the slot, that session is
    /// returned instead of the new one.
    async fn create_live(&self, session: WatchSession) -> AppResult<WatchSession>;

    /// Fold a progress report into the session. Counters only ever grow,
    /// so a late or duplicate report can never lower them.
    async fn apply_progress(
        &self,
        id: &str,
        watch_duration_seconds: i64,
        percent_viewed: Option<f64>,
    ) -> AppResult<Option<WatchSession>>;

    async fn transition_to_video_completed(&self, id: &str) -> AppResult<Option<WatchSession>>;

    async fn transition_to_quiz_submitted(
        &self,
        id: &str,
        submission: QuizSubmission,
    ) -> AppResult<Option<WatchSession>>;
}

pub struct MongoWatchSessionRepository {
    collection: Collection<WatchSession>,
}

impl MongoWatchSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("watch_sessions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for watch_sessions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // One live session per (user, task). The partial filter keeps
        // finished sessions out of the constraint so a rewatch can start.
        let live_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "task_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("live_session_unique".to_string())
                    .partial_filter_expression(doc! { "live": true })
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(live_index).await?;

        log::info!("Successfully created indexes for watch_sessions collection");
        Ok(())
    }
}

#[async_trait]
impl WatchSessionRepository for MongoWatchSessionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WatchSession>> {
        let session = self.collection.find_one(doc! { "id": id }).await?;
        Ok(session)
    }

    async fn find_live(&self, user_id: &str, task_id: &str) -> AppResult<Option<WatchSession>> {
        let session = self
            .collection
            .find_one(doc! { "user_id": user_id, "task_id": task_id, "live": true })
            .await?;
        Ok(session)
    }

    async fn create_live(&self, session: WatchSession) -> AppResult<WatchSession> {
        match self.collection.insert_one(&session).await {
            Ok(_) => Ok(session),
            Err(err) if is_duplicate_key_error(&err) => {
                // Lost the start race; hand back the session that won.
                match self.find_live(&session.user_id, &session.task_id).await? {
                    Some(existing) => Ok(existing),
                    None => Err(AppError::StorageError(
                        "live session conflict resolved mid-flight, retry".to_string(),
                    )),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn apply_progress(
        &self,
        id: &str,
        watch_duration_seconds: i64,
        percent_viewed: Option<f64>,
    ) -> AppResult<Option<WatchSession>> {
        let mut max_doc = doc! { "watch_duration_seconds": watch_duration_seconds };
        if let Some(pct) = percent_viewed {
            max_doc.insert("percent_viewed", pct);
        }

        let session = self
            .collection
            .find_one_and_update(
                doc! {
                    "id": id,
                    "status": { "$in": [
                        SessionStatus::Active.as_str(),
                        SessionStatus::VideoCompleted.as_str(),
                    ] },
                },
                doc! { "$max": max_doc },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(session)
    }

    async fn transition_to_video_completed(&self, id: &str) -> AppResult<Option<WatchSession>> {
        let session = self
            .collection
            .find_one_and_update(
                doc! { "id": id, "status": SessionStatus::Active.as_str() },
                doc! { "$set": {
                    "status": SessionStatus::VideoCompleted.as_str(),
                    "completed_at": to_bson(&Utc::now())?,
                } },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(session)
    }

    async fn transition_to_quiz_submitted(
        &self,
        id: &str,
        submission: QuizSubmission,
    ) -> AppResult<Option<WatchSession>> {
        let session = self
            .collection
            .find_one_and_update(
                doc! { "id": id, "status": SessionStatus::VideoCompleted.as_str() },
                doc! { "$set": {
                    "status": SessionStatus::QuizSubmitted.as_str(),
                    "live": false,
                    "quiz_submission": to_bson(&submission)?,
                } },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(session)
    }
}
