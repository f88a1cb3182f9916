use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle of a watch session. Transitions only move forward:
/// Active -> VideoCompleted -> QuizSubmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    VideoCompleted,
    QuizSubmitted,
}

impl SessionStatus {
    /// String form used in storage filters. Must stay in sync with the
    /// serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::VideoCompleted => "video_completed",
            SessionStatus::QuizSubmitted => "quiz_submitted",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer_text: String,
}

/// The one quiz submission a session may ever hold.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSubmission {
    pub session_id: String,
    pub answers: Vec<SubmittedAnswer>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WatchSession {
    pub id: String,
    pub user_id: String,
    pub task_id: String,
    pub status: SessionStatus,
    /// True while this is the user's current session for the task.
    /// Cleared when the quiz is submitted, freeing the slot for a rewatch.
    pub live: bool,
    pub watch_duration_seconds: i64,
    pub percent_viewed: f64,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_submission: Option<QuizSubmission>,
}

impl WatchSession {
    pub fn new_active(user_id: &str, task_id: &str) -> Self {
        WatchSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            task_id: task_id.to_string(),
            status: SessionStatus::Active,
            live: true,
            watch_duration_seconds: 0,
            percent_viewed: 0.0,
            started_at: Utc::now(),
            completed_at: None,
            quiz_submission: None,
        }
    }
}
