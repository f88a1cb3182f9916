use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static YT_VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)")
        .expect("YT_VIDEO_ID is a valid regex pattern")
});

/// A watchable video with an optional quiz attached. Tasks are seeded by
/// operators; the engine only reads them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub youtube_url: String,
    /// Operator override for the embeddable video id. Empty means the id
    /// is derived from `youtube_url`.
    #[serde(default)]
    pub yt_video_id: String,
    pub questions: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    /// Canonical answer used by key-based grading. Absent for questions
    /// graded on participation alone. Never serialized to clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl VideoTask {
    pub fn new(title: &str, description: &str, youtube_url: &str, questions: Vec<QuizQuestion>) -> Self {
        let yt_video_id = extract_video_id(youtube_url).unwrap_or_default().to_string();
        VideoTask {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            youtube_url: youtube_url.to_string(),
            yt_video_id,
            questions,
            created_at: Some(Utc::now()),
        }
    }

    /// The embeddable video id: the stored override when present,
    /// otherwise derived from the URL.
    pub fn video_id(&self) -> Option<&str> {
        if !self.yt_video_id.is_empty() {
            return Some(&self.yt_video_id);
        }
        extract_video_id(&self.youtube_url)
    }

    pub fn question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn has_quiz(&self) -> bool {
        !self.questions.is_empty()
    }
}

fn extract_video_id(url: &str) -> Option<&str> {
    YT_VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
