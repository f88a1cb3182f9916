use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    VideoCompletion,
    QuizBonus,
    AdView,
    SurveyReward,
}

impl RewardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardKind::VideoCompletion => "video_completion",
            RewardKind::QuizBonus => "quiz_bonus",
            RewardKind::AdView => "ad_view",
            RewardKind::SurveyReward => "survey_reward",
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only ledger entry. Events are never updated or deleted;
/// the idempotency key is what makes retried credits safe.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RewardEvent {
    pub id: String,
    pub user_id: String,
    pub kind: RewardKind,
    pub amount: i64,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}

impl RewardEvent {
    pub fn new(user_id: &str, kind: RewardKind, amount: i64, idempotency_key: String) -> Self {
        RewardEvent {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            kind,
            amount,
            idempotency_key,
            created_at: Utc::now(),
        }
    }

    pub fn video_completion_key(session_id: &str) -> String {
        format!("video-complete:{}", session_id)
    }

    pub fn quiz_bonus_key(session_id: &str) -> String {
        format!("quiz-bonus:{}", session_id)
    }

    pub fn ad_view_key(user_id: &str, ad_instance_id: &str) -> String {
        format!("ad-view:{}:{}", user_id, ad_instance_id)
    }

    pub fn survey_reward_key(user_id: &str, transaction_id: &str) -> String {
        format!("survey-reward:{}:{}", user_id, transaction_id)
    }
}
