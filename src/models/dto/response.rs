use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::ad_placement::{AdFormat, AdPlacement};
use crate::models::domain::reward_event::{RewardEvent, RewardKind};
use crate::models::domain::task::{QuizQuestion, VideoTask};
use crate::models::domain::watch_session::{SessionStatus, WatchSession};
use crate::models::domain::QuizResult;

/// Question as shown to clients. The answer key never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionDto {
    pub id: String,
    pub text: String,
}

impl From<QuizQuestion> for QuizQuestionDto {
    fn from(question: QuizQuestion) -> Self {
        QuizQuestionDto {
            id: question.id,
            text: question.text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoTaskDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub youtube_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub questions: Vec<QuizQuestionDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<VideoTask> for VideoTaskDto {
    fn from(task: VideoTask) -> Self {
        let video_id = task.video_id().map(|id| id.to_string());
        VideoTaskDto {
            id: task.id,
            title: task.title,
            description: task.description,
            youtube_url: task.youtube_url,
            video_id,
            questions: task.questions.into_iter().map(Into::into).collect(),
            created_at: task.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchSessionDto {
    pub id: String,
    pub user_id: String,
    pub task_id: String,
    pub status: SessionStatus,
    pub watch_duration_seconds: i64,
    pub percent_viewed: f64,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<WatchSession> for WatchSessionDto {
    fn from(session: WatchSession) -> Self {
        WatchSessionDto {
            id: session.id,
            user_id: session.user_id,
            task_id: session.task_id,
            status: session.status,
            watch_duration_seconds: session.watch_duration_seconds,
            percent_viewed: session.percent_viewed,
            started_at: session.started_at,
            completed_at: session.completed_at,
        }
    }
}

/// Returned from video completion: the session plus what the completion
/// was worth. `points_awarded` is zero on replays.
#[derive(Debug, Clone, Serialize)]
pub struct VideoCompletionDto {
    pub session: WatchSessionDto,
    pub points_awarded: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResultDto {
    pub quiz_score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub bonus_points: i64,
    pub total_points_awarded: i64,
}

impl QuizResultDto {
    pub fn from_result(result: QuizResult, video_completion_points: i64) -> Self {
        QuizResultDto {
            quiz_score: result.score_percent,
            correct_answers: result.correct_count,
            total_questions: result.total_count,
            bonus_points: result.bonus_points,
            total_points_awarded: video_completion_points + result.bonus_points,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdRewardResponse {
    pub amount: i64,
    pub new_balance: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdPlacementDto {
    pub placement_key: String,
    pub ad_format: AdFormat,
    pub is_enabled: bool,
    pub points_reward: i64,
    pub ad_unit_id: String,
}

impl From<AdPlacement> for AdPlacementDto {
    fn from(placement: AdPlacement) -> Self {
        AdPlacementDto {
            placement_key: placement.placement_key,
            ad_format: placement.ad_format,
            is_enabled: placement.is_enabled,
            points_reward: placement.points_reward,
            ad_unit_id: placement.ad_unit_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPointsResponse {
    pub user_id: String,
    pub total_points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardEventDto {
    pub id: String,
    pub kind: RewardKind,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<RewardEvent> for RewardEventDto {
    fn from(event: RewardEvent) -> Self {
        RewardEventDto {
            id: event.id,
            kind: event.kind,
            amount: event.amount,
            created_at: event.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyStartLinkResponse {
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        StatusResponse {
            status: "ok".to_string(),
        }
    }
}
