use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartWatchSessionRequest {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,

    #[validate(length(min = 1, max = 100))]
    pub task_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WatchProgressRequest {
    /// Total seconds watched so far, as reported by the player.
    #[validate(range(min = 0, max = 86400))]
    pub watch_duration_seconds: i64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub percent_viewed: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizResponseInput {
    #[validate(length(min = 1, max = 100))]
    pub question_id: String,

    /// May be empty; an unanswered question is still part of a submission.
    #[validate(length(max = 2000))]
    pub answer_text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(nested)]
    pub responses: Vec<QuizResponseInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdRewardRequest {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,

    #[validate(length(min = 1, max = 200))]
    pub placement_key: String,

    /// Client-generated id for one rendered ad, unique per display.
    #[validate(length(min = 1, max = 200))]
    pub ad_instance_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SurveyStartRequest {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,

    #[validate(length(min = 1, max = 200))]
    pub survey_id: String,

    pub click_id: Option<String>,
}

/// Query parameters of the provider's server-to-server reward callback.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyCallbackParams {
    pub user_id: String,
    pub transaction_id: String,
    pub amount: i64,
    pub signature: String,
}
