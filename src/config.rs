use secrecy::SecretString;
use std::env;

/// How quiz answers are judged when computing the bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradingMode {
    /// Any non-empty answer counts as correct.
    Answered,
    /// Answers are checked against the question's answer key when one
    /// exists, falling back to the non-empty rule when it does not.
    AnswerKey,
}

impl GradingMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "answer_key" | "answer-key" => GradingMode::AnswerKey,
            _ => GradingMode::Answered,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub video_completion_points: i64,
    pub quiz_bonus_per_correct: i64,
    pub grading_mode: GradingMode,
    pub survey_api_base_url: String,
    pub survey_app_token: String,
    pub survey_s2s_secret: SecretString,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "viewpoints-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            video_completion_points: env::var("VIDEO_COMPLETION_POINTS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1),
            quiz_bonus_per_correct: env::var("QUIZ_BONUS_PER_CORRECT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1),
            grading_mode: GradingMode::parse(
                &env::var("GRADING_MODE").unwrap_or_else(|_| "answered".to_string()),
            ),
            survey_api_base_url: env::var("SURVEY_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.bitlabs.ai".to_string()),
            survey_app_token: env::var("SURVEY_APP_TOKEN")
                .unwrap_or_else(|_| "survey_app_token".to_string()),
            survey_s2s_secret: SecretString::from(
                env::var("SURVEY_S2S_SECRET")
                    .unwrap_or_else(|_| "dev_s2s_secret_change_in_production".to_string()),
            ),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let s2s_secret = self.survey_s2s_secret.expose_secret();

        // Check for dangerous default values
        if s2s_secret == "dev_s2s_secret_change_in_production" {
            panic!(
                "FATAL: SURVEY_S2S_SECRET is using default value! Set SURVEY_S2S_SECRET environment variable to the secret shared with the survey provider."
            );
        }

        if s2s_secret.len() < 16 {
            panic!(
                "FATAL: SURVEY_S2S_SECRET is too short ({}). Must be at least 16 characters.",
                s2s_secret.len()
            );
        }

        if self.survey_app_token == "survey_app_token" {
            panic!(
                "FATAL: SURVEY_APP_TOKEN is using default value! Set SURVEY_APP_TOKEN environment variable."
            );
        }

        if self.video_completion_points < 0 || self.quiz_bonus_per_correct < 0 {
            panic!("FATAL: reward amounts must not be negative.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "viewpoints-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            video_completion_points: 1,
            quiz_bonus_per_correct: 1,
            grading_mode: GradingMode::Answered,
            survey_api_base_url: "https://api.bitlabs.ai".to_string(),
            survey_app_token: "test_app_token".to_string(),
            survey_s2s_secret: SecretString::from("test_s2s_secret_key".to_string()),
        }
    }
}
