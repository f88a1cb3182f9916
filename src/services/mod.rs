pub mod points_ledger_service;
pub mod quiz_scorer;
pub mod reward_session_service;
pub mod survey_service;
pub mod task_service;
pub mod watch_session_service;

pub use points_ledger_service::PointsLedgerService;
pub use quiz_scorer::{AnswerKeyGrader, AnsweredGrader, Grader, QuizScorer};
pub use reward_session_service::RewardSessionService;
pub use survey_service::SurveyService;
pub use task_service::TaskService;
pub use watch_session_service::WatchSessionService;
