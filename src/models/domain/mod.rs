pub mod ad_placement;
pub mod quiz_result;
pub mod reward_event;
pub mod task;
pub mod watch_session;
pub use ad_placement::AdPlacement;
pub use quiz_result::QuizResult;
pub use reward_event::RewardEvent;
pub use task::VideoTask;
pub use watch_session::WatchSession;
