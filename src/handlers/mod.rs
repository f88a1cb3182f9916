pub mod health_handler;
pub mod reward_handler;
pub mod session_handler;
pub mod survey_handler;
pub mod task_handler;

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use reward_handler::{credit_ad_reward, get_ad_placements, get_user_points, get_user_rewards};
pub use session_handler::{
    complete_video, get_watch_session, report_progress, start_watch_session, submit_quiz,
};
pub use survey_handler::{get_surveys, start_survey, survey_reward_callback};
pub use task_handler::{get_video_task, get_video_tasks};
