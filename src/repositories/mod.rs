pub mod ad_placement_repository;
pub mod reward_event_repository;
pub mod task_repository;
pub mod watch_session_repository;

pub use ad_placement_repository::{AdPlacementRepository, MongoAdPlacementRepository};
pub use reward_event_repository::{MongoRewardEventRepository, RewardEventRepository};
pub use task_repository::{MongoTaskRepository, TaskRepository};
pub use watch_session_repository::{MongoWatchSessionRepository, WatchSessionRepository};

/// Duplicate key (E11000) is how unique indexes tell us a writer lost a
/// race. Callers turn it into a re-read instead of an error.
pub(crate) fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    matches!(
        &*err.kind,
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(we))
            if we.code == 11000
    )
}
