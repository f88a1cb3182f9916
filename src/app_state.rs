use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoAdPlacementRepository, MongoRewardEventRepository, MongoTaskRepository,
        MongoWatchSessionRepository,
    },
    services::quiz_scorer::grader_for,
    services::{
        PointsLedgerService, RewardSessionService, SurveyService, TaskService, WatchSessionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
    pub reward_sessions: Arc<RewardSessionService>,
    pub ledger: Arc<PointsLedgerService>,
    pub surveys: Arc<SurveyService>,
    pub config: Arc<Config>,
    pub db: Database,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let task_repository = Arc::new(MongoTaskRepository::new(&db));
        task_repository.ensure_indexes().await?;

        let session_repository = Arc::new(MongoWatchSessionRepository::new(&db));
        session_repository.ensure_indexes().await?;

        let reward_repository = Arc::new(MongoRewardEventRepository::new(&db));
        reward_repository.ensure_indexes().await?;

        let placement_repository = Arc::new(MongoAdPlacementRepository::new(&db));
        placement_repository.ensure_indexes().await?;

        let sessions = Arc::new(WatchSessionService::new(session_repository));
        let ledger = Arc::new(PointsLedgerService::new(reward_repository));
        let task_service = Arc::new(TaskService::new(task_repository.clone()));

        let reward_sessions = Arc::new(RewardSessionService::new(
            sessions,
            ledger.clone(),
            task_repository,
            placement_repository,
            grader_for(config.grading_mode),
            config.video_completion_points,
            config.quiz_bonus_per_correct,
        ));

        let surveys = Arc::new(SurveyService::new(&config, ledger.clone())?);

        Ok(Self {
            task_service,
            reward_sessions,
            ledger,
            surveys,
            config: Arc::new(config),
            db,
        })
    }
}
