#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::RwLock;

use viewpoints_server::{
    config::{Config, GradingMode},
    errors::AppResult,
    models::domain::ad_placement::{AdFormat, AdPlacement},
    models::domain::reward_event::RewardEvent,
    models::domain::task::{QuizQuestion, VideoTask},
    models::domain::watch_session::{QuizSubmission, SessionStatus, WatchSession},
    repositories::{
        AdPlacementRepository, RewardEventRepository, TaskRepository, WatchSessionRepository,
    },
    services::{
        AnsweredGrader, Grader, PointsLedgerService, RewardSessionService, SurveyService,
        TaskService, WatchSessionService,
    },
};

// ---------------------------------------------------------------------------
// In-memory repositories. Each write takes the one write lock, which makes
// every operation atomic the same way the real storage's single-document
// updates are.
// ---------------------------------------------------------------------------

pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<String, VideoTask>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn seed(&self, task: VideoTask) {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id.clone(), task);
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<VideoTask>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<VideoTask>> {
        let tasks = self.tasks.read().await;
        let mut items: Vec<_> = tasks.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

pub struct InMemoryWatchSessionRepository {
    sessions: Arc<RwLock<HashMap<String, WatchSession>>>,
}

impl InMemoryWatchSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, id: &str) -> Option<WatchSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }
}

#[async_trait]
impl WatchSessionRepository for InMemoryWatchSessionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WatchSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn find_live(&self, user_id: &str, task_id: &str) -> AppResult<Option<WatchSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .find(|s| s.user_id == user_id && s.task_id == task_id && s.live)
            .cloned())
    }

    async fn create_live(&self, session: WatchSession) -> AppResult<WatchSession> {
        let mut sessions = self.sessions.write().await;
        if let Some(existing) = sessions
            .values()
            .find(|s| s.user_id == session.user_id && s.task_id == session.task_id && s.live)
        {
            return Ok(existing.clone());
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn apply_progress(
        &self,
        id: &str,
        watch_duration_seconds: i64,
        percent_viewed: Option<f64>,
    ) -> AppResult<Option<WatchSession>> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session)
                if matches!(
                    session.status,
                    SessionStatus::Active | SessionStatus::VideoCompleted
                ) =>
            {
                session.watch_duration_seconds =
                    session.watch_duration_seconds.max(watch_duration_seconds);
                if let Some(pct) = percent_viewed {
                    session.percent_viewed = session.percent_viewed.max(pct);
                }
                Ok(Some(session.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn transition_to_video_completed(&self, id: &str) -> AppResult<Option<WatchSession>> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) if session.status == SessionStatus::Active => {
                session.status = SessionStatus::VideoCompleted;
                session.completed_at = Some(Utc::now());
                Ok(Some(session.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn transition_to_quiz_submitted(
        &self,
        id: &str,
        submission: QuizSubmission,
    ) -> AppResult<Option<WatchSession>> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) if session.status == SessionStatus::VideoCompleted => {
                session.status = SessionStatus::QuizSubmitted;
                session.live = false;
                session.quiz_submission = Some(submission);
                Ok(Some(session.clone()))
            }
            _ => Ok(None),
        }
    }
}

pub struct InMemoryRewardEventRepository {
    events: Arc<RwLock<HashMap<String, RewardEvent>>>,
}

impl InMemoryRewardEventRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn event_count(&self) -> usize {
        let events = self.events.read().await;
        events.len()
    }
}

#[async_trait]
impl RewardEventRepository for InMemoryRewardEventRepository {
    async fn insert_idempotent(&self, event: RewardEvent) -> AppResult<(RewardEvent, bool)> {
        let mut events = self.events.write().await;
        if let Some(existing) = events.get(&event.idempotency_key) {
            return Ok((existing.clone(), false));
        }
        events.insert(event.idempotency_key.clone(), event.clone());
        Ok((event, true))
    }

    async fn find_by_idempotency_key(&self, key: &str) -> AppResult<Option<RewardEvent>> {
        let events = self.events.read().await;
        Ok(events.get(key).cloned())
    }

    async fn balance_for_user(&self, user_id: &str) -> AppResult<i64> {
        let events = self.events.read().await;
        Ok(events
            .values()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.amount)
            .sum())
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<RewardEvent>> {
        let events = self.events.read().await;
        let mut items: Vec<_> = events
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

pub struct InMemoryAdPlacementRepository {
    placements: Arc<RwLock<HashMap<String, AdPlacement>>>,
}

impl InMemoryAdPlacementRepository {
    pub fn new() -> Self {
        Self {
            placements: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn seed(&self, placement: AdPlacement) {
        let mut placements = self.placements.write().await;
        placements.insert(placement.placement_key.clone(), placement);
    }
}

#[async_trait]
impl AdPlacementRepository for InMemoryAdPlacementRepository {
    async fn find_by_key(&self, placement_key: &str) -> AppResult<Option<AdPlacement>> {
        let placements = self.placements.read().await;
        Ok(placements.get(placement_key).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<AdPlacement>> {
        let placements = self.placements.read().await;
        let mut items: Vec<_> = placements.values().cloned().collect();
        items.sort_by(|a, b| a.placement_key.cmp(&b.placement_key));
        Ok(items)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const S2S_SECRET: &str = "integration_s2s_secret";

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "viewpoints-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        video_completion_points: 1,
        quiz_bonus_per_correct: 1,
        grading_mode: GradingMode::Answered,
        survey_api_base_url: "https://api.bitlabs.ai".to_string(),
        survey_app_token: "integration_app_token".to_string(),
        survey_s2s_secret: SecretString::from(S2S_SECRET.to_string()),
    }
}

pub fn quiz_task(id: &str) -> VideoTask {
    let mut task = VideoTask::new(
        "Rust in 10 minutes",
        "A quick tour of the language",
        "https://www.youtube.com/watch?v=Jk79QKCvpGk",
        vec![
            QuizQuestion {
                id: "q-1".to_string(),
                text: "What keyword introduces a function?".to_string(),
                correct_answer: Some("fn".to_string()),
            },
            QuizQuestion {
                id: "q-2".to_string(),
                text: "Name something the borrow checker prevents.".to_string(),
                correct_answer: None,
            },
        ],
    );
    task.id = id.to_string();
    task
}

pub fn plain_task(id: &str) -> VideoTask {
    let mut task = VideoTask::new(
        "Conference keynote",
        "Just watch it",
        "https://youtu.be/zXC0KvNKNMc",
        vec![],
    );
    task.id = id.to_string();
    task
}

pub fn rewarded_placement(key: &str, points_reward: i64, is_enabled: bool) -> AdPlacement {
    AdPlacement {
        placement_key: key.to_string(),
        ad_format: AdFormat::Rewarded,
        is_enabled,
        points_reward,
        ad_unit_id: "ca-app-pub-0000000000000000/1111111111".to_string(),
        created_at: Some(Utc::now()),
    }
}

pub fn interstitial_placement(key: &str) -> AdPlacement {
    AdPlacement {
        placement_key: key.to_string(),
        ad_format: AdFormat::Interstitial,
        is_enabled: true,
        points_reward: 0,
        ad_unit_id: "ca-app-pub-0000000000000000/2222222222".to_string(),
        created_at: Some(Utc::now()),
    }
}

// ---------------------------------------------------------------------------
// Harness: the full engine wired over the in-memory repositories.
// ---------------------------------------------------------------------------

pub struct Harness {
    pub engine: RewardSessionService,
    pub ledger: Arc<PointsLedgerService>,
    pub surveys: SurveyService,
    pub task_service: TaskService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub sessions: Arc<InMemoryWatchSessionRepository>,
    pub events: Arc<InMemoryRewardEventRepository>,
    pub placements: Arc<InMemoryAdPlacementRepository>,
}

pub fn harness() -> Harness {
    harness_with(Arc::new(AnsweredGrader), 1, 1)
}

pub fn harness_with(
    grader: Arc<dyn Grader>,
    video_completion_points: i64,
    quiz_bonus_per_correct: i64,
) -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let sessions = Arc::new(InMemoryWatchSessionRepository::new());
    let events = Arc::new(InMemoryRewardEventRepository::new());
    let placements = Arc::new(InMemoryAdPlacementRepository::new());

    let session_service = Arc::new(WatchSessionService::new(sessions.clone()));
    let ledger = Arc::new(PointsLedgerService::new(events.clone()));
    let task_service = TaskService::new(tasks.clone());

    let engine = RewardSessionService::new(
        session_service,
        ledger.clone(),
        tasks.clone(),
        placements.clone(),
        grader,
        video_completion_points,
        quiz_bonus_per_correct,
    );

    let surveys = SurveyService::new(&test_config(), ledger.clone())
        .expect("survey service should construct");

    Harness {
        engine,
        ledger,
        surveys,
        task_service,
        tasks,
        sessions,
        events,
        placements,
    }
}
