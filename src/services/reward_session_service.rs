use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::ad_placement::{AdFormat, AdPlacement},
    models::domain::reward_event::{RewardEvent, RewardKind},
    models::domain::watch_session::{QuizSubmission, SubmittedAnswer, WatchSession},
    models::domain::{QuizResult, VideoTask},
    models::dto::request::QuizResponseInput,
    repositories::{AdPlacementRepository, TaskRepository},
    services::points_ledger_service::PointsLedgerService,
    services::quiz_scorer::{Grader, QuizScorer},
    services::watch_session_service::WatchSessionService,
};

pub struct VideoCompletionOutcome {
    pub session: WatchSession,
    /// Points this call added to the ledger; zero on a replay.
    pub points_awarded: i64,
}

pub struct QuizSubmissionOutcome {
    pub session: WatchSession,
    pub result: QuizResult,
}

pub struct AdRewardOutcome {
    /// Points this call added to the ledger; zero on a replay.
    pub amount: i64,
    pub new_balance: i64,
}

/// Ties the session state machine, the scorer and the ledger together.
/// Each operation here maps to one client-facing action.
pub struct RewardSessionService {
    sessions: Arc<WatchSessionService>,
    ledger: Arc<PointsLedgerService>,
    tasks: Arc<dyn TaskRepository>,
    placements: Arc<dyn AdPlacementRepository>,
    grader: Arc<dyn Grader>,
    video_completion_points: i64,
    quiz_bonus_per_correct: i64,
}

impl RewardSessionService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sessions: Arc<WatchSessionService>,
        ledger: Arc<PointsLedgerService>,
        tasks: Arc<dyn TaskRepository>,
        placements: Arc<dyn AdPlacementRepository>,
        grader: Arc<dyn Grader>,
        video_completion_points: i64,
        quiz_bonus_per_correct: i64,
    ) -> Self {
        Self {
            sessions,
            ledger,
            tasks,
            placements,
            grader,
            video_completion_points,
            quiz_bonus_per_correct,
        }
    }

    /// Start watching a task, or resume the user's live session for it.
    pub async fn start_task(&self, user_id: &str, task_id: &str) -> AppResult<WatchSession> {
        self.get_task(task_id).await?;
        self.sessions.start_session(user_id, task_id).await
    }

    pub async fn report_progress(
        &self,
        session_id: &str,
        watch_duration_seconds: i64,
        percent_viewed: Option<f64>,
    ) -> AppResult<WatchSession> {
        self.sessions
            .record_progress(session_id, watch_duration_seconds, percent_viewed)
            .await
    }

    /// Mark the session's video watched and credit the completion reward.
    /// The credit is keyed on the session, so calling this any number of
    /// times pays out exactly once.
    pub async fn finish_video(&self, session_id: &str) -> AppResult<VideoCompletionOutcome> {
        let completion = self.sessions.complete_video(session_id).await?;

        // Credit on replays too: a crash between the transition and the
        // credit would otherwise leave the completion unpaid forever.
        let points_awarded = self
            .ledger
            .credit(
                &completion.session.user_id,
                RewardKind::VideoCompletion,
                self.video_completion_points,
                RewardEvent::video_completion_key(session_id),
            )
            .await?;

        Ok(VideoCompletionOutcome {
            session: completion.session,
            points_awarded,
        })
    }

    /// Grade and record the session's quiz submission, then credit the
    /// bonus. Succeeds at most once per session.
    pub async fn submit_quiz(
        &self,
        session_id: &str,
        responses: Vec<QuizResponseInput>,
    ) -> AppResult<QuizSubmissionOutcome> {
        let session = self.sessions.get_session(session_id).await?;
        let task = self.get_task(&session.task_id).await?;

        Self::check_responses(&task, &responses)?;

        let submission = QuizSubmission {
            session_id: session.id.clone(),
            answers: responses
                .into_iter()
                .map(|r| SubmittedAnswer {
                    question_id: r.question_id,
                    answer_text: r.answer_text,
                })
                .collect(),
            submitted_at: Utc::now(),
        };

        let session = self
            .sessions
            .submit_quiz(session_id, submission.clone())
            .await?;

        let result = QuizScorer::score(
            &task,
            &submission,
            self.grader.as_ref(),
            self.quiz_bonus_per_correct,
        );

        if result.bonus_points > 0 {
            self.ledger
                .credit(
                    &session.user_id,
                    RewardKind::QuizBonus,
                    result.bonus_points,
                    RewardEvent::quiz_bonus_key(session_id),
                )
                .await?;
        }

        Ok(QuizSubmissionOutcome { session, result })
    }

    /// Credit a viewed rewarded ad. The amount comes from the placement,
    /// never from the client; the instance id bounds the payout to one
    /// credit per rendered ad.
    pub async fn credit_ad_reward(
        &self,
        user_id: &str,
        placement_key: &str,
        ad_instance_id: &str,
    ) -> AppResult<AdRewardOutcome> {
        let placement = self
            .placements
            .find_by_key(placement_key)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Ad placement '{}' not found", placement_key))
            })?;

        if !placement.is_enabled {
            return Err(AppError::PlacementDisabled(placement_key.to_string()));
        }
        if placement.ad_format != AdFormat::Rewarded {
            return Err(AppError::ValidationError(format!(
                "Ad placement '{}' is not a rewarded format",
                placement_key
            )));
        }

        let amount = self
            .ledger
            .credit(
                user_id,
                RewardKind::AdView,
                placement.points_reward,
                RewardEvent::ad_view_key(user_id, ad_instance_id),
            )
            .await?;

        let new_balance = self.ledger.balance(user_id).await?;

        Ok(AdRewardOutcome {
            amount,
            new_balance,
        })
    }

    pub async fn session(&self, session_id: &str) -> AppResult<WatchSession> {
        self.sessions.get_session(session_id).await
    }

    pub async fn enabled_placements(&self) -> AppResult<Vec<AdPlacement>> {
        let placements = self.placements.find_all().await?;
        Ok(placements.into_iter().filter(|p| p.is_enabled).collect())
    }

    async fn get_task(&self, task_id: &str) -> AppResult<VideoTask> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video task '{}' not found", task_id)))
    }

    /// Reject a submission whose answers do not line up with the task's
    /// questions before any state changes.
    fn check_responses(task: &VideoTask, responses: &[QuizResponseInput]) -> AppResult<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for response in responses {
            if task.question(&response.question_id).is_none() {
                return Err(AppError::ValidationError(format!(
                    "Question '{}' does not belong to task '{}'",
                    response.question_id, task.id
                )));
            }
            if !seen.insert(response.question_id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Question '{}' answered more than once",
                    response.question_id
                )));
            }
        }
        Ok(())
    }
}
