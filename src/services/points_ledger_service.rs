use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::reward_event::{RewardEvent, RewardKind},
    repositories::RewardEventRepository,
};

/// The single write path into the points ledger. Everything that grants
/// points goes through `credit`, which makes retried grants free.
pub struct PointsLedgerService {
    repository: Arc<dyn RewardEventRepository>,
}

impl PointsLedgerService {
    pub fn new(repository: Arc<dyn RewardEventRepository>) -> Self {
        Self { repository }
    }

    /// Credit `amount` points under `idempotency_key`. Returns the amount
    /// this call actually added: zero when the key was already credited
    /// or the amount is zero.
    pub async fn credit(
        &self,
        user_id: &str,
        kind: RewardKind,
        amount: i64,
        idempotency_key: String,
    ) -> AppResult<i64> {
        if amount < 0 {
            return Err(AppError::ValidationError(
                "credit amount must not be negative".to_string(),
            ));
        }
        if amount == 0 {
            log::debug!(
                "Skipping zero-amount credit for user {} ({})",
                user_id,
                idempotency_key
            );
            return Ok(0);
        }

        let event = RewardEvent::new(user_id, kind, amount, idempotency_key);
        let (stored, created) = self.repository.insert_idempotent(event).await?;

        if created {
            log::info!(
                "Credited {} points to user {} ({})",
                stored.amount,
                stored.user_id,
                stored.kind
            );
            Ok(stored.amount)
        } else {
            log::info!(
                "Replayed credit ignored for user {} (key {})",
                stored.user_id,
                stored.idempotency_key
            );
            Ok(0)
        }
    }

    pub async fn balance(&self, user_id: &str) -> AppResult<i64> {
        self.repository.balance_for_user(user_id).await
    }

    pub async fn history(&self, user_id: &str) -> AppResult<Vec<RewardEvent>> {
        self.repository.find_by_user(user_id).await
    }
}
