use std::sync::Arc;
use std::time::Duration;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use uuid::Uuid;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::reward_event::{RewardEvent, RewardKind},
    services::points_ledger_service::PointsLedgerService,
};

type HmacSha256 = Hmac<Sha256>;

/// Signature over a reward callback: hex HMAC-SHA256 of
/// `"{user_id}:{transaction_id}:{amount}"` under the shared S2S secret.
pub fn callback_signature(
    secret: &str,
    user_id: &str,
    transaction_id: &str,
    amount: i64,
) -> AppResult<String> {
    let payload = format!("{}:{}:{}", user_id, transaction_id, amount);
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::InternalError(format!("HMAC key setup failed: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a callback signature.
pub fn verify_signature(
    secret: &str,
    user_id: &str,
    transaction_id: &str,
    amount: i64,
    signature: &str,
) -> bool {
    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let payload = format!("{}:{}:{}", user_id, transaction_id, amount);
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload.as_bytes());
    mac.verify_slice(&sig_bytes).is_ok()
}

/// Client for the external survey provider plus the reward callback it
/// posts back to us. Survey payloads pass through untyped; their schema
/// belongs to the provider.
pub struct SurveyService {
    client: reqwest::Client,
    base_url: String,
    app_token: String,
    s2s_secret: SecretString,
    ledger: Arc<PointsLedgerService>,
}

impl SurveyService {
    pub fn new(config: &Config, ledger: Arc<PointsLedgerService>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.survey_api_base_url.trim_end_matches('/').to_string(),
            app_token: config.survey_app_token.clone(),
            s2s_secret: config.survey_s2s_secret.clone(),
            ledger,
        })
    }

    /// Surveys the provider currently offers this user.
    pub async fn available_surveys(&self, user_id: &str) -> AppResult<serde_json::Value> {
        let url = format!("{}/v2/client/surveys", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("platform", "MOBILE"), ("os", "ANDROID")])
            .header("X-Api-Token", &self.app_token)
            .header("X-User-Id", user_id)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("survey provider request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "survey provider returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("survey provider response invalid: {}", e)))
    }

    /// Ask the provider for a click-tracked entry link into a survey.
    pub async fn start_survey(
        &self,
        user_id: &str,
        survey_id: &str,
        click_id: Option<String>,
    ) -> AppResult<String> {
        let click_id = click_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let url = format!("{}/v2/client/surveys/start", self.base_url);
        let body = serde_json::json!({
            "survey_id": survey_id,
            "click_id": click_id,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .header("X-Api-Token", &self.app_token)
            .header("X-User-Id", user_id)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("survey provider request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "survey provider returned {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("survey provider response invalid: {}", e)))?;

        data.get("link")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AppError::UpstreamError("survey provider response carried no link".to_string())
            })
    }

    /// Handle the provider's server-to-server reward callback. Returns
    /// the amount credited; zero when the transaction was already paid.
    pub async fn credit_survey_reward(
        &self,
        user_id: &str,
        transaction_id: &str,
        amount: i64,
        signature: &str,
    ) -> AppResult<i64> {
        if !verify_signature(
            self.s2s_secret.expose_secret(),
            user_id,
            transaction_id,
            amount,
            signature,
        ) {
            log::warn!(
                "Rejected survey callback with bad signature (user {}, tx {})",
                user_id,
                transaction_id
            );
            return Err(AppError::Unauthorized(
                "invalid callback signature".to_string(),
            ));
        }

        if amount <= 0 {
            return Err(AppError::ValidationError(
                "survey reward amount must be positive".to_string(),
            ));
        }

        self.ledger
            .credit(
                user_id,
                RewardKind::SurveyReward,
                amount,
                RewardEvent::survey_reward_key(user_id, transaction_id),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_s2s_secret_key";

    #[test]
    fn signature_round_trip_verifies() {
        let sig = callback_signature(SECRET, "user-1", "tx-9", 25).expect("signing should work");
        assert!(verify_signature(SECRET, "user-1", "tx-9", 25, &sig));
    }

    #[test]
    fn tampered_amount_fails_verification() {
        let sig = callback_signature(SECRET, "user-1", "tx-9", 25).expect("signing should work");
        assert!(!verify_signature(SECRET, "user-1", "tx-9", 9999, &sig));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let sig = callback_signature(SECRET, "user-1", "tx-9", 25).expect("signing should work");
        assert!(!verify_signature("another_secret", "user-1", "tx-9", 25, &sig));
    }

    #[test]
    fn malformed_hex_fails_verification() {
        assert!(!verify_signature(SECRET, "user-1", "tx-9", 25, "not-hex!"));
        assert!(!verify_signature(SECRET, "user-1", "tx-9", 25, ""));
    }
}
