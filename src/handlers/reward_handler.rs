use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::AdRewardRequest,
    models::dto::response::{
        AdPlacementDto, AdRewardResponse, RewardEventDto, UserPointsResponse,
    },
};

#[post("/api/ad-rewards")]
async fn credit_ad_reward(
    state: web::Data<Arc<AppState>>,
    request: web::Json<AdRewardRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let outcome = state
        .reward_sessions
        .credit_ad_reward(&request.user_id, &request.placement_key, &request.ad_instance_id)
        .await?;
    Ok(HttpResponse::Ok().json(AdRewardResponse {
        amount: outcome.amount,
        new_balance: outcome.new_balance,
    }))
}

#[get("/api/ad-placements")]
async fn get_ad_placements(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let placements = state.reward_sessions.enabled_placements().await?;
    let dtos: Vec<AdPlacementDto> = placements.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

#[get("/api/users/{user_id}/points")]
async fn get_user_points(
    state: web::Data<Arc<AppState>>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let total_points = state.ledger.balance(&user_id).await?;
    Ok(HttpResponse::Ok().json(UserPointsResponse {
        user_id: user_id.into_inner(),
        total_points,
    }))
}

#[get("/api/users/{user_id}/rewards")]
async fn get_user_rewards(
    state: web::Data<Arc<AppState>>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let events = state.ledger.history(&user_id).await?;
    let dtos: Vec<RewardEventDto> = events.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(dtos))
}
