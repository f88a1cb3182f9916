use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{SurveyCallbackParams, SurveyStartRequest},
    models::dto::response::{StatusResponse, SurveyStartLinkResponse},
};

#[derive(Debug, Deserialize)]
struct SurveyListParams {
    user_id: String,
}

#[get("/api/surveys")]
async fn get_surveys(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SurveyListParams>,
) -> Result<HttpResponse, AppError> {
    let surveys = state.surveys.available_surveys(&query.user_id).await?;
    Ok(HttpResponse::Ok().json(surveys))
}

#[post("/api/surveys/start")]
async fn start_survey(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SurveyStartRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let request = request.into_inner();
    let link = state
        .surveys
        .start_survey(&request.user_id, &request.survey_id, request.click_id)
        .await?;
    Ok(HttpResponse::Ok().json(SurveyStartLinkResponse { link }))
}

/// Server-to-server reward callback from the survey provider. GET with
/// query parameters is the provider's convention, not ours.
#[get("/api/surveys/reward-callback")]
async fn survey_reward_callback(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SurveyCallbackParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    state
        .surveys
        .credit_survey_reward(
            &params.user_id,
            &params.transaction_id,
            params.amount,
            &params.signature,
        )
        .await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
