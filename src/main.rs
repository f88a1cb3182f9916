use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use viewpoints_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let is_production = std::env::var("APP_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);
    if is_production {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = Arc::new(
        AppState::new(config)
            .await
            .expect("failed to initialize application state"),
    );

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(Cors::permissive())
            .service(handlers::get_video_tasks)
            .service(handlers::get_video_task)
            .service(handlers::start_watch_session)
            .service(handlers::get_watch_session)
            .service(handlers::report_progress)
            .service(handlers::complete_video)
            .service(handlers::submit_quiz)
            .service(handlers::credit_ad_reward)
            .service(handlers::get_ad_placements)
            .service(handlers::get_user_points)
            .service(handlers::get_user_rewards)
            .service(handlers::get_surveys)
            .service(handlers::start_survey)
            .service(handlers::survey_reward_callback)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
    })
    .bind((host, port))?
    .run()
    .await
}
