use actix_web::web;

use matchbet::error::AppError;

pub mod calculate;
pub mod health;

/// Register every route; shared by the server and handler tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .route("/calculate/matched", web::post().to(calculate::calculate_matched))
    .route("/calculate/matched/sweep", web::post().to(calculate::sweep_matched))
    .route("/calculate/cashback", web::post().to(calculate::calculate_cashback));
}
