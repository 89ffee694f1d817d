use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::debug;

use crate::AppState;
use matchbet::core::{cashback, matched};
use matchbet::error::AppError;
use matchbet::models::{
    CashbackRequest, CashbackResponse, MatchedBetRequest, MatchedBetResponse, SweepRequest,
    SweepResponse,
};

/// Resolve a matched bet
pub async fn calculate_matched(
    state: web::Data<Arc<AppState>>,
    req: web::Json<MatchedBetRequest>,
) -> Result<HttpResponse, AppError> {
    let input = req.to_input(&state.defaults);

    let result = matched::resolve(&input).map_err(|e| {
        debug!("Matched bet unavailable for {:?}: {}", input, e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(MatchedBetResponse { input, result }))
}

/// Resolve a matched bet at every step of the risk slider
pub async fn sweep_matched(
    state: web::Data<Arc<AppState>>,
    req: web::Json<SweepRequest>,
) -> Result<HttpResponse, AppError> {
    let input = req.bet.to_input(&state.defaults);
    let points = matched::risk_sweep(&input, req.step)?;

    Ok(HttpResponse::Ok().json(SweepResponse { input, points }))
}

/// Calculate cashback
pub async fn calculate_cashback(req: web::Json<CashbackRequest>) -> Result<HttpResponse, AppError> {
    let cashback = cashback::calculate_cashback(req.amount, req.percentage)?;

    Ok(HttpResponse::Ok().json(CashbackResponse {
        amount: req.amount,
        percentage: req.percentage,
        cashback,
    }))
}
