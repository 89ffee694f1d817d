use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod handlers;

use matchbet::config::{CalculatorDefaults, ServerConfig};

/// Application state shared across handlers
pub struct AppState {
    pub defaults: CalculatorDefaults,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let addr = config.bind_addr();

    info!(
        "Calculator defaults: commission {}%, risk allocation {}",
        config.defaults.commission_percent, config.defaults.risk_allocation
    );

    let app_state = Arc::new(AppState {
        defaults: config.defaults,
    });

    info!("Starting Matchbet API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .configure(handlers::routes)
    })
    .bind(&addr)?
    .run()
    .await
}
