//! # Blog Server
//!
//! Public blog pages, RSS feed and the staff admin API.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blog_core::ports::{PasswordService, TokenService};
use blog_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod content;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod templates;
mod views;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::{AppState, bootstrap_admin};
use telemetry::{TelemetryConfig, init_telemetry};

#[cfg(feature = "rate-limit")]
use blog_infra::{InMemoryRateLimiter, RateLimitConfig};
#[cfg(feature = "rate-limit")]
use middleware::rate_limit::RateLimitMiddleware;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!("Starting blog server on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await.map_err(std::io::Error::other)?;

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    if let Some(admin) = &config.admin {
        bootstrap_admin(state.users.as_ref(), passwords.as_ref(), admin)
            .await
            .map_err(std::io::Error::other)?;
    }

    #[cfg(feature = "rate-limit")]
    let limiter: Arc<dyn blog_core::ports::RateLimiter> = Arc::new(
        InMemoryRateLimiter::new(RateLimitConfig::from_env()).map_err(std::io::Error::other)?,
    );

    let state = web::Data::new(state);
    let tokens = web::Data::new(tokens);
    let passwords = web::Data::new(passwords);

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(tokens.clone())
            .app_data(passwords.clone())
            .configure(handlers::configure_routes);

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(RateLimitMiddleware::new(limiter.clone()));

        app.wrap(RequestIdMiddleware).wrap(TracingLogger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
