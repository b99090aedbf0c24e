//! Formpulse server entry point.

use std::net::SocketAddr;

use axum::{Router, middleware};
use formpulse_api::{middleware::AppState, router as api_router};
use formpulse_common::Config;
use formpulse_core::{AccountService, ResponseService, SurveyService};
use formpulse_store::{ResponseRepository, StoreClient, SurveyRepository};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formpulse=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting formpulse server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to the backend-as-a-service
    let store = StoreClient::new(&config.backend)?;
    info!(endpoint = %config.backend.endpoint, "Using backend store");

    // Initialize repositories
    let survey_repo = SurveyRepository::new(
        store.clone(),
        config.backend.surveys_collection.clone(),
    );
    let response_repo = ResponseRepository::new(
        store.clone(),
        config.backend.responses_collection.clone(),
    );

    // Initialize services
    let account_service = AccountService::new(store);
    let survey_service = SurveyService::new(survey_repo.clone());
    let response_service = ResponseService::new(survey_repo, response_repo);

    // Create app state
    let state = AppState {
        account_service,
        survey_service,
        response_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            formpulse_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
