//! HTTP server setup and routing.
pub mod handlers;
pub mod passwords;
pub mod session;
pub mod state;
pub mod views;

pub use state::AppState;

use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;

/// Create the router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::questions::index))
        .route("/health", get(handlers::health::health_check))
        .route("/register", post(handlers::accounts::register))
        .route("/login", post(handlers::accounts::login))
        .route("/ask", post(handlers::questions::ask_question))
        .route("/question/:question_id", get(handlers::questions::view_question))
        .route("/answer/:question_id", post(handlers::answers::post_answer))
        .route("/vote/:item_type/:item_id/:vote_type", get(handlers::votes::vote))
        .route("/profile/:username", get(handlers::profile::profile))
        .route("/search", get(handlers::questions::search))
        .layer(create_cors_layer())
        .with_state(state)
}

/// CORS layer for local front-end development.
pub fn create_cors_layer() -> CorsLayer {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://localhost:5173"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
        HeaderValue::from_static("http://127.0.0.1:5173"),
    ];

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Run the server on the specified address until Ctrl-C.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), StartupError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
