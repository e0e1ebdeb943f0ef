pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::generation::handlers;
use crate::render::RESUMES_ROUTE;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let resumes = ServeDir::new(state.renderer.output_dir());
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-resume",
            post(handlers::handle_generate_resume),
        )
        .nest_service(RESUMES_ROUTE, resumes)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
