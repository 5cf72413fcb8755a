//! HTTP surface of the milestone board.
//!
//! Page handlers are deliberately thin: they run the gate, call the service,
//! and hand the data to the UI collaborator as JSON views.

pub mod api;
pub mod pages;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::auth::{routes as auth_routes, AppState};
use crate::edge;

/// Builds the application router with the edge layer applied.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/form", get(pages::create_form))
        .route("/form/{id}", get(pages::edit_form))
        .route("/login", get(pages::login))
        .route("/otp", get(pages::otp))
        // Auth hand-off (exempt from the edge layer)
        .route("/auth/callback", get(auth_routes::callback))
        .route("/auth/logout", get(auth_routes::logout))
        // Gated mutations
        .route("/api/milestones", post(api::create_milestone))
        .route(
            "/api/milestones/{id}",
            put(api::update_milestone).delete(api::delete_milestone),
        )
        // Static assets (exempt from the edge layer)
        .nest_service("/assets", ServeDir::new("assets"))
        .layer(middleware::from_fn_with_state(state.clone(), edge::guard))
        .with_state(state)
}
