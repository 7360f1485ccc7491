use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::health;
use super::members;
use super::state::AppState;

/// Create the full router with application state.
///
/// Static segments take priority over the `{member}` capture, so the probe
/// endpoints stay reachable whatever members exist.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/ready", get(health::ready_check))
        // Member pages
        .route("/", get(members::list_members))
        .route("/{member}", get(members::show_member))
        .route("/{member}/edit", get(members::edit_member))
        .route("/{member}/edit", post(members::edit_member_submit))
        .route(
            "/{member}/activate/{activation_id}",
            get(members::activate_member),
        )
        .route("/{member}/resetPassword", get(members::reset_password))
        .route("/{member}/changePassword", get(members::change_password))
        .route(
            "/{member}/changePassword",
            post(members::change_password_submit),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
