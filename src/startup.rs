use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::auth::require_admin;
use crate::handlers::{
    app::{health_check, index},
    applications::{admin_index, approve_application, deny_application, list_applications},
    apply::{apply_page, submit_application},
    auth::{login, login_page, logout},
    whitelist::{edit_entry_page, list_whitelist, remove_entry, update_entry},
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true behind HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            state.settings.server.session_timeout_minutes as i64,
        )));

    // Every route in this group halts at the session gate.
    let admin_routes = Router::new()
        .route("/admin", get(admin_index))
        .route("/admin/applications", get(list_applications))
        .route("/admin/applications/:id/approve", post(approve_application))
        .route("/admin/applications/:id/deny", post(deny_application))
        .route("/admin/whitelist", get(list_whitelist))
        .route(
            "/admin/whitelist/:id/edit",
            get(edit_entry_page).post(update_entry),
        )
        .route("/admin/whitelist/:id/remove", post(remove_entry))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/apply", get(apply_page).post(submit_application))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .merge(admin_routes)
        .nest_service("/static", ServeDir::new("static"))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
