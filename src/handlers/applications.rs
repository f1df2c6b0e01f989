use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::models::{Application, ApplicationStatus};
use crate::AppState;

#[derive(Template)]
#[template(path = "applications.html")]
pub struct ApplicationsTemplate {
    pub pending: Vec<Application>,
    pub processed: Vec<Application>,
}

pub async fn admin_index() -> impl IntoResponse {
    Redirect::to("/admin/applications")
}

pub async fn list_applications(State(state): State<AppState>) -> impl IntoResponse {
    let pending = state
        .db
        .applications_by_status(ApplicationStatus::Pending)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("failed to load pending applications: {e}");
            Vec::new()
        });
    let mut processed = state
        .db
        .applications_by_status(ApplicationStatus::Approved)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("failed to load approved applications: {e}");
            Vec::new()
        });
    processed.extend(
        state
            .db
            .applications_by_status(ApplicationStatus::Denied)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("failed to load denied applications: {e}");
                Vec::new()
            }),
    );

    ApplicationsTemplate { pending, processed }
}

/// Approve an application. Malformed ids and engine failures are logged;
/// the response always redirects back to the list.
pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match id.parse::<i64>() {
        Ok(id) => {
            if let Err(e) = state.review.approve(id).await {
                tracing::error!(id, "approval failed: {e}");
            }
        }
        Err(_) => tracing::warn!(id = %id, "approve: malformed application id"),
    }
    Redirect::to("/admin/applications").into_response()
}

pub async fn deny_application(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match id.parse::<i64>() {
        Ok(id) => {
            if let Err(e) = state.review.deny(id).await {
                tracing::error!(id, "denial failed: {e}");
            }
        }
        Err(_) => tracing::warn!(id = %id, "deny: malformed application id"),
    }
    Redirect::to("/admin/applications").into_response()
}
