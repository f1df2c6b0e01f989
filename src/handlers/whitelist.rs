use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::models::WhitelistEntry;
use crate::AppState;

#[derive(Template)]
#[template(path = "whitelist.html")]
pub struct WhitelistTemplate {
    pub entries: Vec<WhitelistEntry>,
}

#[derive(Template)]
#[template(path = "edit_entry.html")]
pub struct EditEntryTemplate {
    pub entry: WhitelistEntry,
}

#[derive(Deserialize)]
pub struct EntryForm {
    pub game_id: String,
    pub contact: String,
    pub user_tier: String,
}

pub async fn list_whitelist(State(state): State<AppState>) -> impl IntoResponse {
    let entries = state.db.all_entries().await.unwrap_or_else(|e| {
        tracing::error!("failed to load whitelist entries: {e}");
        Vec::new()
    });
    WhitelistTemplate { entries }
}

pub async fn edit_entry_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        tracing::warn!(id = %id, "edit: malformed entry id");
        return Redirect::to("/admin/whitelist").into_response();
    };
    match state.db.entry_by_id(id).await {
        Ok(Some(entry)) => EditEntryTemplate { entry }.into_response(),
        Ok(None) => {
            tracing::warn!(id, "edit: whitelist entry not found");
            Redirect::to("/admin/whitelist").into_response()
        }
        Err(e) => {
            tracing::error!(id, "failed to load whitelist entry: {e}");
            Redirect::to("/admin/whitelist").into_response()
        }
    }
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EntryForm>,
) -> Response {
    match id.parse::<i64>() {
        Ok(id) => {
            if let Err(e) = state
                .editor
                .update_entry(id, &form.game_id, &form.contact, &form.user_tier)
                .await
            {
                tracing::error!(id, "whitelist update failed: {e}");
            }
        }
        Err(_) => tracing::warn!(id = %id, "update: malformed entry id"),
    }
    Redirect::to("/admin/whitelist").into_response()
}

pub async fn remove_entry(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match id.parse::<i64>() {
        Ok(id) => {
            if let Err(e) = state.editor.remove_entry(id).await {
                tracing::error!(id, "whitelist removal failed: {e}");
            }
        }
        Err(_) => tracing::warn!(id = %id, "remove: malformed entry id"),
    }
    Redirect::to("/admin/whitelist").into_response()
}
