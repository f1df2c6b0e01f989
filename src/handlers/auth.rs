use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::auth::{verify_password, ADMIN_SESSION_KEY};
use crate::AppState;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub redirect: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
    pub redirect: Option<String>,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: None,
        redirect: query.redirect,
    }
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if verify_password(&form.password, &state.settings.admin) {
        if let Err(e) = session.insert(ADMIN_SESSION_KEY, true).await {
            tracing::error!("failed to store admin session: {e}");
        }
        tracing::info!("admin logged in");

        // Resume the originally requested path; only local targets.
        let target = form
            .redirect
            .filter(|r| r.starts_with('/'))
            .unwrap_or_else(|| "/admin".to_string());
        Redirect::to(&target).into_response()
    } else {
        tracing::warn!("failed admin login attempt");
        LoginTemplate {
            error: Some("Incorrect password".to_string()),
            redirect: form.redirect,
        }
        .into_response()
    }
}

pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = session.flush().await {
        tracing::error!("failed to destroy session: {e}");
    }
    Redirect::to("/")
}
