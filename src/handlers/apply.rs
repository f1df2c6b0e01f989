use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Edition, NewApplication};
use crate::AppState;

#[derive(Template)]
#[template(path = "apply.html")]
pub struct ApplyTemplate {
    pub error: Option<String>,
    pub success: bool,
    pub game_id: String,
    pub contact: String,
    pub edition: String,
    pub bedrock_name: String,
}

impl ApplyTemplate {
    fn empty(success: bool) -> Self {
        Self {
            error: None,
            success,
            game_id: String::new(),
            contact: String::new(),
            edition: "JAVA".to_string(),
            bedrock_name: String::new(),
        }
    }
}

#[derive(Deserialize)]
pub struct ApplyQuery {
    pub success: Option<bool>,
}

#[derive(Deserialize)]
pub struct ApplyForm {
    pub game_id: String,
    pub contact: String,
    pub edition: Edition,
    #[serde(default)]
    pub bedrock_name: String,
}

pub async fn apply_page(Query(query): Query<ApplyQuery>) -> impl IntoResponse {
    ApplyTemplate::empty(query.success.unwrap_or(false))
}

/// Store a submission as a pending application. Validation failure
/// redisplays the form with the original input preserved; a storage
/// failure is logged and the request still redirects.
pub async fn submit_application(
    State(state): State<AppState>,
    Form(form): Form<ApplyForm>,
) -> Response {
    match NewApplication::from_form(&form.game_id, &form.contact, form.edition, &form.bedrock_name)
    {
        Ok(new_application) => {
            match state.db.insert_application(&new_application).await {
                Ok(application) => {
                    tracing::info!(
                        id = application.id,
                        game_id = %application.game_id,
                        edition = %application.edition,
                        "application received"
                    );
                }
                Err(e) => tracing::error!("failed to store application: {e}"),
            }
            Redirect::to("/apply?success=true").into_response()
        }
        Err(AppError::Validation(message)) => ApplyTemplate {
            error: Some(message),
            success: false,
            game_id: form.game_id,
            contact: form.contact,
            edition: form.edition.as_str().to_string(),
            bedrock_name: form.bedrock_name,
        }
        .into_response(),
        Err(e) => {
            tracing::error!("unexpected intake error: {e}");
            Redirect::to("/apply").into_response()
        }
    }
}
