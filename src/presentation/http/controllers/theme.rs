// src/presentation/http/controllers/theme.rs
use crate::application::{commands::theme::UpdateThemeCommand, dto::ThemeDto};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct UpdateThemeRequest {
    pub preset: Option<String>,
    pub overrides: Option<Map<String, Value>>,
}

pub async fn update_theme(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(payload): Json<UpdateThemeRequest>,
) -> HttpResult<Json<ThemeDto>> {
    let command = UpdateThemeCommand {
        preset: payload.preset,
        overrides: payload.overrides,
    };

    state
        .services
        .theme_commands
        .update_theme(&actor, command)
        .await
        .into_http()
        .map(Json)
}
