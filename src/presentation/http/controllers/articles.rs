// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, UpdateArticleCommand},
    dto::{ArticleDto, ArticleSummaryDto, ArticleWithBodyDto},
    error::ApplicationError,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub body: Option<Value>,
}

pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<Vec<ArticleSummaryDto>>> {
    state
        .services
        .article_queries
        .list_articles(&actor)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let (Some(slug), Some(title)) = (payload.slug, payload.title) else {
        return Err(HttpError::from_error(ApplicationError::validation(
            "slug and title are required",
        )));
    };

    let command = CreateArticleCommand {
        slug,
        title,
        body: payload.body,
    };

    let created = state
        .services
        .article_commands
        .create_article(&actor, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleWithBodyDto>> {
    state
        .services
        .article_queries
        .get_article_by_slug(&actor, slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        slug,
        title: payload.title,
        body: payload.body,
    };

    state
        .services
        .article_commands
        .update_article(&actor, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .delete_article(&actor, slug)
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .approve_article(&actor, slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn publish_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .publish_article(&actor, slug)
        .await
        .into_http()
        .map(Json)
}
