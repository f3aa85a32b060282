// src/presentation/http/controllers/public.rs
use crate::application::dto::{PublishedArticleDto, PublishedArticleListItemDto, ThemeDto};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};

pub async fn list_published_articles(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<PublishedArticleListItemDto>>> {
    state
        .services
        .public_queries
        .list_published()
        .await
        .into_http()
        .map(Json)
}

pub async fn get_published_article(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<PublishedArticleDto>> {
    state
        .services
        .public_queries
        .get_published_by_slug(slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_theme(Extension(state): Extension<HttpState>) -> HttpResult<Json<ThemeDto>> {
    state
        .services
        .public_queries
        .get_theme()
        .await
        .into_http()
        .map(Json)
}
