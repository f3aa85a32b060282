// src/application/queries/public.rs
//
// Read-only projection for external renderers. Bypasses the workflow
// services entirely: only materialized published state is visible.
use crate::{
    application::{
        dto::{PublishedArticleDto, PublishedArticleListItemDto, ThemeDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleReadRepository, ArticleSlug, ArticleStatus, ArticleVersionRepository},
        theme::ThemeRepository,
    },
};
use std::sync::Arc;

pub struct PublicQueryService {
    read_repo: Arc<dyn ArticleReadRepository>,
    version_repo: Arc<dyn ArticleVersionRepository>,
    theme_repo: Arc<dyn ThemeRepository>,
    clock: Arc<dyn Clock>,
}

impl PublicQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        version_repo: Arc<dyn ArticleVersionRepository>,
        theme_repo: Arc<dyn ThemeRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            read_repo,
            version_repo,
            theme_repo,
            clock,
        }
    }

    pub async fn list_published(&self) -> ApplicationResult<Vec<PublishedArticleListItemDto>> {
        let articles = self.read_repo.list_published().await?;
        Ok(articles.into_iter().map(Into::into).collect())
    }

    pub async fn get_published_by_slug(
        &self,
        slug: String,
    ) -> ApplicationResult<PublishedArticleDto> {
        let slug = ArticleSlug::new(slug)?;
        let article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|article| article.status == ArticleStatus::Published)
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let published = self.version_repo.current_published(article.id).await?;
        Ok(PublishedArticleDto::from_parts(article, published))
    }

    pub async fn get_theme(&self) -> ApplicationResult<ThemeDto> {
        let theme = self.theme_repo.get_or_create(self.clock.now()).await?;
        Ok(theme.into())
    }
}
