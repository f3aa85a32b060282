// src/application/queries/articles.rs
use crate::{
    application::{
        dto::{ArticleSummaryDto, ArticleWithBodyDto, AuthenticatedActor},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleReadRepository, ArticleSlug, ArticleVersionRepository},
        policy,
    },
};
use std::sync::Arc;

pub struct ArticleQueryService {
    read_repo: Arc<dyn ArticleReadRepository>,
    version_repo: Arc<dyn ArticleVersionRepository>,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        version_repo: Arc<dyn ArticleVersionRepository>,
    ) -> Self {
        Self {
            read_repo,
            version_repo,
        }
    }

    /// Dashboard listing, scoped by role: contributors see their own
    /// articles only.
    pub async fn list_articles(
        &self,
        actor: &AuthenticatedActor,
    ) -> ApplicationResult<Vec<ArticleSummaryDto>> {
        let scope = policy::list_scope(actor.role, actor.id);
        let articles = self.read_repo.list(scope).await?;
        Ok(articles.into_iter().map(Into::into).collect())
    }

    /// Editor view: the article plus its current draft body. A live
    /// article always has a draft; fall back to the empty document if the
    /// history is somehow bare.
    pub async fn get_article_by_slug(
        &self,
        actor: &AuthenticatedActor,
        slug: String,
    ) -> ApplicationResult<ArticleWithBodyDto> {
        let slug = ArticleSlug::new(slug)?;
        let article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !policy::can_edit(actor.role, actor.id, article.creator_id) {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to view article draft",
            ));
        }

        let draft = self.version_repo.current_draft(article.id).await?;
        Ok(ArticleWithBodyDto::from_parts(article, draft))
    }
}
