// src/domain/article/repository.rs
use crate::domain::actor::ActorId;
use crate::domain::article::entity::{Approval, Article, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTitle};
use crate::domain::article::version::{ArticleVersion, NewArticleVersion};
use crate::domain::document::Document;
use crate::domain::errors::DomainResult;
use crate::domain::policy::ListScope;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    /// Articles visible in the given scope, most recently updated first.
    async fn list(&self, scope: ListScope) -> DomainResult<Vec<Article>>;
    /// Published articles only, most recently updated first.
    async fn list_published(&self) -> DomainResult<Vec<Article>>;
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Insert the article row together with its initial draft snapshot and
    /// version (authored by the creator), as one transaction.
    async fn insert(&self, article: NewArticle, initial_body: Document) -> DomainResult<Article>;

    async fn set_title(
        &self,
        id: ArticleId,
        title: ArticleTitle,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article>;

    async fn set_approval(
        &self,
        id: ArticleId,
        approval: Approval,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article>;

    /// Append the PUBLISHED version and flip the article status in one
    /// transaction, so concurrent readers observe both or neither.
    async fn publish(
        &self,
        id: ArticleId,
        version: NewArticleVersion,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article>;

    /// Remove the article, cascading its versions and snapshots.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

/// Append-only history of content snapshots per article.
#[async_trait]
pub trait ArticleVersionRepository: Send + Sync {
    async fn current_draft(&self, article_id: ArticleId) -> DomainResult<Option<ArticleVersion>>;
    async fn current_published(
        &self,
        article_id: ArticleId,
    ) -> DomainResult<Option<ArticleVersion>>;
    /// Insert a fresh snapshot plus a DRAFT version referencing it. Prior
    /// versions are never mutated or deleted.
    async fn append_draft(
        &self,
        article_id: ArticleId,
        body: Document,
        updated_by: ActorId,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<ArticleVersion>;
}
