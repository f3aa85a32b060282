// src/application/commands/articles.rs
//
// The article workflow: create -> draft, approve, publish, plus draft
// edits and deletion. Policy checks come first, then value-object
// validation, then one repository round-trip per operation.
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedActor},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{
            Approval, ArticleReadRepository, ArticleSlug, ArticleTitle,
            ArticleVersionRepository, ArticleWriteRepository, NewArticle, NewArticleVersion,
            VersionKind,
        },
        document::Document,
        policy,
    },
};
use serde_json::Value;
use std::sync::Arc;

pub struct CreateArticleCommand {
    pub slug: String,
    pub title: String,
    pub body: Option<Value>,
}

pub struct UpdateArticleCommand {
    pub slug: String,
    pub title: Option<String>,
    pub body: Option<Value>,
}

pub struct ArticleCommandService {
    write_repo: Arc<dyn ArticleWriteRepository>,
    read_repo: Arc<dyn ArticleReadRepository>,
    version_repo: Arc<dyn ArticleVersionRepository>,
    clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        version_repo: Arc<dyn ArticleVersionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            version_repo,
            clock,
        }
    }

    /// Create an article in DRAFT with its initial draft snapshot.
    pub async fn create_article(
        &self,
        actor: &AuthenticatedActor,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let slug = ArticleSlug::normalize(&command.slug)?;
        let title = ArticleTitle::new(command.title)?;
        let body = match command.body {
            Some(value) => Document::from_value(value)?,
            None => Document::empty(),
        };

        // Friendly pre-check; the store's unique constraint is the actual
        // guard for the race window.
        if self.read_repo.find_by_slug(&slug).await?.is_some() {
            return Err(ApplicationError::conflict(
                "an article with this slug already exists",
            ));
        }

        let now = self.clock.now();
        let new_article = NewArticle {
            slug,
            title,
            creator_id: actor.id,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_article, body).await?;
        Ok(created.into())
    }

    /// Edit the draft: an optional title update on the article row and an
    /// optional new draft snapshot. Legal in any status; never changes the
    /// status and never clears an existing approval.
    pub async fn update_article(
        &self,
        actor: &AuthenticatedActor,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let slug = ArticleSlug::new(command.slug)?;
        let mut article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !policy::can_edit(actor.role, actor.id, article.creator_id) {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to edit article",
            ));
        }

        // Blank title input is ignored rather than rejected.
        if let Some(title) = command
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            let title = ArticleTitle::new(title)?;
            let now = self.clock.now();
            article = self.write_repo.set_title(article.id, title, now).await?;
        }

        if let Some(value) = command.body {
            let body = Document::from_value(value)?;
            let now = self.clock.now();
            self.version_repo
                .append_draft(article.id, body, actor.id, now)
                .await?;
        }

        Ok(article.into())
    }

    /// Record the publish approval. Re-approving overwrites the mark with
    /// the latest actor and time.
    pub async fn approve_article(
        &self,
        actor: &AuthenticatedActor,
        slug: String,
    ) -> ApplicationResult<ArticleDto> {
        if !policy::can_approve_or_publish(actor.role) {
            return Err(ApplicationError::forbidden("maintainer or owner only"));
        }

        let slug = ArticleSlug::new(slug)?;
        let article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let now = self.clock.now();
        let approval = Approval {
            approved_by: actor.id,
            approved_at: now,
        };
        let updated = self
            .write_repo
            .set_approval(article.id, approval, now)
            .await?;
        Ok(updated.into())
    }

    /// Promote the current draft snapshot to the public one. Requires an
    /// approval mark and a draft to copy; the store applies the version
    /// append and the status flip as one transaction.
    pub async fn publish_article(
        &self,
        actor: &AuthenticatedActor,
        slug: String,
    ) -> ApplicationResult<ArticleDto> {
        if !policy::can_approve_or_publish(actor.role) {
            return Err(ApplicationError::forbidden("maintainer or owner only"));
        }

        let slug = ArticleSlug::new(slug)?;
        let article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !article.is_approved() {
            return Err(ApplicationError::precondition_failed(
                "article must be approved before publishing",
            ));
        }

        let draft = self
            .version_repo
            .current_draft(article.id)
            .await?
            .ok_or_else(|| ApplicationError::invalid_state("article has no draft content"))?;

        let now = self.clock.now();
        // Copy the draft body by value: later draft edits must never
        // reach the already-published snapshot.
        let version = NewArticleVersion {
            article_id: article.id,
            kind: VersionKind::Published,
            body: draft.content.body,
            updated_by: actor.id,
            updated_at: now,
        };

        let updated = self.write_repo.publish(article.id, version, now).await?;
        Ok(updated.into())
    }

    pub async fn delete_article(
        &self,
        actor: &AuthenticatedActor,
        slug: String,
    ) -> ApplicationResult<()> {
        let slug = ArticleSlug::new(slug)?;
        let article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !policy::can_edit(actor.role, actor.id, article.creator_id) {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to delete article",
            ));
        }

        self.write_repo.delete(article.id).await?;
        Ok(())
    }
}
