// src/domain/article/entity.rs
use crate::domain::actor::ActorId;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an article. Publication is one-directional: once
/// published, later draft edits accumulate without changing the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    Draft,
    Published,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "DRAFT",
            ArticleStatus::Published => "PUBLISHED",
        }
    }

    pub fn parse(value: &str) -> crate::domain::errors::DomainResult<Self> {
        match value {
            "DRAFT" => Ok(ArticleStatus::Draft),
            "PUBLISHED" => Ok(ArticleStatus::Published),
            other => Err(crate::domain::errors::DomainError::Validation(format!(
                "unknown article status '{other}'"
            ))),
        }
    }
}

/// One-shot publish gate. Both halves exist or neither does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approval {
    pub approved_by: ActorId,
    pub approved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub status: ArticleStatus,
    pub creator_id: ActorId,
    pub approval: Option<Approval>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Record approval. Re-approving overwrites the previous mark with the
    /// latest actor and time.
    pub fn approve(&mut self, approved_by: ActorId, now: DateTime<Utc>) {
        self.approval = Some(Approval {
            approved_by,
            approved_at: now,
        });
        self.updated_at = now;
    }

    pub fn is_approved(&self) -> bool {
        self.approval.is_some()
    }

    pub fn mark_published(&mut self, now: DateTime<Utc>) {
        self.status = ArticleStatus::Published;
        self.updated_at = now;
    }

    pub fn set_title(&mut self, title: ArticleTitle, now: DateTime<Utc>) {
        self.title = title;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub creator_id: ActorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
