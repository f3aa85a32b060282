// src/domain/article/version.rs
use crate::domain::actor::ActorId;
use crate::domain::article::value_objects::ArticleId;
use crate::domain::document::Document;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag distinguishing the editable history from the public one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionKind {
    Draft,
    Published,
}

impl VersionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionKind::Draft => "DRAFT",
            VersionKind::Published => "PUBLISHED",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "DRAFT" => Ok(VersionKind::Draft),
            "PUBLISHED" => Ok(VersionKind::Published),
            other => Err(DomainError::Validation(format!(
                "unknown version kind '{other}'"
            ))),
        }
    }
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub i64);

impl ContentId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "content id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ContentId> for i64 {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

/// An immutable stored document body. Written once when its version is
/// appended, never updated, owned by exactly one version.
#[derive(Debug, Clone)]
pub struct ContentSnapshot {
    pub id: ContentId,
    pub body: Document,
}

/// Links an article to one snapshot. `seq` increases monotonically per
/// article; the current version of a kind is the one with the greatest
/// `seq` of that kind, never a wall-clock comparison.
#[derive(Debug, Clone)]
pub struct ArticleVersion {
    pub id: i64,
    pub article_id: ArticleId,
    pub seq: i64,
    pub kind: VersionKind,
    pub content: ContentSnapshot,
    pub updated_by: ActorId,
    pub updated_at: DateTime<Utc>,
}

/// Payload for appending one version; the store allocates `seq` and the
/// snapshot row.
#[derive(Debug, Clone)]
pub struct NewArticleVersion {
    pub article_id: ArticleId,
    pub kind: VersionKind,
    pub body: Document,
    pub updated_by: ActorId,
    pub updated_at: DateTime<Utc>,
}
