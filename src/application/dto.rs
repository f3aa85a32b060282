// src/application/dto.rs
use crate::domain::{
    actor::{ActorId, Role},
    article::{Approval, Article, ArticleStatus, ArticleVersion},
    document::Document,
    theme::Theme,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// The verified identity attached to a management request. Resolved by the
/// external session collaborator; passed explicitly into every service
/// call, never ambient.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedActor {
    pub id: ActorId,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDto {
    pub approved_by_id: i64,
    #[serde(with = "serde_time")]
    pub approved_at: DateTime<Utc>,
}

impl From<Approval> for ApprovalDto {
    fn from(approval: Approval) -> Self {
        Self {
            approved_by_id: approval.approved_by.into(),
            approved_at: approval.approved_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub status: ArticleStatus,
    pub creator_id: i64,
    pub approval: Option<ApprovalDto>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            slug: article.slug.to_string(),
            title: article.title.to_string(),
            status: article.status,
            creator_id: article.creator_id.into(),
            approval: article.approval.map(Into::into),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Article plus its current draft body, as returned by the editor-facing
/// GET endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleWithBodyDto {
    #[serde(flatten)]
    pub article: ArticleDto,
    pub body: Document,
}

impl ArticleWithBodyDto {
    pub fn from_parts(article: Article, draft: Option<ArticleVersion>) -> Self {
        let body = draft.map_or_else(Document::empty, |version| version.content.body);
        Self {
            article: article.into(),
            body,
        }
    }
}

/// Listing row for the management dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummaryDto {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub status: ArticleStatus,
    pub creator_id: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleSummaryDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            slug: article.slug.to_string(),
            title: article.title.to_string(),
            status: article.status,
            creator_id: article.creator_id.into(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Public listing row: only what external renderers need.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedArticleListItemDto {
    pub slug: String,
    pub title: String,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for PublishedArticleListItemDto {
    fn from(article: Article) -> Self {
        Self {
            slug: article.slug.to_string(),
            title: article.title.to_string(),
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedArticleDto {
    pub slug: String,
    pub title: String,
    pub body: Document,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl PublishedArticleDto {
    pub fn from_parts(article: Article, published: Option<ArticleVersion>) -> Self {
        let body = published.map_or_else(Document::empty, |version| version.content.body);
        Self {
            slug: article.slug.to_string(),
            title: article.title.to_string(),
            body,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDto {
    pub id: i64,
    pub preset: String,
    pub overrides: Map<String, Value>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Theme> for ThemeDto {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id,
            preset: theme.preset,
            overrides: theme.overrides,
            updated_at: theme.updated_at,
        }
    }
}

pub mod serde_time {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
