// src/infrastructure/repositories/postgres_version.rs
use super::map_sqlx;
use super::postgres_article::insert_version_tx;
use crate::domain::actor::ActorId;
use crate::domain::article::{
    ArticleId, ArticleVersion, ArticleVersionRepository, ContentId, ContentSnapshot,
    NewArticleVersion, VersionKind,
};
use crate::domain::document::Document;
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, types::Json};

#[derive(Clone)]
pub struct PostgresArticleVersionRepository {
    pool: PgPool,
}

impl PostgresArticleVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn current_of_kind(
        &self,
        article_id: ArticleId,
        kind: VersionKind,
    ) -> DomainResult<Option<ArticleVersion>> {
        let row = sqlx::query_as::<_, ArticleVersionRow>(
            r#"
            SELECT v.id, v.article_id, v.seq, v.kind, v.updated_by, v.updated_at,
                   c.id AS content_id, c.body
            FROM article_versions v
            JOIN contents c ON c.id = v.content_id
            WHERE v.article_id = $1 AND v.kind = $2
            ORDER BY v.seq DESC
            LIMIT 1
            "#,
        )
        .bind(i64::from(article_id))
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ArticleVersion::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct ArticleVersionRow {
    id: i64,
    article_id: i64,
    seq: i64,
    kind: String,
    updated_by: i64,
    updated_at: DateTime<Utc>,
    content_id: i64,
    body: Json<Value>,
}

impl TryFrom<ArticleVersionRow> for ArticleVersion {
    type Error = DomainError;

    fn try_from(row: ArticleVersionRow) -> Result<Self, Self::Error> {
        Ok(ArticleVersion {
            id: row.id,
            article_id: ArticleId::new(row.article_id)?,
            seq: row.seq,
            kind: VersionKind::parse(&row.kind)?,
            content: ContentSnapshot {
                id: ContentId::new(row.content_id)?,
                body: Document::from_value(row.body.0)?,
            },
            updated_by: ActorId::new(row.updated_by)?,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ArticleVersionRepository for PostgresArticleVersionRepository {
    async fn current_draft(&self, article_id: ArticleId) -> DomainResult<Option<ArticleVersion>> {
        self.current_of_kind(article_id, VersionKind::Draft).await
    }

    async fn current_published(
        &self,
        article_id: ArticleId,
    ) -> DomainResult<Option<ArticleVersion>> {
        self.current_of_kind(article_id, VersionKind::Published)
            .await
    }

    async fn append_draft(
        &self,
        article_id: ArticleId,
        body: Document,
        updated_by: ActorId,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<ArticleVersion> {
        let version = NewArticleVersion {
            article_id,
            kind: VersionKind::Draft,
            body,
            updated_by,
            updated_at,
        };

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let (version_id, seq, content_id) = insert_version_tx(&mut tx, &version).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(ArticleVersion {
            id: version_id,
            article_id,
            seq,
            kind: VersionKind::Draft,
            content: ContentSnapshot {
                id: ContentId::new(content_id)?,
                body: version.body,
            },
            updated_by,
            updated_at,
        })
    }
}
