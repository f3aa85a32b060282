// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::actor::ActorId;
use crate::domain::article::{
    Approval, Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleStatus,
    ArticleTitle, ArticleWriteRepository, NewArticle, NewArticleVersion, VersionKind,
};
use crate::domain::document::Document;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::policy::ListScope;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction, types::Json};

const ARTICLE_COLUMNS: &str = "id, slug, title, status, creator_id, publish_approved_by, \
     publish_approved_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    slug: String,
    title: String,
    status: String,
    creator_id: i64,
    publish_approved_by: Option<i64>,
    publish_approved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let approval = match (row.publish_approved_by, row.publish_approved_at) {
            (Some(by), Some(at)) => Some(Approval {
                approved_by: ActorId::new(by)?,
                approved_at: at,
            }),
            (None, None) => None,
            _ => {
                return Err(DomainError::Persistence(
                    "approval actor and timestamp out of sync".into(),
                ));
            }
        };

        Ok(Article {
            id: ArticleId::new(row.id)?,
            slug: ArticleSlug::new(row.slug)?,
            title: ArticleTitle::new(row.title)?,
            status: ArticleStatus::parse(&row.status)?,
            creator_id: ActorId::new(row.creator_id)?,
            approval,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert one snapshot + version row pair inside the given transaction,
/// allocating the next per-article sequence number.
pub(crate) async fn insert_version_tx(
    tx: &mut Transaction<'_, Postgres>,
    version: &NewArticleVersion,
) -> DomainResult<(i64, i64, i64)> {
    let content_id: i64 =
        sqlx::query_scalar("INSERT INTO contents (body, created_at) VALUES ($1, $2) RETURNING id")
            .bind(Json(version.body.to_value()))
            .bind(version.updated_at)
            .fetch_one(&mut **tx)
            .await
            .map_err(map_sqlx)?;

    let (version_id, seq): (i64, i64) = sqlx::query_as(
        r#"
        WITH next_seq AS (
            SELECT COALESCE(MAX(seq) + 1, 1) AS seq
            FROM article_versions
            WHERE article_id = $1
        )
        INSERT INTO article_versions (article_id, seq, kind, content_id, updated_by, updated_at)
        SELECT $1, next_seq.seq, $2, $3, $4, $5
        FROM next_seq
        RETURNING id, seq
        "#,
    )
    .bind(i64::from(version.article_id))
    .bind(version.kind.as_str())
    .bind(content_id)
    .bind(i64::from(version.updated_by))
    .bind(version.updated_at)
    .fetch_one(&mut **tx)
    .await
    .map_err(map_sqlx)?;

    Ok((version_id, seq, content_id))
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleRepository {
    async fn insert(&self, article: NewArticle, initial_body: Document) -> DomainResult<Article> {
        let NewArticle {
            slug,
            title,
            creator_id,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (slug, title, status, creator_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(slug.as_str())
        .bind(title.as_str())
        .bind(ArticleStatus::Draft.as_str())
        .bind(i64::from(creator_id))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let created = Article::try_from(row)?;

        let initial_version = NewArticleVersion {
            article_id: created.id,
            kind: VersionKind::Draft,
            body: initial_body,
            updated_by: created.creator_id,
            updated_at: created.created_at,
        };
        insert_version_tx(&mut tx, &initial_version).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(created)
    }

    async fn set_title(
        &self,
        id: ArticleId,
        title: ArticleTitle,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles SET title = $1, updated_at = $2 WHERE id = $3
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(updated_at)
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }

    async fn set_approval(
        &self,
        id: ArticleId,
        approval: Approval,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles
             SET publish_approved_by = $1, publish_approved_at = $2, updated_at = $3
             WHERE id = $4
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(i64::from(approval.approved_by))
        .bind(approval.approved_at)
        .bind(updated_at)
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }

    async fn publish(
        &self,
        id: ArticleId,
        version: NewArticleVersion,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        insert_version_tx(&mut tx, &version).await?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles SET status = $1, updated_at = $2 WHERE id = $3
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(ArticleStatus::Published.as_str())
        .bind(updated_at)
        .bind(i64::from(id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        let published = Article::try_from(row)?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(published)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Snapshots cascade their versions; the article cascade covers any
        // version left without a snapshot.
        sqlx::query(
            "DELETE FROM contents
             WHERE id IN (SELECT content_id FROM article_versions WHERE article_id = $1)",
        )
        .bind(i64::from(id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleRepository {
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list(&self, scope: ListScope) -> DomainResult<Vec<Article>> {
        let rows = match scope {
            ListScope::All => {
                sqlx::query_as::<_, ArticleRow>(&format!(
                    "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY updated_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
            ListScope::CreatedBy(creator_id) => {
                sqlx::query_as::<_, ArticleRow>(&format!(
                    "SELECT {ARTICLE_COLUMNS} FROM articles WHERE creator_id = $1
                     ORDER BY updated_at DESC, id DESC"
                ))
                .bind(i64::from(creator_id))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn list_published(&self) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE status = $1
             ORDER BY updated_at DESC, id DESC"
        ))
        .bind(ArticleStatus::Published.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()
    }
}
