// src/infrastructure/repositories/postgres_theme.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::theme::{DEFAULT_PRESET, Theme, ThemeRepository, ThemeUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, types::Json};

#[derive(Clone)]
pub struct PostgresThemeRepository {
    pool: PgPool,
}

impl PostgresThemeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ThemeRow {
    id: i64,
    preset: String,
    overrides: Json<Map<String, Value>>,
    updated_at: DateTime<Utc>,
}

impl From<ThemeRow> for Theme {
    fn from(row: ThemeRow) -> Self {
        Theme {
            id: row.id,
            preset: row.preset,
            overrides: row.overrides.0,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ThemeRepository for PostgresThemeRepository {
    async fn get_or_create(&self, now: DateTime<Utc>) -> DomainResult<Theme> {
        let existing = sqlx::query_as::<_, ThemeRow>(
            "SELECT id, preset, overrides, updated_at FROM themes
             ORDER BY updated_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if let Some(row) = existing {
            return Ok(row.into());
        }

        let row = sqlx::query_as::<_, ThemeRow>(
            "INSERT INTO themes (preset, overrides, updated_at) VALUES ($1, $2, $3)
             RETURNING id, preset, overrides, updated_at",
        )
        .bind(DEFAULT_PRESET)
        .bind(Json(Map::new()))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn update(&self, update: ThemeUpdate, updated_at: DateTime<Utc>) -> DomainResult<Theme> {
        let row = sqlx::query_as::<_, ThemeRow>(
            "UPDATE themes
             SET preset = COALESCE($1, preset),
                 overrides = COALESCE($2, overrides),
                 updated_at = $3
             WHERE id = (SELECT id FROM themes ORDER BY updated_at DESC LIMIT 1)
             RETURNING id, preset, overrides, updated_at",
        )
        .bind(update.preset)
        .bind(update.overrides.map(Json))
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("theme not found".into()))?;

        Ok(row.into())
    }
}
