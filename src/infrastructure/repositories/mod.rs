// src/infrastructure/repositories/mod.rs
mod postgres_article;
mod postgres_theme;
mod postgres_version;

pub use postgres_article::PostgresArticleRepository;
pub use postgres_theme::PostgresThemeRepository;
pub use postgres_version::PostgresArticleVersionRepository;

use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_ARTICLE_APPROVAL_PAIR: &str = "articles_approval_pair_chk";
const CNT_VERSION_SEQ: &str = "article_versions_article_id_seq_key";

pub(crate) fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_VERSION_SEQ => {
                        DomainError::Conflict("concurrent version append, please retry".into())
                    }
                    CNT_ARTICLE_APPROVAL_PAIR => DomainError::Validation(
                        "approval actor and timestamp must be set together".into(),
                    ),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
