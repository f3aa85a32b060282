// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{articles::ArticleCommandService, theme::ThemeCommandService},
        ports::time::Clock,
        queries::{articles::ArticleQueryService, public::PublicQueryService},
    },
    domain::{
        article::{ArticleReadRepository, ArticleVersionRepository, ArticleWriteRepository},
        theme::ThemeRepository,
    },
};

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub public_queries: Arc<PublicQueryService>,
    pub theme_commands: Arc<ThemeCommandService>,
}

impl ApplicationServices {
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        article_version_repo: Arc<dyn ArticleVersionRepository>,
        theme_repo: Arc<dyn ThemeRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&article_version_repo),
            Arc::clone(&clock),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&article_version_repo),
        ));

        let public_queries = Arc::new(PublicQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&article_version_repo),
            Arc::clone(&theme_repo),
            Arc::clone(&clock),
        ));

        let theme_commands = Arc::new(ThemeCommandService::new(
            Arc::clone(&theme_repo),
            Arc::clone(&clock),
        ));

        Self {
            article_commands,
            article_queries,
            public_queries,
            theme_commands,
        }
    }
}
