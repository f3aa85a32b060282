// tests/support/mod.rs
//
// In-memory implementations of the repository traits plus a fixed clock,
// shared by the service-level and router-level test binaries. Not every
// helper is used by every test binary.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use stele::application::dto::AuthenticatedActor;
use stele::application::ports::time::Clock;
use stele::application::services::ApplicationServices;
use stele::domain::actor::{ActorId, Role};
use stele::domain::article::{
    Approval, Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleStatus,
    ArticleTitle, ArticleVersion, ArticleVersionRepository, ArticleWriteRepository, ContentId,
    ContentSnapshot, NewArticle, NewArticleVersion, VersionKind,
};
use stele::domain::document::Document;
use stele::domain::errors::{DomainError, DomainResult};
use stele::domain::policy::ListScope;
use stele::domain::theme::{DEFAULT_PRESET, Theme, ThemeRepository, ThemeUpdate};
use stele::presentation::http::{routes::build_router, state::HttpState};

/// Deterministic clock; tests advance it explicitly. Keeping every write
/// at the same instant also proves version ordering comes from `seq`, not
/// timestamps.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += duration;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
struct StoreInner {
    articles: HashMap<i64, Article>,
    versions: Vec<ArticleVersion>,
    theme: Option<Theme>,
    next_article_id: i64,
    next_version_id: i64,
    next_content_id: i64,
}

/// One mutex over the whole store: every repository call is atomic, the
/// way each Postgres transaction is.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_seq(inner: &StoreInner, article_id: ArticleId) -> i64 {
        inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .map(|v| v.seq)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn push_version(
        inner: &mut StoreInner,
        article_id: ArticleId,
        kind: VersionKind,
        body: Document,
        updated_by: ActorId,
        updated_at: DateTime<Utc>,
    ) -> ArticleVersion {
        inner.next_version_id += 1;
        inner.next_content_id += 1;
        let version = ArticleVersion {
            id: inner.next_version_id,
            article_id,
            seq: Self::next_seq(inner, article_id),
            kind,
            content: ContentSnapshot {
                id: ContentId::new(inner.next_content_id).unwrap(),
                body,
            },
            updated_by,
            updated_at,
        };
        inner.versions.push(version.clone());
        version
    }

    fn current_of_kind(
        inner: &StoreInner,
        article_id: ArticleId,
        kind: VersionKind,
    ) -> Option<ArticleVersion> {
        inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id && v.kind == kind)
            .max_by_key(|v| v.seq)
            .cloned()
    }

    /// Drop every version row of an article, leaving the article row in
    /// place. Simulates the "live article with a bare history" state the
    /// workflow must tolerate.
    pub fn purge_versions(&self, article_id: ArticleId) {
        let mut inner = self.inner.lock().unwrap();
        inner.versions.retain(|v| v.article_id != article_id);
    }

    /// Raw version rows for a given article, in append order.
    pub fn versions_of(&self, article_id: ArticleId) -> Vec<ArticleVersion> {
        let inner = self.inner.lock().unwrap();
        inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .articles
            .values()
            .find(|article| article.slug == *slug)
            .cloned())
    }

    async fn list(&self, scope: ListScope) -> DomainResult<Vec<Article>> {
        let inner = self.inner.lock().unwrap();
        let mut articles: Vec<Article> = inner
            .articles
            .values()
            .filter(|article| match scope {
                ListScope::All => true,
                ListScope::CreatedBy(creator_id) => article.creator_id == creator_id,
            })
            .cloned()
            .collect();
        articles.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
        });
        Ok(articles)
    }

    async fn list_published(&self) -> DomainResult<Vec<Article>> {
        let inner = self.inner.lock().unwrap();
        let mut articles: Vec<Article> = inner
            .articles
            .values()
            .filter(|article| article.status == ArticleStatus::Published)
            .cloned()
            .collect();
        articles.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
        });
        Ok(articles)
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryStore {
    async fn insert(&self, article: NewArticle, initial_body: Document) -> DomainResult<Article> {
        let mut inner = self.inner.lock().unwrap();
        if inner.articles.values().any(|a| a.slug == article.slug) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        inner.next_article_id += 1;
        let created = Article {
            id: ArticleId::new(inner.next_article_id).unwrap(),
            slug: article.slug,
            title: article.title,
            status: ArticleStatus::Draft,
            creator_id: article.creator_id,
            approval: None,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        inner.articles.insert(i64::from(created.id), created.clone());
        Self::push_version(
            &mut inner,
            created.id,
            VersionKind::Draft,
            initial_body,
            created.creator_id,
            created.created_at,
        );
        Ok(created)
    }

    async fn set_title(
        &self,
        id: ArticleId,
        title: ArticleTitle,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article> {
        let mut inner = self.inner.lock().unwrap();
        let article = inner
            .articles
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.set_title(title, updated_at);
        Ok(article.clone())
    }

    async fn set_approval(
        &self,
        id: ArticleId,
        approval: Approval,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article> {
        let mut inner = self.inner.lock().unwrap();
        let article = inner
            .articles
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.approval = Some(approval);
        article.updated_at = updated_at;
        Ok(article.clone())
    }

    async fn publish(
        &self,
        id: ArticleId,
        version: NewArticleVersion,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Article> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.articles.contains_key(&i64::from(id)) {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Self::push_version(
            &mut inner,
            id,
            version.kind,
            version.body,
            version.updated_by,
            version.updated_at,
        );
        let article = inner
            .articles
            .get_mut(&i64::from(id))
            .expect("checked above");
        article.mark_published(updated_at);
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.articles.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        inner.versions.retain(|v| v.article_id != id);
        Ok(())
    }
}

#[async_trait]
impl ArticleVersionRepository for InMemoryStore {
    async fn current_draft(&self, article_id: ArticleId) -> DomainResult<Option<ArticleVersion>> {
        let inner = self.inner.lock().unwrap();
        Ok(Self::current_of_kind(&inner, article_id, VersionKind::Draft))
    }

    async fn current_published(
        &self,
        article_id: ArticleId,
    ) -> DomainResult<Option<ArticleVersion>> {
        let inner = self.inner.lock().unwrap();
        Ok(Self::current_of_kind(
            &inner,
            article_id,
            VersionKind::Published,
        ))
    }

    async fn append_draft(
        &self,
        article_id: ArticleId,
        body: Document,
        updated_by: ActorId,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<ArticleVersion> {
        let mut inner = self.inner.lock().unwrap();
        Ok(Self::push_version(
            &mut inner,
            article_id,
            VersionKind::Draft,
            body,
            updated_by,
            updated_at,
        ))
    }
}

#[async_trait]
impl ThemeRepository for InMemoryStore {
    async fn get_or_create(&self, now: DateTime<Utc>) -> DomainResult<Theme> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(theme) = &inner.theme {
            return Ok(theme.clone());
        }
        let theme = Theme {
            id: 1,
            preset: DEFAULT_PRESET.into(),
            overrides: serde_json::Map::new(),
            updated_at: now,
        };
        inner.theme = Some(theme.clone());
        Ok(theme)
    }

    async fn update(&self, update: ThemeUpdate, updated_at: DateTime<Utc>) -> DomainResult<Theme> {
        let mut inner = self.inner.lock().unwrap();
        let theme = inner
            .theme
            .as_mut()
            .ok_or_else(|| DomainError::NotFound("theme not found".into()))?;
        if let Some(preset) = update.preset {
            theme.preset = preset;
        }
        if let Some(overrides) = update.overrides {
            theme.overrides = overrides;
        }
        theme.updated_at = updated_at;
        Ok(theme.clone())
    }
}

pub struct TestHarness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedClock>,
    pub services: Arc<ApplicationServices>,
}

pub fn make_harness() -> TestHarness {
    let store = InMemoryStore::new();
    let clock = Arc::new(FixedClock::new());
    let services = Arc::new(ApplicationServices::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
    ));
    TestHarness {
        store,
        clock,
        services,
    }
}

pub fn make_test_router(harness: &TestHarness) -> Router {
    build_router(HttpState {
        services: harness.services.clone(),
    })
}

pub fn contributor(id: i64) -> AuthenticatedActor {
    AuthenticatedActor {
        id: ActorId::new(id).unwrap(),
        role: Role::Contributor,
    }
}

pub fn maintainer(id: i64) -> AuthenticatedActor {
    AuthenticatedActor {
        id: ActorId::new(id).unwrap(),
        role: Role::Maintainer,
    }
}

pub fn owner(id: i64) -> AuthenticatedActor {
    AuthenticatedActor {
        id: ActorId::new(id).unwrap(),
        role: Role::Owner,
    }
}
