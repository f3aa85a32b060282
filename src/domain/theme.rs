// src/domain/theme.rs
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub const DEFAULT_PRESET: &str = "default";

/// Site-wide theme. A singleton row: the first read creates it with the
/// default preset and no overrides.
#[derive(Debug, Clone)]
pub struct Theme {
    pub id: i64,
    pub preset: String,
    pub overrides: Map<String, Value>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ThemeUpdate {
    pub preset: Option<String>,
    pub overrides: Option<Map<String, Value>>,
}

impl ThemeUpdate {
    pub fn is_empty(&self) -> bool {
        self.preset.is_none() && self.overrides.is_none()
    }
}

#[async_trait]
pub trait ThemeRepository: Send + Sync {
    async fn get_or_create(&self, now: DateTime<Utc>) -> DomainResult<Theme>;
    async fn update(&self, update: ThemeUpdate, updated_at: DateTime<Utc>) -> DomainResult<Theme>;
}
