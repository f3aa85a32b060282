// src/application/commands/theme.rs
use crate::{
    application::{
        dto::{AuthenticatedActor, ThemeDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        policy,
        theme::{ThemeRepository, ThemeUpdate},
    },
};
use serde_json::{Map, Value};
use std::sync::Arc;

pub struct UpdateThemeCommand {
    pub preset: Option<String>,
    pub overrides: Option<Map<String, Value>>,
}

pub struct ThemeCommandService {
    theme_repo: Arc<dyn ThemeRepository>,
    clock: Arc<dyn Clock>,
}

impl ThemeCommandService {
    pub fn new(theme_repo: Arc<dyn ThemeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { theme_repo, clock }
    }

    /// Update the singleton theme. An empty patch returns the current
    /// theme unchanged.
    pub async fn update_theme(
        &self,
        actor: &AuthenticatedActor,
        command: UpdateThemeCommand,
    ) -> ApplicationResult<ThemeDto> {
        if !policy::can_approve_or_publish(actor.role) {
            return Err(ApplicationError::forbidden("maintainer or owner only"));
        }

        let now = self.clock.now();
        let update = ThemeUpdate {
            preset: command
                .preset
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            overrides: command.overrides,
        };

        if update.is_empty() {
            let theme = self.theme_repo.get_or_create(now).await?;
            return Ok(theme.into());
        }

        // Ensure the singleton row exists before patching it.
        self.theme_repo.get_or_create(now).await?;
        let updated = self.theme_repo.update(update, now).await?;
        Ok(updated.into())
    }
}
