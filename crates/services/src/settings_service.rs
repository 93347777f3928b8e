use std::sync::Arc;

use storage::repository::SettingsRepository;
use tracing::info;
use wordy_core::model::{Settings, SettingsDraft};

use crate::Clock;
use crate::error::SettingsServiceError;

#[derive(Clone)]
pub struct SettingsService {
    clock: Clock,
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn SettingsRepository>) -> Self {
        Self { clock, repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<Settings, SettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_else(|| Settings::with_defaults(self.clock.now())))
    }

    /// Validate the draft against the current settings and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation fails or persistence fails.
    pub async fn save(&self, draft: SettingsDraft) -> Result<Settings, SettingsServiceError> {
        let current = self.load().await?;
        let settings = draft.apply(&current, self.clock.now())?;
        self.repo.save_settings(&settings).await?;
        info!(
            daily_word_limit = settings.daily_word_limit(),
            learning_language = settings.learning_language(),
            "settings saved"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use wordy_core::model::SettingsError;
    use wordy_core::time::fixed_clock;

    #[tokio::test]
    async fn load_falls_back_to_defaults() {
        let service = SettingsService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        let settings = service.load().await.unwrap();
        assert_eq!(settings.daily_word_limit(), 30);
        assert_eq!(settings.learning_language(), "en");
    }

    #[tokio::test]
    async fn save_validates_and_persists() {
        let repo = InMemoryRepository::new();
        let service = SettingsService::new(fixed_clock(), Arc::new(repo.clone()));

        let saved = service
            .save(SettingsDraft {
                daily_word_limit: None,
                learning_language: Some("ko".into()),
            })
            .await
            .unwrap();
        assert_eq!(saved.learning_language(), "ko");
        assert_eq!(repo.get_settings().await.unwrap(), Some(saved));

        let err = service
            .save(SettingsDraft {
                daily_word_limit: Some(0),
                learning_language: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsServiceError::Settings(SettingsError::InvalidDailyWordLimit)
        ));
    }
}
