use async_trait::async_trait;
use wordy_core::model::Settings;

use super::SqliteRepository;
use super::mapping::{conn, map_settings_row};
use crate::repository::{SettingsRepository, StorageError};

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<Settings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT daily_word_limit, learning_language, created_at, updated_at
            FROM settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_settings_row).transpose()
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO settings (id, daily_word_limit, learning_language, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                daily_word_limit = excluded.daily_word_limit,
                learning_language = excluded.learning_language,
                updated_at = excluded.updated_at
            ",
        )
        .bind(1_i64)
        .bind(i64::from(settings.daily_word_limit()))
        .bind(settings.learning_language())
        .bind(settings.created_at())
        .bind(settings.updated_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
