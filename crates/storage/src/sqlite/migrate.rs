use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use super::SqliteInitError;

/// Applies schema versions that have not been recorded in `schema_migrations`.
///
/// Version 1 creates words, study groups with their ordered word membership,
/// and the single-row settings table.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS words (
                    id TEXT PRIMARY KEY NOT NULL,
                    text TEXT NOT NULL,
                    meaning TEXT NOT NULL,
                    part_of_speech TEXT NOT NULL,
                    example_sentence TEXT NOT NULL,
                    pronunciation TEXT NOT NULL,
                    synonyms TEXT NOT NULL,
                    antonyms TEXT NOT NULL,
                    is_learned INTEGER NOT NULL CHECK (is_learned IN (0, 1)),
                    meaning_options_en TEXT NOT NULL,
                    meaning_options_ko TEXT NOT NULL,
                    meaning_options_zh TEXT NOT NULL,
                    meaning_options_ja TEXT NOT NULL,
                    synonym_options TEXT NOT NULL,
                    antonym_options TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS study_groups (
                    id TEXT PRIMARY KEY NOT NULL,
                    study_date TEXT NOT NULL,
                    review1_at TEXT,
                    review2_at TEXT,
                    review3_at TEXT,
                    is_completed INTEGER NOT NULL CHECK (is_completed IN (0, 1)),
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        // Word references are not foreign keys: a group may outlive a word.
        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS study_group_words (
                    group_id TEXT NOT NULL,
                    word_id TEXT NOT NULL,
                    position INTEGER NOT NULL CHECK (position >= 0),
                    PRIMARY KEY (group_id, word_id),
                    FOREIGN KEY (group_id) REFERENCES study_groups(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS settings (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    daily_word_limit INTEGER NOT NULL CHECK (daily_word_limit >= 0),
                    learning_language TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_study_group_words_group_position
                    ON study_group_words (group_id, position);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(version = 1, "applied schema migration");
    }

    Ok(())
}
