use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use wordy_core::model::{MeaningOptions, Settings, StudyGroup, StudyGroupId, WordId, WordRecord};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

// A duplicate primary key is a conflict, anything else a connection failure.
pub(crate) fn insert_error(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => conn(err),
    }
}

pub(crate) fn word_id_from_text(raw: &str) -> Result<WordId, StorageError> {
    raw.parse().map_err(ser)
}

pub(crate) fn group_id_from_text(raw: &str) -> Result<StudyGroupId, StorageError> {
    raw.parse().map_err(ser)
}

pub(crate) fn map_word_row(row: &SqliteRow) -> Result<WordRecord, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let is_learned: i64 = row.try_get("is_learned").map_err(ser)?;

    Ok(WordRecord {
        id: word_id_from_text(&id)?,
        text: row.try_get("text").map_err(ser)?,
        meaning: row.try_get("meaning").map_err(ser)?,
        part_of_speech: row.try_get("part_of_speech").map_err(ser)?,
        example_sentence: row.try_get("example_sentence").map_err(ser)?,
        pronunciation: row.try_get("pronunciation").map_err(ser)?,
        synonyms: row.try_get("synonyms").map_err(ser)?,
        antonyms: row.try_get("antonyms").map_err(ser)?,
        is_learned: is_learned != 0,
        meaning_options: MeaningOptions {
            en: row.try_get("meaning_options_en").map_err(ser)?,
            ko: row.try_get("meaning_options_ko").map_err(ser)?,
            zh: row.try_get("meaning_options_zh").map_err(ser)?,
            ja: row.try_get("meaning_options_ja").map_err(ser)?,
        },
        synonym_options: row.try_get("synonym_options").map_err(ser)?,
        antonym_options: row.try_get("antonym_options").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

/// Maps a `study_groups` row; `words` come from `study_group_words`.
pub(crate) fn map_study_group_row(
    row: &SqliteRow,
    words: Vec<WordId>,
) -> Result<StudyGroup, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let is_completed: i64 = row.try_get("is_completed").map_err(ser)?;
    let review1_at: Option<DateTime<Utc>> = row.try_get("review1_at").map_err(ser)?;
    let review2_at: Option<DateTime<Utc>> = row.try_get("review2_at").map_err(ser)?;
    let review3_at: Option<DateTime<Utc>> = row.try_get("review3_at").map_err(ser)?;

    Ok(StudyGroup::from_persisted(
        group_id_from_text(&id)?,
        row.try_get("study_date").map_err(ser)?,
        review1_at,
        review2_at,
        review3_at,
        is_completed != 0,
        words,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
    ))
}

pub(crate) fn map_settings_row(row: &SqliteRow) -> Result<Settings, StorageError> {
    let limit: i64 = row.try_get("daily_word_limit").map_err(ser)?;
    let daily_word_limit = u32::try_from(limit)
        .map_err(|_| StorageError::Serialization(format!("invalid daily_word_limit: {limit}")))?;

    Ok(Settings::from_persisted(
        daily_word_limit,
        row.try_get("learning_language").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
    ))
}
