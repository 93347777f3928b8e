use async_trait::async_trait;
use wordy_core::model::{WordId, WordRecord};

use super::SqliteRepository;
use super::mapping::{conn, insert_error, map_word_row};
use crate::repository::{StorageError, WordRepository};

const WORD_COLUMNS: &str = r"
    id, text, meaning, part_of_speech, example_sentence, pronunciation,
    synonyms, antonyms, is_learned,
    meaning_options_en, meaning_options_ko, meaning_options_zh, meaning_options_ja,
    synonym_options, antonym_options, created_at, updated_at
";

#[async_trait]
impl WordRepository for SqliteRepository {
    async fn insert_words(&self, words: &[WordRecord]) -> Result<(), StorageError> {
        let sql = format!(
            "INSERT INTO words ({WORD_COLUMNS}) VALUES \
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
        );

        let mut tx = self.pool.begin().await.map_err(conn)?;
        for word in words {
            sqlx::query(&sql)
                .bind(word.id.to_string())
                .bind(&word.text)
                .bind(&word.meaning)
                .bind(&word.part_of_speech)
                .bind(&word.example_sentence)
                .bind(&word.pronunciation)
                .bind(&word.synonyms)
                .bind(&word.antonyms)
                .bind(i64::from(word.is_learned))
                .bind(&word.meaning_options.en)
                .bind(&word.meaning_options.ko)
                .bind(&word.meaning_options.zh)
                .bind(&word.meaning_options.ja)
                .bind(&word.synonym_options)
                .bind(&word.antonym_options)
                .bind(word.created_at)
                .bind(word.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(insert_error)?;
        }
        tx.commit().await.map_err(conn)?;

        Ok(())
    }

    async fn list_words(&self) -> Result<Vec<WordRecord>, StorageError> {
        let sql = format!("SELECT {WORD_COLUMNS} FROM words ORDER BY rowid ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut words = Vec::with_capacity(rows.len());
        for row in rows {
            words.push(map_word_row(&row)?);
        }
        Ok(words)
    }

    async fn get_word(&self, id: WordId) -> Result<Option<WordRecord>, StorageError> {
        let sql = format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_word_row).transpose()
    }

    async fn save_word(&self, word: &WordRecord) -> Result<(), StorageError> {
        // created_at is fixed at insert time.
        let result = sqlx::query(
            r"
            UPDATE words SET
                text = ?2,
                meaning = ?3,
                part_of_speech = ?4,
                example_sentence = ?5,
                pronunciation = ?6,
                synonyms = ?7,
                antonyms = ?8,
                is_learned = ?9,
                meaning_options_en = ?10,
                meaning_options_ko = ?11,
                meaning_options_zh = ?12,
                meaning_options_ja = ?13,
                synonym_options = ?14,
                antonym_options = ?15,
                updated_at = ?16
            WHERE id = ?1
            ",
        )
        .bind(word.id.to_string())
        .bind(&word.text)
        .bind(&word.meaning)
        .bind(&word.part_of_speech)
        .bind(&word.example_sentence)
        .bind(&word.pronunciation)
        .bind(&word.synonyms)
        .bind(&word.antonyms)
        .bind(i64::from(word.is_learned))
        .bind(&word.meaning_options.en)
        .bind(&word.meaning_options.ko)
        .bind(&word.meaning_options.zh)
        .bind(&word.meaning_options.ja)
        .bind(&word.synonym_options)
        .bind(&word.antonym_options)
        .bind(word.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
