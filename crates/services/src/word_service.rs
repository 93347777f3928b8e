use std::sync::Arc;

use storage::repository::WordRepository;
use tracing::debug;
use wordy_core::model::{WordId, WordRecord};

use crate::Clock;
use crate::error::WordServiceError;

/// Reads words and flips their learned flag.
#[derive(Clone)]
pub struct WordService {
    clock: Clock,
    words: Arc<dyn WordRepository>,
}

impl WordService {
    #[must_use]
    pub fn new(clock: Clock, words: Arc<dyn WordRepository>) -> Self {
        Self { clock, words }
    }

    /// All words in storage order.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` if repository access fails.
    pub async fn list_words(&self) -> Result<Vec<WordRecord>, WordServiceError> {
        Ok(self.words.list_words().await?)
    }

    /// Flip the learned flag of a word and persist it.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::NotFound` for an unknown id and
    /// `WordServiceError::Storage` if persistence fails.
    pub async fn toggle_learned(&self, id: WordId) -> Result<WordRecord, WordServiceError> {
        let mut word = self.words.get_word(id).await?.ok_or(WordServiceError::NotFound)?;
        let learned = word.toggle_learned(self.clock.now());
        self.words.save_word(&word).await?;
        debug!(word_id = %id, learned, "toggled learned flag");
        Ok(word)
    }

    /// Set the learned flag. Writes only when the value changes.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::NotFound` for an unknown id and
    /// `WordServiceError::Storage` if persistence fails.
    pub async fn set_learned(
        &self,
        id: WordId,
        learned: bool,
    ) -> Result<WordRecord, WordServiceError> {
        let mut word = self.words.get_word(id).await?.ok_or(WordServiceError::NotFound)?;
        if word.set_learned(learned, self.clock.now()) {
            self.words.save_word(&word).await?;
            debug!(word_id = %id, learned, "set learned flag");
        }
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use storage::repository::InMemoryRepository;
    use wordy_core::model::{MeaningOptions, WordDraft};
    use wordy_core::time::fixed_now;

    fn seeded() -> (InMemoryRepository, WordRecord) {
        let repo = InMemoryRepository::new();
        let word = WordDraft {
            text: "mirth".into(),
            meaning: "amusement".into(),
            part_of_speech: "noun".into(),
            example_sentence: String::new(),
            pronunciation: String::new(),
            synonyms: String::new(),
            antonyms: String::new(),
            is_learned: false,
            meaning_options: MeaningOptions::default(),
            synonym_options: String::new(),
            antonym_options: String::new(),
        }
        .into_record(WordId::new_v4(), fixed_now());
        (repo, word)
    }

    #[tokio::test]
    async fn toggle_persists_and_stamps_update() {
        let (repo, word) = seeded();
        repo.insert_words(std::slice::from_ref(&word)).await.unwrap();
        let later = fixed_now() + Duration::minutes(10);
        let service = WordService::new(Clock::fixed(later), Arc::new(repo.clone()));

        let toggled = service.toggle_learned(word.id).await.unwrap();
        assert!(toggled.is_learned);
        assert_eq!(toggled.updated_at, later);

        let stored = repo.get_word(word.id).await.unwrap().unwrap();
        assert!(stored.is_learned);
    }

    #[tokio::test]
    async fn set_learned_is_noop_when_unchanged() {
        let (repo, word) = seeded();
        repo.insert_words(std::slice::from_ref(&word)).await.unwrap();
        let later = fixed_now() + Duration::hours(1);
        let service = WordService::new(Clock::fixed(later), Arc::new(repo));

        let same = service.set_learned(word.id, false).await.unwrap();
        assert_eq!(same.updated_at, fixed_now());
    }

    #[tokio::test]
    async fn unknown_word_is_not_found() {
        let (repo, _) = seeded();
        let service = WordService::new(Clock::fixed(fixed_now()), Arc::new(repo));
        let err = service.toggle_learned(WordId::new_v4()).await.unwrap_err();
        assert!(matches!(err, WordServiceError::NotFound));
    }
}
