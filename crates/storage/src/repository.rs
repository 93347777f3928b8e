use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use wordy_core::model::{Settings, StudyGroup, StudyGroupId, WordId, WordRecord};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for vocabulary entries.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Insert a batch of new words, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if any id already exists, or other
    /// storage errors. Nothing is stored on failure.
    async fn insert_words(&self, words: &[WordRecord]) -> Result<(), StorageError>;

    /// Fetch every word in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the words cannot be read.
    async fn list_words(&self) -> Result<Vec<WordRecord>, StorageError>;

    /// Fetch a word by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures; a missing word is `Ok(None)`.
    async fn get_word(&self, id: WordId) -> Result<Option<WordRecord>, StorageError>;

    /// Persist changes to an existing word.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the word was never inserted.
    async fn save_word(&self, word: &WordRecord) -> Result<(), StorageError>;
}

#[async_trait]
pub trait StudyGroupRepository: Send + Sync {
    /// Insert a new study group with its word list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id already exists.
    async fn insert_study_group(&self, group: &StudyGroup) -> Result<(), StorageError>;

    /// Fetch every study group in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the groups cannot be read.
    async fn list_study_groups(&self) -> Result<Vec<StudyGroup>, StorageError>;

    /// Persist changes to an existing group, replacing its word list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the group was never inserted.
    async fn save_study_group(&self, group: &StudyGroup) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the settings record, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn get_settings(&self) -> Result<Option<Settings>, StorageError>;

    /// Insert or replace the settings record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    words: Arc<Mutex<Vec<WordRecord>>>,
    groups: Arc<Mutex<Vec<StudyGroup>>>,
    settings: Arc<Mutex<Option<Settings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl WordRepository for InMemoryRepository {
    async fn insert_words(&self, words: &[WordRecord]) -> Result<(), StorageError> {
        let mut guard = self.words.lock().map_err(poisoned)?;
        let clashes = words.iter().enumerate().any(|(i, w)| {
            guard.iter().any(|existing| existing.id == w.id)
                || words[..i].iter().any(|earlier| earlier.id == w.id)
        });
        if clashes {
            return Err(StorageError::Conflict);
        }
        guard.extend_from_slice(words);
        Ok(())
    }

    async fn list_words(&self) -> Result<Vec<WordRecord>, StorageError> {
        let guard = self.words.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn get_word(&self, id: WordId) -> Result<Option<WordRecord>, StorageError> {
        let guard = self.words.lock().map_err(poisoned)?;
        Ok(guard.iter().find(|w| w.id == id).cloned())
    }

    async fn save_word(&self, word: &WordRecord) -> Result<(), StorageError> {
        let mut guard = self.words.lock().map_err(poisoned)?;
        let slot = guard
            .iter_mut()
            .find(|w| w.id == word.id)
            .ok_or(StorageError::NotFound)?;
        *slot = word.clone();
        Ok(())
    }
}

#[async_trait]
impl StudyGroupRepository for InMemoryRepository {
    async fn insert_study_group(&self, group: &StudyGroup) -> Result<(), StorageError> {
        let mut guard = self.groups.lock().map_err(poisoned)?;
        if guard.iter().any(|g| g.id() == group.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(group.clone());
        Ok(())
    }

    async fn list_study_groups(&self) -> Result<Vec<StudyGroup>, StorageError> {
        let guard = self.groups.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn save_study_group(&self, group: &StudyGroup) -> Result<(), StorageError> {
        let mut guard = self.groups.lock().map_err(poisoned)?;
        let slot = guard
            .iter_mut()
            .find(|g| g.id() == group.id())
            .ok_or(StorageError::NotFound)?;
        *slot = group.clone();
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<Settings>, StorageError> {
        let guard = self.settings.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let mut guard = self.settings.lock().map_err(poisoned)?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// The store handle threaded through services. Owned by the host application.
#[derive(Clone)]
pub struct Storage {
    pub words: Arc<dyn WordRepository>,
    pub study_groups: Arc<dyn StudyGroupRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_repository(repo)
    }

    /// Use one adapter for every collection.
    #[must_use]
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: WordRepository + StudyGroupRepository + SettingsRepository + Clone + 'static,
    {
        let words: Arc<dyn WordRepository> = Arc::new(repo.clone());
        let study_groups: Arc<dyn StudyGroupRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo);
        Self {
            words,
            study_groups,
            settings,
        }
    }
}

/// Convenience lookup used when a caller only has a group id.
///
/// # Errors
///
/// Returns `StorageError::NotFound` if no group has the id.
pub async fn find_study_group(
    repo: &dyn StudyGroupRepository,
    id: StudyGroupId,
) -> Result<StudyGroup, StorageError> {
    repo.list_study_groups()
        .await?
        .into_iter()
        .find(|g| g.id() == id)
        .ok_or(StorageError::NotFound)
}
