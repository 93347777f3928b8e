//! Multiple-choice quizzes over stored words.

mod engine;
mod options;

pub use engine::{QUIZ_SIZE, QuizEngine, QuizState};
pub use options::{OPTIONS_PER_QUESTION, OptionSet, build_option_set, pool_selector};

use std::sync::Arc;

use rand::Rng;
use storage::repository::{
    SettingsRepository, StorageError, StudyGroupRepository, WordRepository, find_study_group,
};
use tracing::debug;
use wordy_core::model::{Settings, StudyGroupId, WordRecord};

use crate::Clock;
use crate::error::QuizServiceError;

/// Loads words and settings from storage and starts quizzes over them.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    words: Arc<dyn WordRepository>,
    study_groups: Arc<dyn StudyGroupRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        words: Arc<dyn WordRepository>,
        study_groups: Arc<dyn StudyGroupRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            clock,
            words,
            study_groups,
            settings,
        }
    }

    /// Start a quiz over all stored words, in storage order.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if words or settings cannot be read.
    pub async fn start_quiz(&self) -> Result<QuizEngine, QuizServiceError> {
        let words = self.words.list_words().await?;
        let settings = self.load_settings().await?;
        Ok(Self::generate(&words, &settings, &mut rand::rng()))
    }

    /// Like `start_quiz`, with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if words or settings cannot be read.
    pub async fn start_quiz_with_rng<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<QuizEngine, QuizServiceError> {
        let words = self.words.list_words().await?;
        let settings = self.load_settings().await?;
        Ok(Self::generate(&words, &settings, rng))
    }

    /// Start a quiz over the words of one study group, in group order.
    ///
    /// Word references that no longer resolve are skipped.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::StudyGroupNotFound` for an unknown group and
    /// `QuizServiceError::Storage` on read failures.
    pub async fn start_group_quiz(
        &self,
        group_id: StudyGroupId,
    ) -> Result<QuizEngine, QuizServiceError> {
        let group = match find_study_group(self.study_groups.as_ref(), group_id).await {
            Ok(group) => group,
            Err(StorageError::NotFound) => {
                return Err(QuizServiceError::StudyGroupNotFound(group_id));
            }
            Err(err) => return Err(err.into()),
        };

        let all = self.words.list_words().await?;
        let words: Vec<WordRecord> = group
            .words()
            .iter()
            .filter_map(|id| all.iter().find(|w| w.id == *id).cloned())
            .collect();

        let settings = self.load_settings().await?;
        Ok(Self::generate(&words, &settings, &mut rand::rng()))
    }

    async fn load_settings(&self) -> Result<Settings, QuizServiceError> {
        let settings = self.settings.get_settings().await?;
        Ok(settings.unwrap_or_else(|| Settings::with_defaults(self.clock.now())))
    }

    fn generate<R: Rng + ?Sized>(
        words: &[WordRecord],
        settings: &Settings,
        rng: &mut R,
    ) -> QuizEngine {
        let mut engine = QuizEngine::new();
        engine.generate(words, settings, rng);
        debug!(
            questions = engine.questions().len(),
            language = settings.learning_language(),
            "quiz generated"
        );
        engine
    }
}
