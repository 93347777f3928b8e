use std::sync::Arc;

use storage::repository::{StudyGroupRepository, WordRepository};
use wordy_core::progress::{ProgressAggregator, ProgressOverview};

use crate::Clock;
use crate::error::HomeServiceError;

/// Feeds the stored words and study groups to the progress aggregator.
#[derive(Clone)]
pub struct HomeService {
    clock: Clock,
    words: Arc<dyn WordRepository>,
    study_groups: Arc<dyn StudyGroupRepository>,
}

impl HomeService {
    #[must_use]
    pub fn new(
        clock: Clock,
        words: Arc<dyn WordRepository>,
        study_groups: Arc<dyn StudyGroupRepository>,
    ) -> Self {
        Self {
            clock,
            words,
            study_groups,
        }
    }

    /// Progress percentage, review targets and today's ranked study groups.
    ///
    /// # Errors
    ///
    /// Returns `HomeServiceError::Storage` if either collection cannot be read.
    pub async fn overview(&self) -> Result<ProgressOverview, HomeServiceError> {
        let words = self.words.list_words().await?;
        let groups = self.study_groups.list_study_groups().await?;
        Ok(ProgressAggregator::new(&words, &groups).overview(&self.clock))
    }
}
