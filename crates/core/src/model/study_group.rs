use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{StudyGroupId, WordId};

/// One of the three spaced-review checkpoints of a study group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewSlot {
    First,
    Second,
    Third,
}

/// A dated batch of words under study, with up to three review checkpoints.
///
/// Word membership is by reference. Nothing prevents two groups from holding
/// the same word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyGroup {
    id: StudyGroupId,
    study_date: DateTime<Utc>,
    review1_at: Option<DateTime<Utc>>,
    review2_at: Option<DateTime<Utc>>,
    review3_at: Option<DateTime<Utc>>,
    is_completed: bool,
    words: Vec<WordId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StudyGroup {
    /// Creates an empty, unscheduled group studied on `study_date`.
    #[must_use]
    pub fn new(id: StudyGroupId, study_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            study_date,
            review1_at: None,
            review2_at: None,
            review3_at: None,
            is_completed: false,
            words: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a group from persisted storage.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_persisted(
        id: StudyGroupId,
        study_date: DateTime<Utc>,
        review1_at: Option<DateTime<Utc>>,
        review2_at: Option<DateTime<Utc>>,
        review3_at: Option<DateTime<Utc>>,
        is_completed: bool,
        words: Vec<WordId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            study_date,
            review1_at,
            review2_at,
            review3_at,
            is_completed,
            words,
            created_at,
            updated_at,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> StudyGroupId {
        self.id
    }

    #[must_use]
    pub fn study_date(&self) -> DateTime<Utc> {
        self.study_date
    }

    #[must_use]
    pub fn review_at(&self, slot: ReviewSlot) -> Option<DateTime<Utc>> {
        match slot {
            ReviewSlot::First => self.review1_at,
            ReviewSlot::Second => self.review2_at,
            ReviewSlot::Third => self.review3_at,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    #[must_use]
    pub fn words(&self) -> &[WordId] {
        &self.words
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// A group is review-eligible once any checkpoint is scheduled.
    #[must_use]
    pub fn is_review_eligible(&self) -> bool {
        self.review1_at.is_some() || self.review2_at.is_some() || self.review3_at.is_some()
    }

    /// Earliest scheduled checkpoint, if any.
    #[must_use]
    pub fn nearest_review(&self) -> Option<DateTime<Utc>> {
        [self.review1_at, self.review2_at, self.review3_at]
            .into_iter()
            .flatten()
            .min()
    }

    /// Appends a word. Returns false if the group already holds it.
    pub fn add_word(&mut self, word: WordId, now: DateTime<Utc>) -> bool {
        if self.words.contains(&word) {
            return false;
        }
        self.words.push(word);
        self.updated_at = now;
        true
    }

    pub fn schedule_review(&mut self, slot: ReviewSlot, at: DateTime<Utc>, now: DateTime<Utc>) {
        let target = match slot {
            ReviewSlot::First => &mut self.review1_at,
            ReviewSlot::Second => &mut self.review2_at,
            ReviewSlot::Third => &mut self.review3_at,
        };
        *target = Some(at);
        self.updated_at = now;
    }

    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.updated_at = now;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn new_group_is_not_review_eligible() {
        let now = fixed_now();
        let group = StudyGroup::new(StudyGroupId::new_v4(), now, now);
        assert!(!group.is_review_eligible());
        assert_eq!(group.nearest_review(), None);
        assert!(group.words().is_empty());
    }

    #[test]
    fn nearest_review_picks_earliest_scheduled_slot() {
        let now = fixed_now();
        let mut group = StudyGroup::new(StudyGroupId::new_v4(), now, now);
        group.schedule_review(ReviewSlot::Third, now + Duration::days(7), now);
        group.schedule_review(ReviewSlot::Second, now + Duration::days(3), now);

        assert!(group.is_review_eligible());
        assert_eq!(group.nearest_review(), Some(now + Duration::days(3)));
        assert_eq!(group.review_at(ReviewSlot::First), None);
    }

    #[test]
    fn add_word_ignores_duplicates() {
        let now = fixed_now();
        let mut group = StudyGroup::new(StudyGroupId::new_v4(), now, now);
        let word = WordId::new_v4();
        let later = now + Duration::minutes(1);

        assert!(group.add_word(word, later));
        assert!(!group.add_word(word, later + Duration::minutes(1)));
        assert_eq!(group.words(), &[word]);
        assert_eq!(group.updated_at(), later);
    }

    #[test]
    fn mark_completed_sets_flag() {
        let now = fixed_now();
        let mut group = StudyGroup::new(StudyGroupId::new_v4(), now, now);
        group.mark_completed(now + Duration::hours(1));
        assert!(group.is_completed());
        assert_eq!(group.created_at(), now);
    }
}
