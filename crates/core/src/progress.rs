//! Learning progress and the "study today" ranking of study groups.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{StudyGroup, WordId, WordRecord};
use crate::time::{Clock, calendar_day};

//
// ─── OVERVIEW ──────────────────────────────────────────────────────────────────
//

/// Aggregated progress numbers for the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressOverview {
    /// Learned-and-grouped words as a rounded percentage of all words.
    ///
    /// A word held by several groups counts once per group, so this can
    /// exceed 100 when groups overlap.
    pub total_progress_percentage: u32,
    /// Words in groups that have at least one review checkpoint.
    pub test_target_words_count: usize,
    /// Groups studied today, then groups with unlearned words by nearest review.
    pub ranked_study_groups: Vec<StudyGroup>,
}

//
// ─── AGGREGATOR ────────────────────────────────────────────────────────────────
//

/// Pure read-only computation over the word and study group collections.
pub struct ProgressAggregator<'a> {
    words: HashMap<WordId, &'a WordRecord>,
    groups: &'a [StudyGroup],
    total_words: usize,
}

impl<'a> ProgressAggregator<'a> {
    #[must_use]
    pub fn new(words: &'a [WordRecord], groups: &'a [StudyGroup]) -> Self {
        Self {
            words: words.iter().map(|w| (w.id, w)).collect(),
            groups,
            total_words: words.len(),
        }
    }

    /// Compute every metric at once, with "today" taken from `clock`.
    #[must_use]
    pub fn overview(&self, clock: &Clock) -> ProgressOverview {
        ProgressOverview {
            total_progress_percentage: self.total_progress_percentage(),
            test_target_words_count: self.test_target_words_count(),
            ranked_study_groups: self
                .ranked_study_groups(clock.now(), clock.calendar_offset())
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// `round(100 * learned / total)`, or 0 when there are no words.
    #[must_use]
    pub fn total_progress_percentage(&self) -> u32 {
        if self.total_words == 0 {
            return 0;
        }
        let learned = self.learned_memberships() as u64;
        let total = self.total_words as u64;
        let rounded = (learned * 100 + total / 2) / total;
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn test_target_words_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.is_review_eligible())
            .map(|g| g.words().len())
            .sum()
    }

    /// Groups dated on the calendar day of `now` (in `offset`), followed by
    /// groups that still hold an unlearned word, earliest review first.
    ///
    /// A group that matches both criteria appears twice.
    #[must_use]
    pub fn ranked_study_groups(
        &self,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Vec<&'a StudyGroup> {
        let today = calendar_day(now, offset);
        let todays = self
            .groups
            .iter()
            .filter(|g| calendar_day(g.study_date(), offset) == today);

        let mut pending: Vec<&'a StudyGroup> = self
            .groups
            .iter()
            .filter(|g| self.has_unlearned_word(g))
            .collect();
        pending.sort_by(|a, b| by_nearest_review(a, b));

        todays.chain(pending).collect()
    }

    fn learned_memberships(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.words())
            .filter(|id| self.words.get(*id).is_some_and(|w| w.is_learned))
            .count()
    }

    fn has_unlearned_word(&self, group: &StudyGroup) -> bool {
        group
            .words()
            .iter()
            .any(|id| self.words.get(id).is_some_and(|w| !w.is_learned))
    }
}

// Unscheduled groups sort after every scheduled one.
fn by_nearest_review(a: &StudyGroup, b: &StudyGroup) -> Ordering {
    match (a.nearest_review(), b.nearest_review()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
