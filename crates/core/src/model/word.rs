use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::WordId;

/// Separator inside option pools and multi-value columns.
pub const OPTION_SEPARATOR: char = '|';

//
// ─── OPTION POOLS ──────────────────────────────────────────────────────────────
//

/// Meaning-quiz option pools, one per supported language.
///
/// Each pool is kept verbatim as `first|second|...`; the first entry is the
/// correct answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningOptions {
    pub en: String,
    pub ko: String,
    pub zh: String,
    pub ja: String,
}

/// Splits a raw option pool into trimmed tokens, keeping empty ones in place.
#[must_use]
pub fn split_pool(raw: &str) -> Vec<&str> {
    raw.split(OPTION_SEPARATOR).map(str::trim).collect()
}

//
// ─── WORD DRAFT ────────────────────────────────────────────────────────────────
//

/// A catalog row before it has an identity or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDraft {
    pub text: String,
    pub meaning: String,
    pub part_of_speech: String,
    pub example_sentence: String,
    pub pronunciation: String,
    pub synonyms: String,
    pub antonyms: String,
    pub is_learned: bool,
    pub meaning_options: MeaningOptions,
    pub synonym_options: String,
    pub antonym_options: String,
}

impl WordDraft {
    #[must_use]
    pub fn into_record(self, id: WordId, now: DateTime<Utc>) -> WordRecord {
        WordRecord {
            id,
            text: self.text,
            meaning: self.meaning,
            part_of_speech: self.part_of_speech,
            example_sentence: self.example_sentence,
            pronunciation: self.pronunciation,
            synonyms: self.synonyms,
            antonyms: self.antonyms,
            is_learned: self.is_learned,
            meaning_options: self.meaning_options,
            synonym_options: self.synonym_options,
            antonym_options: self.antonym_options,
            created_at: now,
            updated_at: now,
        }
    }
}

//
// ─── WORD RECORD ───────────────────────────────────────────────────────────────
//

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: WordId,
    pub text: String,
    pub meaning: String,
    pub part_of_speech: String,
    pub example_sentence: String,
    pub pronunciation: String,
    pub synonyms: String,
    pub antonyms: String,
    pub is_learned: bool,
    pub meaning_options: MeaningOptions,
    pub synonym_options: String,
    pub antonym_options: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WordRecord {
    /// Sets the learned flag. Returns true when the flag actually changed.
    pub fn set_learned(&mut self, learned: bool, now: DateTime<Utc>) -> bool {
        if self.is_learned == learned {
            return false;
        }
        self.is_learned = learned;
        self.updated_at = now;
        true
    }

    /// Flips the learned flag and returns the new value.
    pub fn toggle_learned(&mut self, now: DateTime<Utc>) -> bool {
        self.set_learned(!self.is_learned, now);
        self.is_learned
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

    fn draft() -> WordDraft {
        WordDraft {
            text: "abate".into(),
            meaning: "to lessen".into(),
            part_of_speech: "verb".into(),
            example_sentence: "The storm abated.".into(),
            pronunciation: "/əˈbeɪt/".into(),
            synonyms: "diminish, subside".into(),
            antonyms: "intensify".into(),
            is_learned: false,
            meaning_options: MeaningOptions {
                en: "to lessen|to grow|to hide|to praise".into(),
                ko: "줄어들다|커지다|숨기다|칭찬하다".into(),
                zh: "减轻|增长|隐藏|赞扬".into(),
                ja: "和らぐ|増える|隠す|褒める".into(),
            },
            synonym_options: "diminish|expand|reveal|admire".into(),
            antonym_options: "intensify|reduce|calm|ease".into(),
        }
    }

    #[test]
    fn into_record_stamps_both_timestamps() {
        let now = fixed_now();
        let id = WordId::new_v4();
        let record = draft().into_record(id, now);
        assert_eq!(record.id, id);
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
        assert_eq!(record.text, "abate");
    }

    #[test]
    fn toggle_learned_bumps_updated_at() {
        let now = fixed_now();
        let mut record = draft().into_record(WordId::new_v4(), now);
        let later = now + Duration::minutes(5);

        assert!(record.toggle_learned(later));
        assert_eq!(record.updated_at, later);
        assert!(!record.toggle_learned(later + Duration::minutes(1)));
    }

    #[test]
    fn set_learned_same_value_keeps_timestamp() {
        let now = fixed_now();
        let mut record = draft().into_record(WordId::new_v4(), now);
        assert!(!record.set_learned(false, now + Duration::hours(1)));
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn split_pool_trims_and_keeps_positions() {
        assert_eq!(split_pool(" a | b ||c"), vec!["a", "b", "", "c"]);
    }
}
