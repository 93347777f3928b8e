use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DAILY_WORD_LIMIT: u32 = 30;
pub const DEFAULT_LEARNING_LANGUAGE: &str = "en";

//
// ─── LANGUAGE ──────────────────────────────────────────────────────────────────
//

/// A language with its own meaning-quiz option pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Korean,
    Chinese,
    Japanese,
}

// Supported learning-language codes. Adding a language means one row here and
// one pool in `MeaningOptions`.
const LANGUAGE_CODES: [(&str, Language); 4] = [
    ("en", Language::English),
    ("ko", Language::Korean),
    ("zh", Language::Chinese),
    ("ja", Language::Japanese),
];

impl Language {
    /// Looks up a language by its code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        LANGUAGE_CODES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(code))
            .map(|(_, language)| *language)
    }

    /// Like `from_code`, but unknown codes fall back to English.
    #[must_use]
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Language::English)
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        LANGUAGE_CODES
            .iter()
            .find(|(_, language)| *language == self)
            .map_or(DEFAULT_LEARNING_LANGUAGE, |(code, _)| *code)
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("daily word limit must be > 0")]
    InvalidDailyWordLimit,

    #[error("unsupported learning language: {0}")]
    UnsupportedLanguage(String),
}

/// The single learner settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    daily_word_limit: u32,
    learning_language: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Settings {
    /// Defaults used when the store has no settings yet.
    #[must_use]
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            daily_word_limit: DEFAULT_DAILY_WORD_LIMIT,
            learning_language: DEFAULT_LEARNING_LANGUAGE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate settings from storage.
    ///
    /// Unlike `SettingsDraft::apply`, an unknown language code is kept as
    /// stored; quiz generation falls back to English for it.
    #[must_use]
    pub fn from_persisted(
        daily_word_limit: u32,
        learning_language: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            daily_word_limit,
            learning_language,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn daily_word_limit(&self) -> u32 {
        self.daily_word_limit
    }

    /// The raw language code as stored.
    #[must_use]
    pub fn learning_language(&self) -> &str {
        &self.learning_language
    }

    #[must_use]
    pub fn language(&self) -> Language {
        Language::from_code_or_default(&self.learning_language)
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Clone, Debug, Default)]
pub struct SettingsDraft {
    pub daily_word_limit: Option<u32>,
    pub learning_language: Option<String>,
}

impl SettingsDraft {
    /// Apply the draft on top of `current`, validating the changed fields.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the limit is zero or the language code is
    /// not supported.
    pub fn apply(self, current: &Settings, now: DateTime<Utc>) -> Result<Settings, SettingsError> {
        let daily_word_limit = self.daily_word_limit.unwrap_or(current.daily_word_limit);
        if daily_word_limit == 0 {
            return Err(SettingsError::InvalidDailyWordLimit);
        }

        let learning_language = match self.learning_language {
            Some(code) => Language::from_code(&code)
                .ok_or(SettingsError::UnsupportedLanguage(code))?
                .code()
                .to_string(),
            None => current.learning_language.clone(),
        };

        Ok(Settings {
            daily_word_limit,
            learning_language,
            created_at: current.created_at,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn defaults_match_first_run_values() {
        let settings = Settings::with_defaults(fixed_now());
        assert_eq!(settings.daily_word_limit(), 30);
        assert_eq!(settings.learning_language(), "en");
        assert_eq!(settings.language(), Language::English);
    }

    #[test]
    fn language_lookup_is_case_insensitive() {
        assert_eq!(Language::from_code("KO"), Some(Language::Korean));
        assert_eq!(Language::from_code(" ja "), Some(Language::Japanese));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::Chinese.code(), "zh");
    }

    #[test]
    fn unknown_persisted_language_falls_back_to_english() {
        let now = fixed_now();
        let settings = Settings::from_persisted(10, "fr".into(), now, now);
        assert_eq!(settings.learning_language(), "fr");
        assert_eq!(settings.language(), Language::English);
    }

    #[test]
    fn draft_normalizes_language_code() {
        let now = fixed_now();
        let current = Settings::with_defaults(now);
        let later = now + Duration::minutes(1);
        let updated = SettingsDraft {
            daily_word_limit: Some(15),
            learning_language: Some("Zh".into()),
        }
        .apply(&current, later)
        .unwrap();

        assert_eq!(updated.daily_word_limit(), 15);
        assert_eq!(updated.learning_language(), "zh");
        assert_eq!(updated.created_at(), now);
        assert_eq!(updated.updated_at(), later);
    }

    #[test]
    fn draft_rejects_zero_limit_and_unknown_language() {
        let current = Settings::with_defaults(fixed_now());
        let err = SettingsDraft {
            daily_word_limit: Some(0),
            learning_language: None,
        }
        .apply(&current, fixed_now())
        .unwrap_err();
        assert_eq!(err, SettingsError::InvalidDailyWordLimit);

        let err = SettingsDraft {
            daily_word_limit: None,
            learning_language: Some("xx".into()),
        }
        .apply(&current, fixed_now())
        .unwrap_err();
        assert_eq!(err, SettingsError::UnsupportedLanguage("xx".into()));
    }
}
