mod ids;
mod quiz;
mod settings;
mod study_group;
mod word;

pub use ids::{ParseIdError, StudyGroupId, WordId};

pub use quiz::{QuizDimension, QuizQuestion};
pub use settings::{
    DEFAULT_DAILY_WORD_LIMIT, DEFAULT_LEARNING_LANGUAGE, Language, Settings, SettingsDraft,
    SettingsError,
};
pub use study_group::{ReviewSlot, StudyGroup};
pub use word::{MeaningOptions, OPTION_SEPARATOR, WordDraft, WordRecord, split_pool};
