use serde::{Deserialize, Serialize};

use crate::model::ids::WordId;

/// Which attribute of a word a quiz question probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizDimension {
    Meaning,
    Synonym,
    Antonym,
}

impl QuizDimension {
    pub const ALL: [QuizDimension; 3] = [
        QuizDimension::Meaning,
        QuizDimension::Synonym,
        QuizDimension::Antonym,
    ];
}

/// One generated multiple-choice question.
///
/// `correct_answer` is always one of `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub word_id: WordId,
    pub headword: String,
    pub dimension: QuizDimension,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}
