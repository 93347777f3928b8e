use rand::Rng;
use wordy_core::model::{QuizDimension, QuizQuestion, Settings, WordRecord};

use super::options::build_option_set;
use crate::error::QuizError;

/// Number of words sampled into one quiz.
pub const QUIZ_SIZE: usize = 3;

/// Where a quiz is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuizState {
    #[default]
    NotStarted,
    InProgress {
        index: usize,
        pending: Option<String>,
    },
    Completed,
}

/// A fixed-size multiple-choice quiz over a handful of words.
///
/// Each question earns at most one point. Selecting again on the same
/// question replaces the earlier choice, and the latest choice decides
/// whether the point is held.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    questions: Vec<QuizQuestion>,
    credited: Vec<bool>,
    state: QuizState,
}

impl QuizEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new quiz from the first `QUIZ_SIZE` words, replacing any
    /// previous one.
    ///
    /// An empty `words` slice yields a completed quiz with no questions.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        words: &[WordRecord],
        settings: &Settings,
        rng: &mut R,
    ) {
        let sample: Vec<&WordRecord> = words.iter().take(QUIZ_SIZE).collect();
        let language = settings.language();

        self.questions = sample
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let dimension = QuizDimension::ALL[rng.random_range(0..QuizDimension::ALL.len())];
                let siblings: Vec<&WordRecord> = sample
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, w)| *w)
                    .collect();
                let set = build_option_set(word, &siblings, dimension, language, &mut *rng);
                QuizQuestion {
                    word_id: word.id,
                    headword: word.text.clone(),
                    dimension,
                    options: set.options,
                    correct_answer: set.correct_answer,
                }
            })
            .collect();

        self.credited = vec![false; self.questions.len()];
        self.state = if self.questions.is_empty() {
            QuizState::Completed
        } else {
            QuizState::InProgress {
                index: 0,
                pending: None,
            }
        };
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match &self.state {
            QuizState::InProgress { index, .. } => self.questions.get(*index),
            _ => None,
        }
    }

    /// The selection made on the current question, if any.
    #[must_use]
    pub fn pending_answer(&self) -> Option<&str> {
        match &self.state {
            QuizState::InProgress { pending, .. } => pending.as_deref(),
            _ => None,
        }
    }

    /// Record `answer` for the current question and return whether it is
    /// correct.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` before generation or after the
    /// last question.
    pub fn select_answer(&mut self, answer: &str) -> Result<bool, QuizError> {
        let QuizState::InProgress { index, pending } = &mut self.state else {
            return Err(QuizError::NotInProgress);
        };
        let question = self.questions.get(*index).ok_or(QuizError::NotInProgress)?;

        let correct = question.is_correct(answer);
        *pending = Some(answer.to_string());
        if let Some(credit) = self.credited.get_mut(*index) {
            *credit = correct;
        }
        Ok(correct)
    }

    /// Move to the next question, or complete the quiz after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` if the quiz is not running.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        let QuizState::InProgress { index, .. } = self.state else {
            return Err(QuizError::NotInProgress);
        };

        self.state = if index + 1 < self.questions.len() {
            QuizState::InProgress {
                index: index + 1,
                pending: None,
            }
        } else {
            QuizState::Completed
        };
        Ok(())
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.credited.iter().filter(|c| **c).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Completed
    }

    /// Fraction of the quiz reached, counting the current question.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.questions.len();
        if total == 0 {
            return 0.0;
        }
        let reached = match self.state {
            QuizState::NotStarted => return 0.0,
            QuizState::InProgress { index, .. } => index + 1,
            QuizState::Completed => total,
        };
        reached as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wordy_core::model::{MeaningOptions, WordDraft, WordId};
    use wordy_core::time::fixed_now;

    fn word(text: &str) -> WordRecord {
        WordDraft {
            text: text.into(),
            meaning: format!("{text} meaning"),
            part_of_speech: "noun".into(),
            example_sentence: String::new(),
            pronunciation: String::new(),
            synonyms: String::new(),
            antonyms: String::new(),
            is_learned: false,
            meaning_options: MeaningOptions {
                en: format!("{text}-en|e1|e2|e3"),
                ko: format!("{text}-ko|k1|k2|k3"),
                zh: format!("{text}-zh|z1|z2|z3"),
                ja: format!("{text}-ja|j1|j2|j3"),
            },
            synonym_options: format!("{text}-syn|s1|s2|s3"),
            antonym_options: format!("{text}-ant|a1|a2|a3"),
        }
        .into_record(WordId::new_v4(), fixed_now())
    }

    fn started(count: usize, seed: u64) -> QuizEngine {
        let words: Vec<WordRecord> = (0..count).map(|i| word(&format!("w{i}"))).collect();
        let settings = Settings::with_defaults(fixed_now());
        let mut engine = QuizEngine::new();
        engine.generate(&words, &settings, &mut StdRng::seed_from_u64(seed));
        engine
    }

    #[test]
    fn new_engine_has_not_started() {
        let mut engine = QuizEngine::new();
        assert_eq!(engine.state(), &QuizState::NotStarted);
        assert_eq!(engine.progress(), 0.0);
        assert_eq!(engine.select_answer("x"), Err(QuizError::NotInProgress));
        assert_eq!(engine.advance(), Err(QuizError::NotInProgress));
    }

    #[test]
    fn takes_first_three_words_in_order() {
        let engine = started(5, 1);
        let headwords: Vec<&str> = engine.questions().iter().map(|q| q.headword.as_str()).collect();
        assert_eq!(headwords, vec!["w0", "w1", "w2"]);
        for q in engine.questions() {
            assert_eq!(q.options.len(), 4);
            assert!(q.options.contains(&q.correct_answer));
        }
    }

    #[test]
    fn empty_input_completes_immediately() {
        let engine = started(0, 1);
        assert!(engine.is_complete());
        assert!(engine.questions().is_empty());
        assert_eq!(engine.progress(), 0.0);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn all_correct_scores_every_question() {
        let mut engine = started(3, 4);
        while let Some(q) = engine.current_question() {
            let answer = q.correct_answer.clone();
            assert!(engine.select_answer(&answer).unwrap());
            engine.advance().unwrap();
        }
        assert!(engine.is_complete());
        assert_eq!(engine.score(), 3);
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn all_wrong_scores_zero() {
        let mut engine = started(3, 5);
        while engine.current_question().is_some() {
            assert!(!engine.select_answer("definitely not an option").unwrap());
            engine.advance().unwrap();
        }
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn reselecting_is_scored_once_by_latest_choice() {
        let mut engine = started(3, 6);
        let correct = engine.current_question().unwrap().correct_answer.clone();

        engine.select_answer(&correct).unwrap();
        engine.select_answer(&correct).unwrap();
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.pending_answer(), Some(correct.as_str()));

        engine.select_answer("wrong").unwrap();
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn advance_clears_pending_and_reports_progress() {
        let mut engine = started(2, 8);
        assert!((engine.progress() - 0.5).abs() < f64::EPSILON);

        engine.select_answer("x").unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.pending_answer(), None);
        assert!((engine.progress() - 1.0).abs() < f64::EPSILON);

        engine.advance().unwrap();
        assert!(engine.is_complete());
        assert_eq!(engine.advance(), Err(QuizError::NotInProgress));
    }

    #[test]
    fn same_seed_generates_same_quiz() {
        let words: Vec<WordRecord> = (0..3).map(|i| word(&format!("w{i}"))).collect();
        let settings = Settings::with_defaults(fixed_now());
        let mut a = QuizEngine::new();
        let mut b = QuizEngine::new();
        a.generate(&words, &settings, &mut StdRng::seed_from_u64(99));
        b.generate(&words, &settings, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.questions(), b.questions());
    }
}
