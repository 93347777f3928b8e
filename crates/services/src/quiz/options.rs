//! Answer option assembly for quiz questions.

use rand::Rng;
use rand::seq::SliceRandom;
use wordy_core::model::{Language, QuizDimension, WordRecord, split_pool};

/// Options shown per question when enough distinct tokens exist.
pub const OPTIONS_PER_QUESTION: usize = 4;

type PoolSelector = fn(&WordRecord) -> &str;

fn english_pool(word: &WordRecord) -> &str {
    &word.meaning_options.en
}

fn korean_pool(word: &WordRecord) -> &str {
    &word.meaning_options.ko
}

fn chinese_pool(word: &WordRecord) -> &str {
    &word.meaning_options.zh
}

fn japanese_pool(word: &WordRecord) -> &str {
    &word.meaning_options.ja
}

// Meaning pools by learning language.
const MEANING_POOLS: [(Language, PoolSelector); 4] = [
    (Language::English, english_pool),
    (Language::Korean, korean_pool),
    (Language::Chinese, chinese_pool),
    (Language::Japanese, japanese_pool),
];

fn synonym_pool(word: &WordRecord) -> &str {
    &word.synonym_options
}

fn antonym_pool(word: &WordRecord) -> &str {
    &word.antonym_options
}

/// Picks the raw option pool for `dimension`.
///
/// Meaning questions follow the learning language; synonym and antonym pools
/// exist in English only.
#[must_use]
pub fn pool_selector(dimension: QuizDimension, language: Language) -> PoolSelector {
    match dimension {
        QuizDimension::Meaning => MEANING_POOLS
            .iter()
            .find(|(lang, _)| *lang == language)
            .map_or(english_pool as PoolSelector, |(_, select)| *select),
        QuizDimension::Synonym => synonym_pool,
        QuizDimension::Antonym => antonym_pool,
    }
}

/// Correct answer and presentation options for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub correct_answer: String,
    pub options: Vec<String>,
}

/// Builds the option set for `word` on `dimension`.
///
/// The first token of the word's own pool is the correct answer. Own tokens
/// are deduplicated and capped, then topped up from `siblings` in order, then
/// the correct answer is forced in if it went missing, then the order is
/// shuffled.
pub fn build_option_set<R: Rng + ?Sized>(
    word: &WordRecord,
    siblings: &[&WordRecord],
    dimension: QuizDimension,
    language: Language,
    rng: &mut R,
) -> OptionSet {
    let select = pool_selector(dimension, language);
    let own = split_pool(select(word));
    let correct_answer = own.first().copied().unwrap_or_default().to_string();

    let mut options: Vec<String> = Vec::with_capacity(OPTIONS_PER_QUESTION);
    for token in own {
        if options.len() == OPTIONS_PER_QUESTION {
            break;
        }
        push_distinct(&mut options, token);
    }

    'backfill: for sibling in siblings {
        for token in split_pool(select(sibling)) {
            if options.len() == OPTIONS_PER_QUESTION {
                break 'backfill;
            }
            push_distinct(&mut options, token);
        }
    }

    if !options.contains(&correct_answer) {
        match options.first_mut() {
            Some(first) => *first = correct_answer.clone(),
            None => options.push(correct_answer.clone()),
        }
    }

    options.shuffle(rng);
    OptionSet {
        correct_answer,
        options,
    }
}

fn push_distinct(options: &mut Vec<String>, token: &str) {
    if !token.is_empty() && !options.iter().any(|o| o == token) {
        options.push(token.to_string());
    }
}
