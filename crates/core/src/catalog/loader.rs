use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, warn};

use super::row::RowParser;
use crate::model::{MeaningOptions, WordDraft};

/// Number of columns in a catalog row.
pub const CATALOG_FIELD_COUNT: usize = 14;

/// Word list shipped with the crate.
const BUNDLED_CATALOG: &str = include_str!("../../data/words.csv");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//
// ─── SOURCE ────────────────────────────────────────────────────────────────────
//

/// Where catalog text comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    #[default]
    Bundled,
    File(PathBuf),
    Text(String),
}

impl CatalogSource {
    /// Read the raw catalog text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for a missing file and
    /// `CatalogError::Io` for any other read failure.
    pub fn read(&self) -> Result<String, CatalogError> {
        match self {
            CatalogSource::Bundled => Ok(BUNDLED_CATALOG.to_string()),
            CatalogSource::Text(text) => Ok(text.clone()),
            CatalogSource::File(path) => read_file(path),
        }
    }
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CatalogError::NotFound(path.to_path_buf())
        } else {
            CatalogError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

//
// ─── LOADING ───────────────────────────────────────────────────────────────────
//

/// A data row that was dropped because it had too few fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source, header included.
    pub line_number: usize,
    pub field_count: usize,
    pub line: String,
}

/// Outcome of parsing a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLoad {
    pub words: Vec<WordDraft>,
    pub skipped: Vec<SkippedRow>,
}

/// Read and parse a catalog from `source`.
///
/// # Errors
///
/// Returns `CatalogError` if the source cannot be read. Malformed rows are
/// not errors; they are listed in `CatalogLoad::skipped`.
pub fn load_catalog(source: &CatalogSource) -> Result<CatalogLoad, CatalogError> {
    let text = source.read().inspect_err(|err| {
        error!(error = %err, "catalog source unavailable");
    })?;
    Ok(parse_catalog(&text))
}

/// Parse catalog text. The first line is a header and is ignored.
#[must_use]
pub fn parse_catalog(text: &str) -> CatalogLoad {
    let parser = RowParser::default();
    let mut load = CatalogLoad::default();

    for (idx, raw) in text.lines().enumerate().skip(1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let fields = parser.parse(line);
        match word_from_fields(fields) {
            Ok(word) => load.words.push(word),
            Err(field_count) => {
                warn!(
                    line_number = idx + 1,
                    field_count,
                    expected = CATALOG_FIELD_COUNT,
                    line,
                    "skipping malformed catalog row"
                );
                load.skipped.push(SkippedRow {
                    line_number: idx + 1,
                    field_count,
                    line: line.to_string(),
                });
            }
        }
    }

    debug!(
        words = load.words.len(),
        skipped = load.skipped.len(),
        "catalog parsed"
    );
    load
}

// Returns the actual field count when the row is too short.
fn word_from_fields(fields: Vec<String>) -> Result<WordDraft, usize> {
    if fields.len() < CATALOG_FIELD_COUNT {
        return Err(fields.len());
    }

    let mut it = fields.into_iter();
    let mut next = || it.next().unwrap_or_default();

    let text = next();
    let meaning = next();
    let part_of_speech = next();
    let example_sentence = next();
    let pronunciation = next();
    let synonyms = next();
    let antonyms = next();
    let is_learned = next().eq_ignore_ascii_case("true");
    let meaning_options = MeaningOptions {
        en: next(),
        ko: next(),
        zh: next(),
        ja: next(),
    };
    let synonym_options = next();
    let antonym_options = next();

    Ok(WordDraft {
        text,
        meaning,
        part_of_speech,
        example_sentence,
        pronunciation,
        synonyms,
        antonyms,
        is_learned,
        meaning_options,
        synonym_options,
        antonym_options,
    })
}
