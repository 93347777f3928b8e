use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;
use storage::repository::{SettingsRepository, StudyGroupRepository, WordRepository};
use tracing::{error, info};
use wordy_core::catalog::{CatalogSource, load_catalog};
use wordy_core::model::{Settings, StudyGroup, StudyGroupId, WordId, WordRecord};

use crate::Clock;

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Outcome of one seeding step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeedStep {
    /// The collection already held `existing` records.
    Skipped { existing: usize },
    Inserted { count: usize },
    Failed { reason: String },
}

impl SeedStep {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, SeedStep::Failed { .. })
    }
}

/// Per-collection results of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub words: SeedStep,
    pub settings: SeedStep,
    pub study_groups: SeedStep,
}

impl SeedReport {
    /// True when no step failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !(self.words.is_failed() || self.settings.is_failed() || self.study_groups.is_failed())
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Fills an empty store with the catalog, default settings and a first study
/// group. Each collection is checked and seeded on its own, so a failure in
/// one step leaves the others unaffected.
///
/// The emptiness check and the insert are separate calls. Two runs racing on
/// the same empty store can both insert.
#[derive(Clone)]
pub struct SeedService {
    clock: Clock,
    catalog: CatalogSource,
    words: Arc<dyn WordRepository>,
    study_groups: Arc<dyn StudyGroupRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl SeedService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: CatalogSource,
        words: Arc<dyn WordRepository>,
        study_groups: Arc<dyn StudyGroupRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            words,
            study_groups,
            settings,
        }
    }

    /// Run every step in order: words, settings, study groups.
    pub async fn seed(&self) -> SeedReport {
        SeedReport {
            words: self.seed_words().await,
            settings: self.seed_settings().await,
            study_groups: self.seed_study_groups().await,
        }
    }

    pub async fn seed_words(&self) -> SeedStep {
        let existing = match self.words.list_words().await {
            Ok(words) => words.len(),
            Err(err) => return failed("words", "fetch existing words", err),
        };
        if existing > 0 {
            info!(existing, "words already seeded");
            return SeedStep::Skipped { existing };
        }

        let load = match load_catalog(&self.catalog) {
            Ok(load) => load,
            Err(err) => return failed("words", "load catalog", err),
        };

        let now = self.clock.now();
        let records: Vec<WordRecord> = load
            .words
            .into_iter()
            .map(|draft| draft.into_record(WordId::new_v4(), now))
            .collect();

        match self.words.insert_words(&records).await {
            Ok(()) => {
                info!(
                    count = records.len(),
                    skipped_rows = load.skipped.len(),
                    "seeded words from catalog"
                );
                SeedStep::Inserted {
                    count: records.len(),
                }
            }
            Err(err) => failed("words", "insert words", err),
        }
    }

    pub async fn seed_settings(&self) -> SeedStep {
        match self.settings.get_settings().await {
            Ok(Some(_)) => {
                info!("settings already seeded");
                return SeedStep::Skipped { existing: 1 };
            }
            Ok(None) => {}
            Err(err) => return failed("settings", "fetch settings", err),
        }

        let defaults = Settings::with_defaults(self.clock.now());
        match self.settings.save_settings(&defaults).await {
            Ok(()) => {
                info!(
                    daily_word_limit = defaults.daily_word_limit(),
                    learning_language = defaults.learning_language(),
                    "seeded default settings"
                );
                SeedStep::Inserted { count: 1 }
            }
            Err(err) => failed("settings", "save settings", err),
        }
    }

    pub async fn seed_study_groups(&self) -> SeedStep {
        let existing = match self.study_groups.list_study_groups().await {
            Ok(groups) => groups.len(),
            Err(err) => return failed("study_groups", "fetch study groups", err),
        };
        if existing > 0 {
            info!(existing, "study groups already seeded");
            return SeedStep::Skipped { existing };
        }

        let now = self.clock.now();
        let group = StudyGroup::new(StudyGroupId::new_v4(), now, now);
        match self.study_groups.insert_study_group(&group).await {
            Ok(()) => {
                info!(group_id = %group.id(), "seeded first study group");
                SeedStep::Inserted { count: 1 }
            }
            Err(err) => failed("study_groups", "insert study group", err),
        }
    }
}

fn failed(collection: &'static str, action: &'static str, err: impl Display) -> SeedStep {
    error!(collection, action, error = %err, "seeding step failed");
    SeedStep::Failed {
        reason: format!("{action}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;
    use wordy_core::time::fixed_clock;

    fn service(storage: &Storage, catalog: CatalogSource) -> SeedService {
        SeedService::new(
            fixed_clock(),
            catalog,
            Arc::clone(&storage.words),
            Arc::clone(&storage.study_groups),
            Arc::clone(&storage.settings),
        )
    }

    #[tokio::test]
    async fn first_run_inserts_everything() {
        let storage = Storage::in_memory();
        let report = service(&storage, CatalogSource::Bundled).seed().await;

        assert!(report.is_clean());
        assert!(matches!(report.words, SeedStep::Inserted { count } if count >= 10));
        assert_eq!(report.settings, SeedStep::Inserted { count: 1 });
        assert_eq!(report.study_groups, SeedStep::Inserted { count: 1 });

        let groups = storage.study_groups.list_study_groups().await.unwrap();
        assert!(groups[0].words().is_empty());
        assert_eq!(groups[0].study_date(), fixed_clock().now());
    }

    #[tokio::test]
    async fn missing_catalog_fails_only_the_word_step() {
        let storage = Storage::in_memory();
        let catalog = CatalogSource::File("/no/such/catalog.csv".into());
        let report = service(&storage, catalog).seed().await;

        assert!(!report.is_clean());
        assert!(report.words.is_failed());
        assert_eq!(report.settings, SeedStep::Inserted { count: 1 });
        assert_eq!(report.study_groups, SeedStep::Inserted { count: 1 });
        assert!(storage.words.list_words().await.unwrap().is_empty());
    }

    #[test]
    fn report_serializes_with_outcome_tag() {
        let step = SeedStep::Skipped { existing: 3 };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "skipped", "existing": 3 }));
    }
}
