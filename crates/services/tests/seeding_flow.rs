use std::sync::Arc;

use async_trait::async_trait;
use services::{AppServices, Clock, SeedService, SeedStep};
use storage::repository::{InMemoryRepository, Storage, StorageError, WordRepository};
use wordy_core::catalog::CatalogSource;
use wordy_core::model::{WordId, WordRecord};
use wordy_core::time::fixed_now;

/// Word store that refuses every call.
struct BrokenWords;

#[async_trait]
impl WordRepository for BrokenWords {
    async fn insert_words(&self, _words: &[WordRecord]) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk on fire".into()))
    }

    async fn list_words(&self) -> Result<Vec<WordRecord>, StorageError> {
        Err(StorageError::Connection("disk on fire".into()))
    }

    async fn get_word(&self, _id: WordId) -> Result<Option<WordRecord>, StorageError> {
        Err(StorageError::Connection("disk on fire".into()))
    }

    async fn save_word(&self, _word: &WordRecord) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk on fire".into()))
    }
}

fn seeder(storage: &Storage) -> SeedService {
    SeedService::new(
        Clock::fixed(fixed_now()),
        CatalogSource::Bundled,
        Arc::clone(&storage.words),
        Arc::clone(&storage.study_groups),
        Arc::clone(&storage.settings),
    )
}

#[tokio::test]
async fn seeding_twice_matches_seeding_once() {
    let storage = Storage::in_memory();
    let first = seeder(&storage).seed().await;
    let word_count = storage.words.list_words().await.unwrap().len();
    assert!(first.is_clean());
    assert_eq!(first.words, SeedStep::Inserted { count: word_count });

    let second = seeder(&storage).seed().await;
    assert_eq!(second.words, SeedStep::Skipped { existing: word_count });
    assert_eq!(second.settings, SeedStep::Skipped { existing: 1 });
    assert_eq!(second.study_groups, SeedStep::Skipped { existing: 1 });

    assert_eq!(storage.words.list_words().await.unwrap().len(), word_count);
    assert_eq!(storage.study_groups.list_study_groups().await.unwrap().len(), 1);
}

#[tokio::test]
async fn broken_word_store_does_not_block_other_steps() {
    let repo = InMemoryRepository::new();
    let storage = Storage {
        words: Arc::new(BrokenWords),
        study_groups: Arc::new(repo.clone()),
        settings: Arc::new(repo),
    };

    let report = seeder(&storage).seed().await;
    assert!(!report.is_clean());
    assert!(matches!(&report.words, SeedStep::Failed { reason } if reason.contains("disk on fire")));
    assert_eq!(report.settings, SeedStep::Inserted { count: 1 });
    assert_eq!(report.study_groups, SeedStep::Inserted { count: 1 });
}

#[tokio::test]
async fn app_services_seed_sqlite_on_startup() {
    let url = "sqlite:file:memdb_app_services_seed?mode=memory&cache=shared";
    let clock = Clock::fixed(fixed_now());

    let services = AppServices::new_sqlite(url, clock, CatalogSource::Bundled)
        .await
        .expect("bootstrap");
    assert!(services.seed_report().is_clean());
    assert!(matches!(services.seed_report().words, SeedStep::Inserted { .. }));

    let again = AppServices::new_sqlite(url, clock, CatalogSource::Bundled)
        .await
        .expect("bootstrap again");
    assert!(matches!(again.seed_report().words, SeedStep::Skipped { .. }));

    let overview = again.home().overview().await.unwrap();
    assert_eq!(overview.total_progress_percentage, 0);
    // The seeded group is dated today and holds no words.
    assert_eq!(overview.ranked_study_groups.len(), 1);
}
