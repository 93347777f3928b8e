use std::sync::Arc;

use storage::repository::Storage;
use wordy_core::catalog::CatalogSource;

use crate::Clock;
use crate::error::AppServicesError;
use crate::home_service::HomeService;
use crate::quiz::QuizService;
use crate::seed_service::{SeedReport, SeedService};
use crate::settings_service::SettingsService;
use crate::word_service::WordService;

/// Assembles app-facing services over one store and seeds it on startup.
#[derive(Clone)]
pub struct AppServices {
    seed_report: SeedReport,
    home: Arc<HomeService>,
    words: Arc<WordService>,
    settings: Arc<SettingsService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails. Seeding
    /// failures are reported through `seed_report`, not as errors.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: CatalogSource,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, catalog).await)
    }

    /// Build services over an existing store.
    pub async fn from_storage(storage: &Storage, clock: Clock, catalog: CatalogSource) -> Self {
        let seeder = SeedService::new(
            clock,
            catalog,
            Arc::clone(&storage.words),
            Arc::clone(&storage.study_groups),
            Arc::clone(&storage.settings),
        );
        let seed_report = seeder.seed().await;

        let home = Arc::new(HomeService::new(
            clock,
            Arc::clone(&storage.words),
            Arc::clone(&storage.study_groups),
        ));
        let words = Arc::new(WordService::new(clock, Arc::clone(&storage.words)));
        let settings = Arc::new(SettingsService::new(clock, Arc::clone(&storage.settings)));
        let quiz = Arc::new(QuizService::new(
            clock,
            Arc::clone(&storage.words),
            Arc::clone(&storage.study_groups),
            Arc::clone(&storage.settings),
        ));

        Self {
            seed_report,
            home,
            words,
            settings,
            quiz,
        }
    }

    /// Result of the seeding run performed at startup.
    #[must_use]
    pub fn seed_report(&self) -> &SeedReport {
        &self.seed_report
    }

    #[must_use]
    pub fn home(&self) -> Arc<HomeService> {
        Arc::clone(&self.home)
    }

    #[must_use]
    pub fn words(&self) -> Arc<WordService> {
        Arc::clone(&self.words)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
