#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod home_service;
pub mod quiz;
pub mod seed_service;
pub mod settings_service;
pub mod word_service;

pub use wordy_core::Clock;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, HomeServiceError, QuizError, QuizServiceError, SettingsServiceError,
    WordServiceError,
};
pub use home_service::HomeService;
pub use quiz::{QuizEngine, QuizService, QuizState};
pub use seed_service::{SeedReport, SeedService, SeedStep};
pub use settings_service::SettingsService;
pub use word_service::WordService;
