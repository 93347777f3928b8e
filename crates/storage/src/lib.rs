#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, SettingsRepository, Storage, StorageError, StudyGroupRepository,
    WordRepository,
};
