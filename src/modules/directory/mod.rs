// Directory (lookup) module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DirectoryEntry, DirectoryKind};
pub use repositories::DirectoryRepository;
pub use services::DirectoryService;
