// Adapters - External system implementations

pub mod catalog;
pub mod headless_media;
pub mod json_store;
pub mod memory_store;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use catalog::{CatalogAdapter, CatalogEntry};
pub use headless_media::HeadlessMediaElement;
pub use json_store::{JsonStoreAdapter, StoredTrim};
pub use memory_store::MemoryStoreAdapter;
pub use toml_config::{EditorConfig, LoggingConfig, TomlConfigAdapter};
pub use tracing_log::init_tracing;
