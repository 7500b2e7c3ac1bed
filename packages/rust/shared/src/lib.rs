//! Shared types, error model, and configuration for the competency dataset converter.
//!
//! This crate is the foundation depended on by the other workspace crates.
//! It provides:
//! - [`ConverterError`], the unified error type
//! - Domain types ([`LabelGroup`], [`LabelSelection`], [`Language`], output records)
//! - Configuration ([`AppConfig`], [`ConvertConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ClassificationConfig, ConvertConfig, DatasetConfig, PathsConfig, config_dir,
    config_file_path, init_config, init_config_at, load_config, load_config_from,
    resolve_config_path,
};
pub use error::{ConverterError, Result};
pub use types::{ClassificationRecord, LabelGroup, LabelSelection, Language, TransformationRecord};
