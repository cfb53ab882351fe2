pub mod classifier;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::cli::LocalFileStore;
pub use crate::config::toml_config::TomlConfig;

pub use crate::classifier::{ArtifactLoader, NbTextClassifier};
pub use crate::core::{engine::BatchEngine, pipeline::BatchPipeline, service::PredictionService};
pub use crate::utils::error::{ClassifierError, Result};
