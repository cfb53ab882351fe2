pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "nepali-news-classifier")]
#[command(about = "Interactive Nepali news category prediction demo")]
pub struct CliConfig {
    /// 訓練好的分類器檔案（.json，或內含 classifier.json/labels.json 的 .zip bundle）
    #[arg(long, default_value = "model/classifier.json")]
    pub classifier_path: String,

    /// 類別標籤解碼檔（classifier_path 為 .zip bundle 時不使用）
    #[arg(long, default_value = "model/labels.json")]
    pub labels_path: String,

    /// Minimum accepted input length in characters (after trimming)
    #[arg(long, default_value = "10")]
    pub min_input_chars: usize,

    /// Maximum input length in characters; longer input is truncated at the prompt
    #[arg(long, default_value = "2000")]
    pub max_input_chars: usize,

    /// How many categories to show in the confidence table
    #[arg(long, default_value = "5")]
    pub top_k: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage while the session runs")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn classifier_path(&self) -> &str {
        &self.classifier_path
    }

    fn labels_path(&self) -> &str {
        &self.labels_path
    }

    fn min_input_chars(&self) -> usize {
        self.min_input_chars
    }

    fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    fn top_k(&self) -> usize {
        self.top_k
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("classifier_path", &self.classifier_path)?;
        validation::validate_file_extension("classifier_path", &self.classifier_path, &["json", "zip"])?;

        if !self.classifier_path.ends_with(".zip") {
            validation::validate_path("labels_path", &self.labels_path)?;
            validation::validate_file_extension("labels_path", &self.labels_path, &["json"])?;
        }

        validation::validate_positive_number("min_input_chars", self.min_input_chars, 1)?;
        validation::validate_range(
            "max_input_chars",
            self.max_input_chars,
            self.min_input_chars,
            100_000,
        )?;
        validation::validate_positive_number("top_k", self.top_k, 1)?;

        Ok(())
    }
}
