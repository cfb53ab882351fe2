use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ClassifierError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub model: ModelConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
    pub environment: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub classifier_path: String,
    pub labels_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// 待分類文章的 CSV 檔路徑
    pub path: String,
    pub text_column: Option<String>,
    pub id_column: Option<String>,
    pub max_records: Option<usize>,
    pub min_chars: Option<usize>,
    pub max_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub filename: Option<String>,
    pub top_k: Option<usize>,
    /// 有被拒絕的輸入時，另外輸出 skipped.json 報告
    pub skipped_report: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// "skip"（預設）或 "fail"
    pub on_prediction_error: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClassifierError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClassifierError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("model.classifier_path", &self.model.classifier_path)?;
        validation::validate_file_extension(
            "model.classifier_path",
            &self.model.classifier_path,
            &["json", "zip"],
        )?;

        if !self.model.classifier_path.ends_with(".zip") {
            let labels_path =
                validation::validate_required_field("model.labels_path", &self.model.labels_path)?;
            validation::validate_file_extension("model.labels_path", labels_path, &["json"])?;
        }

        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_file_extension("input.path", &self.input.path, &["csv", "tsv"])?;
        validation::validate_path("output.path", &self.output.path)?;

        if let Some(text_column) = &self.input.text_column {
            validation::validate_non_empty_string("input.text_column", text_column)?;
        }

        validation::validate_positive_number("input.min_chars", self.min_input_chars(), 1)?;
        validation::validate_range(
            "input.max_chars",
            self.max_input_chars(),
            self.min_input_chars(),
            100_000,
        )?;
        validation::validate_positive_number("output.top_k", self.top_k(), 1)?;

        if let Some(policy) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_prediction_error.as_deref())
        {
            if policy != "skip" && policy != "fail" {
                return Err(ClassifierError::InvalidConfigValueError {
                    field: "error_handling.on_prediction_error".to_string(),
                    value: policy.to_string(),
                    reason: "Valid policies: skip, fail".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn text_column(&self) -> &str {
        self.input.text_column.as_deref().unwrap_or("text")
    }

    pub fn id_column(&self) -> Option<&str> {
        self.input.id_column.as_deref()
    }

    pub fn max_records(&self) -> Option<usize> {
        self.input.max_records
    }

    pub fn output_filename(&self) -> &str {
        self.output.filename.as_deref().unwrap_or("predictions.csv")
    }

    pub fn skipped_report_enabled(&self) -> bool {
        self.output.skipped_report.unwrap_or(true)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// 推論失敗時整批中止，或只跳過該筆
    pub fn fail_on_prediction_error(&self) -> bool {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_prediction_error.as_deref())
            .map(|policy| policy == "fail")
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn classifier_path(&self) -> &str {
        &self.model.classifier_path
    }

    fn labels_path(&self) -> &str {
        self.model.labels_path.as_deref().unwrap_or("")
    }

    fn min_input_chars(&self) -> usize {
        self.input.min_chars.unwrap_or(10)
    }

    fn max_input_chars(&self) -> usize {
        self.input.max_chars.unwrap_or(2000)
    }

    fn top_k(&self) -> usize {
        self.output.top_k.unwrap_or(5)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
