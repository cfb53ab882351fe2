use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to load artifact '{path}': {reason}")]
    ArtifactLoadError { path: String, reason: String },

    #[error("Input rejected: {reason}")]
    EmptyInputError { reason: String },

    #[error("Prediction failed: {reason}")]
    PredictionError { reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Artifact,
    Prediction,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 輸入驗證警告，重新輸入即可
    Low,
    /// 單次推論失敗，可換一段文字重試
    Medium,
    /// 配置或資料處理錯誤
    High,
    /// 模型載入失敗，本次會話無法繼續
    Critical,
}

impl ClassifierError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClassifierError::EmptyInputError { .. } => ErrorCategory::Input,
            ClassifierError::ArtifactLoadError { .. } => ErrorCategory::Artifact,
            ClassifierError::PredictionError { .. } => ErrorCategory::Prediction,
            ClassifierError::ConfigError { .. }
            | ClassifierError::InvalidConfigValueError { .. }
            | ClassifierError::MissingConfigError { .. } => ErrorCategory::Config,
            ClassifierError::IoError(_)
            | ClassifierError::SerializationError(_)
            | ClassifierError::ZipError(_)
            | ClassifierError::CsvError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClassifierError::EmptyInputError { .. } => ErrorSeverity::Low,
            ClassifierError::PredictionError { .. } => ErrorSeverity::Medium,
            ClassifierError::ConfigError { .. }
            | ClassifierError::InvalidConfigValueError { .. }
            | ClassifierError::MissingConfigError { .. }
            | ClassifierError::CsvError(_) => ErrorSeverity::High,
            ClassifierError::ArtifactLoadError { .. }
            | ClassifierError::IoError(_)
            | ClassifierError::SerializationError(_)
            | ClassifierError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ClassifierError::EmptyInputError { .. } => {
                "Paste a longer piece of news text (at least a full sentence) and try again"
                    .to_string()
            }
            ClassifierError::PredictionError { .. } => {
                "Try again with a different piece of text".to_string()
            }
            ClassifierError::ArtifactLoadError { path, .. } => format!(
                "Check that '{}' exists and was exported by a compatible trainer version",
                path
            ),
            ClassifierError::ConfigError { .. }
            | ClassifierError::InvalidConfigValueError { .. }
            | ClassifierError::MissingConfigError { .. } => {
                "Fix the configuration value and re-run".to_string()
            }
            ClassifierError::CsvError(_) => {
                "Check the input CSV file format and column names".to_string()
            }
            ClassifierError::IoError(_)
            | ClassifierError::SerializationError(_)
            | ClassifierError::ZipError(_) => {
                "Check file paths and permissions, then re-run".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClassifierError::EmptyInputError { reason } => format!("Input not accepted: {}", reason),
            ClassifierError::PredictionError { reason } => {
                format!("Could not classify this text: {}", reason)
            }
            ClassifierError::ArtifactLoadError { path, reason } => {
                format!("Could not load the trained model from '{}': {}", path, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
