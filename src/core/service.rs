use crate::domain::model::Prediction;
use crate::domain::ports::TextClassifier;
use crate::utils::error::{ClassifierError, Result};

/// 預設最短輸入長度（trim 後的字元數）
pub const DEFAULT_MIN_INPUT_CHARS: usize = 10;
/// 預設最長輸入長度，超過的部分由邊界截斷，不由 service 處理
pub const DEFAULT_MAX_INPUT_CHARS: usize = 2000;

/// Stateless request/response classification over an immutable loaded classifier.
/// Input validation failures never reach the classifier.
pub struct PredictionService<C: TextClassifier> {
    classifier: C,
    min_input_chars: usize,
}

impl<C: TextClassifier> PredictionService<C> {
    pub fn new(classifier: C, min_input_chars: usize) -> Self {
        Self {
            classifier,
            min_input_chars,
        }
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.labels()
    }

    /// 驗證輸入後做單筆推論。空白或過短 → EmptyInputError（可重試），
    /// 推論本身失敗 → PredictionError（可換文字重試）。
    pub fn classify(&self, text: &str) -> Result<Prediction> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(ClassifierError::EmptyInputError {
                reason: "text is empty or whitespace-only".to_string(),
            });
        }

        let char_count = trimmed.chars().count();
        if char_count < self.min_input_chars {
            return Err(ClassifierError::EmptyInputError {
                reason: format!(
                    "text is too short ({} characters, minimum {})",
                    char_count, self.min_input_chars
                ),
            });
        }

        self.classifier.predict(trimmed)
    }
}
