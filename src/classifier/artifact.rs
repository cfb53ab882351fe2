use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 目前支援的模型檔案格式版本。訓練端輸出的版本不同時拒絕載入。
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// 外部訓練流程輸出的序列化分類器。載入後不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub format_version: u32,
    pub metadata: ArtifactMetadata,
    pub vectorizer: VectorizerData,
    pub model: NaiveBayesData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub training_samples: Option<usize>,
}

/// TF-IDF 向量化器的推論所需狀態（詞彙表與 IDF）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerData {
    /// word -> feature index
    pub vocabulary: HashMap<String, usize>,
    /// per-index inverse document frequency
    pub idf: Vec<f64>,
}

/// Multinomial naive bayes 的權重，類別以數字 id 表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesData {
    pub classes: Vec<u32>,
    pub class_log_prior: Vec<f64>,
    /// classes.len() rows, 每列 idf.len() 個 feature log probabilities
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// 數字類別 id 對應人類可讀類別名稱。index = class id。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDecoder {
    pub labels: Vec<String>,
}

impl LabelDecoder {
    pub fn decode(&self, class_id: u32) -> Option<&str> {
        self.labels.get(class_id as usize).map(|s| s.as_str())
    }
}

impl ClassifierArtifact {
    /// 檢查 artifact 內部維度一致性。失敗原因由 loader 包成 ArtifactLoadError。
    pub fn check_consistency(&self) -> std::result::Result<(), String> {
        let n_features = self.vectorizer.idf.len();
        let n_classes = self.model.classes.len();

        if n_classes == 0 {
            return Err("artifact contains no classes".to_string());
        }

        if self.vectorizer.vocabulary.len() != n_features {
            return Err(format!(
                "vocabulary size {} does not match idf length {}",
                self.vectorizer.vocabulary.len(),
                n_features
            ));
        }

        if let Some((word, &idx)) = self
            .vectorizer
            .vocabulary
            .iter()
            .find(|(_, &idx)| idx >= n_features)
        {
            return Err(format!(
                "vocabulary entry '{}' has feature index {} out of range (features: {})",
                word, idx, n_features
            ));
        }

        if self.model.class_log_prior.len() != n_classes {
            return Err(format!(
                "class_log_prior length {} does not match class count {}",
                self.model.class_log_prior.len(),
                n_classes
            ));
        }

        if self.model.feature_log_prob.len() != n_classes {
            return Err(format!(
                "feature_log_prob has {} rows, expected {}",
                self.model.feature_log_prob.len(),
                n_classes
            ));
        }

        for (row_idx, row) in self.model.feature_log_prob.iter().enumerate() {
            if row.len() != n_features {
                return Err(format!(
                    "feature_log_prob row {} has {} entries, expected {}",
                    row_idx,
                    row.len(),
                    n_features
                ));
            }
        }

        Ok(())
    }
}
