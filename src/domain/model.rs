use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 單一類別的信心分數（百分比，0-100）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub percent: f64,
}

/// 一次分類請求的結果：最高分類別加上依信心分數遞減排序的完整列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub scores: Vec<CategoryScore>,
}

impl Prediction {
    /// Top-k slice of the ranked scores, for display.
    pub fn top(&self, k: usize) -> &[CategoryScore] {
        &self.scores[..k.min(self.scores.len())]
    }
}

/// 批次輸入的一筆新聞文章
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub text: String,
}

/// 批次分類成功的一筆輸出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedArticle {
    pub id: String,
    pub category: String,
    pub confidence_percent: f64,
    pub classified_at: DateTime<Utc>,
}

/// 批次中被輸入驗證拒絕的一筆記錄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedArticle {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub classified: Vec<ClassifiedArticle>,
    pub skipped: Vec<SkippedArticle>,
}
