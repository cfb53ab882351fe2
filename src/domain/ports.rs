use crate::domain::model::{Article, BatchResult, Prediction};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 唯讀模型檔案與輸出檔案的存取介面
pub trait FileStore: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn classifier_path(&self) -> &str;
    fn labels_path(&self) -> &str;
    fn min_input_chars(&self) -> usize;
    fn max_input_chars(&self) -> usize;
    fn top_k(&self) -> usize;
}

/// 已載入的分類器。載入後不可變，所有分類呼叫共享唯讀狀態。
pub trait TextClassifier: Send + Sync {
    /// Category labels in the artifact's native class order.
    fn labels(&self) -> &[String];

    /// Single-example inference over an already-validated text.
    fn predict(&self, text: &str) -> Result<Prediction>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Article>>;
    async fn transform(&self, articles: Vec<Article>) -> Result<BatchResult>;
    async fn load(&self, result: BatchResult) -> Result<String>;
}
