use crate::config::toml_config::TomlConfig;
use crate::core::service::PredictionService;
use crate::domain::model::{Article, BatchResult, ClassifiedArticle, SkippedArticle};
use crate::domain::ports::{ConfigProvider, FileStore, Pipeline, TextClassifier};
use crate::utils::error::{ClassifierError, Result};
use crate::utils::validation::truncate_to_chars;
use chrono::Utc;

/// 批次分類管道：extract 讀文章 CSV，transform 逐筆分類，load 寫結果 CSV。
/// 分類器在建構前載入一次，整批共享唯讀。
pub struct BatchPipeline<S: FileStore, C: TextClassifier> {
    storage: S,
    service: PredictionService<C>,
    config: TomlConfig,
}

impl<S: FileStore, C: TextClassifier> BatchPipeline<S, C> {
    pub fn new(storage: S, service: PredictionService<C>, config: TomlConfig) -> Self {
        Self {
            storage,
            service,
            config,
        }
    }

    fn delimiter(&self) -> u8 {
        if self.config.input.path.ends_with(".tsv") {
            b'\t'
        } else {
            b','
        }
    }

    fn column_index(headers: &csv::StringRecord, field: &str, column: &str) -> Result<usize> {
        headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| ClassifierError::ConfigError {
                message: format!("input file has no '{}' column (config key: {})", column, field),
            })
    }
}

#[async_trait::async_trait]
impl<S: FileStore, C: TextClassifier> Pipeline for BatchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Article>> {
        tracing::debug!("Reading input from: {}", self.config.input.path);
        let bytes = self.storage.read_file(&self.config.input.path).await?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter())
            .from_reader(bytes.as_slice());

        let headers = reader.headers()?.clone();
        let text_idx = Self::column_index(&headers, "input.text_column", self.config.text_column())?;
        let id_idx = self
            .config
            .id_column()
            .map(|column| Self::column_index(&headers, "input.id_column", column))
            .transpose()?;

        let max_chars = self.config.max_input_chars();
        let mut articles = Vec::new();

        for (row_number, record) in reader.records().enumerate() {
            if let Some(max) = self.config.max_records() {
                if articles.len() >= max {
                    tracing::debug!("Reached max_records limit of {}", max);
                    break;
                }
            }

            let record = record?;

            let id = id_idx
                .and_then(|idx| record.get(idx))
                .map(str::to_string)
                .unwrap_or_else(|| (row_number + 1).to_string());

            // 長度上限在邊界處理：截斷而不是讓 service 拒絕
            let raw_text = record.get(text_idx).unwrap_or("");
            let text = truncate_to_chars(raw_text, max_chars);
            if text.len() < raw_text.len() {
                tracing::debug!("Article {} truncated to {} characters", id, max_chars);
            }

            articles.push(Article {
                id,
                text: text.to_string(),
            });
        }

        Ok(articles)
    }

    async fn transform(&self, articles: Vec<Article>) -> Result<BatchResult> {
        let mut classified = Vec::new();
        let mut skipped = Vec::new();

        for article in articles {
            match self.service.classify(&article.text) {
                Ok(prediction) => {
                    let confidence_percent = prediction
                        .scores
                        .first()
                        .map(|score| score.percent)
                        .unwrap_or(100.0);

                    classified.push(ClassifiedArticle {
                        id: article.id,
                        category: prediction.category,
                        confidence_percent,
                        classified_at: Utc::now(),
                    });
                }
                Err(ClassifierError::EmptyInputError { reason }) => {
                    tracing::debug!("Article {} skipped: {}", article.id, reason);
                    skipped.push(SkippedArticle {
                        id: article.id,
                        reason,
                    });
                }
                Err(error @ ClassifierError::PredictionError { .. }) => {
                    if self.config.fail_on_prediction_error() {
                        return Err(error);
                    }
                    tracing::warn!("⚠️ Article {}: {}", article.id, error);
                    skipped.push(SkippedArticle {
                        id: article.id,
                        reason: error.to_string(),
                    });
                }
                Err(other) => return Err(other),
            }
        }

        Ok(BatchResult {
            classified,
            skipped,
        })
    }

    async fn load(&self, result: BatchResult) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output.path, self.config.output_filename());

        let mut buffer = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            for row in &result.classified {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        tracing::debug!("Writing {} result rows to {}", result.classified.len(), output_path);
        self.storage.write_file(&output_path, &buffer).await?;

        // 被拒絕的輸入另外留報告，方便人工檢查
        if !result.skipped.is_empty() && self.config.skipped_report_enabled() {
            let report_path = format!("{}/skipped.json", self.config.output.path);
            let report = serde_json::to_string_pretty(&result.skipped)?;
            self.storage.write_file(&report_path, report.as_bytes()).await?;
            tracing::info!("📝 {} rejected inputs listed in {}", result.skipped.len(), report_path);
        }

        Ok(output_path)
    }
}
