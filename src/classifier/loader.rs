use crate::classifier::artifact::{ClassifierArtifact, LabelDecoder, SUPPORTED_FORMAT_VERSION};
use crate::classifier::naive_bayes::NbTextClassifier;
use crate::domain::ports::{ConfigProvider, FileStore};
use crate::utils::error::{ClassifierError, Result};
use std::io::Read;

const BUNDLE_CLASSIFIER_ENTRY: &str = "classifier.json";
const BUNDLE_LABELS_ENTRY: &str = "labels.json";

/// 從 FileStore 載入訓練好的模型檔案。行程啟動時呼叫一次，
/// 回傳的分類器之後唯讀共享，不再碰磁碟。
pub struct ArtifactLoader<S: FileStore> {
    store: S,
}

impl<S: FileStore> ArtifactLoader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 載入分類器與標籤解碼器。classifier_path 以 .zip 結尾時視為
    /// bundle（內含 classifier.json 與 labels.json），否則讀兩個 JSON 檔。
    pub async fn load(&self, config: &impl ConfigProvider) -> Result<NbTextClassifier> {
        let classifier_path = config.classifier_path();

        let (artifact, decoder, labels_source) = if classifier_path.ends_with(".zip") {
            let (artifact, decoder) = self.load_bundle(classifier_path).await?;
            (artifact, decoder, classifier_path)
        } else {
            let artifact: ClassifierArtifact = self.read_json(classifier_path).await?;
            let decoder: LabelDecoder = self.read_json(config.labels_path()).await?;
            (artifact, decoder, config.labels_path())
        };

        check_format_version(classifier_path, &artifact)?;

        artifact
            .check_consistency()
            .map_err(|reason| load_error(classifier_path, reason))?;

        let labels = decode_labels(labels_source, &artifact, &decoder)?;

        tracing::info!(
            "🧠 Loaded model '{}' (trained {}, {} features, {} categories)",
            artifact.metadata.name,
            artifact.metadata.trained_at.format("%Y-%m-%d"),
            artifact.vectorizer.idf.len(),
            labels.len()
        );

        Ok(NbTextClassifier::new(artifact, labels))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self
            .store
            .read_file(path)
            .await
            .map_err(|e| load_error(path, e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| load_error(path, format!("invalid JSON: {}", e)))
    }

    async fn load_bundle(&self, path: &str) -> Result<(ClassifierArtifact, LabelDecoder)> {
        let bytes = self
            .store
            .read_file(path)
            .await
            .map_err(|e| load_error(path, e.to_string()))?;

        let cursor = std::io::Cursor::new(bytes);
        let mut archive =
            zip::ZipArchive::new(cursor).map_err(|e| load_error(path, format!("invalid bundle: {}", e)))?;

        let artifact = read_bundle_entry(&mut archive, path, BUNDLE_CLASSIFIER_ENTRY)?;
        let decoder = read_bundle_entry(&mut archive, path, BUNDLE_LABELS_ENTRY)?;
        Ok((artifact, decoder))
    }
}

fn read_bundle_entry<T: serde::de::DeserializeOwned, R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    bundle_path: &str,
    entry: &str,
) -> Result<T> {
    let mut file = archive
        .by_name(entry)
        .map_err(|e| load_error(bundle_path, format!("missing bundle entry '{}': {}", entry, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| load_error(bundle_path, format!("unreadable bundle entry '{}': {}", entry, e)))?;

    serde_json::from_str(&content)
        .map_err(|e| load_error(bundle_path, format!("invalid JSON in '{}': {}", entry, e)))
}

fn check_format_version(path: &str, artifact: &ClassifierArtifact) -> Result<()> {
    if artifact.format_version != SUPPORTED_FORMAT_VERSION {
        return Err(load_error(
            path,
            format!(
                "unsupported format_version {} (this build supports {}, crate version {})",
                artifact.format_version,
                SUPPORTED_FORMAT_VERSION,
                env!("CARGO_PKG_VERSION")
            ),
        ));
    }
    Ok(())
}

/// 模型中的每個 class id 都必須能解碼，缺標籤視為載入失敗而不是留到推論時爆。
fn decode_labels(
    labels_path: &str,
    artifact: &ClassifierArtifact,
    decoder: &LabelDecoder,
) -> Result<Vec<String>> {
    artifact
        .model
        .classes
        .iter()
        .map(|&class_id| {
            decoder
                .decode(class_id)
                .map(|label| label.to_string())
                .ok_or_else(|| {
                    load_error(
                        labels_path,
                        format!("class id {} has no label in the decoder", class_id),
                    )
                })
        })
        .collect()
}

fn load_error(path: &str, reason: impl Into<String>) -> ClassifierError {
    ClassifierError::ArtifactLoadError {
        path: path.to_string(),
        reason: reason.into(),
    }
}
