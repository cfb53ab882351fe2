use anyhow::Result;
use nepali_news_classifier::classifier::artifact::{
    ArtifactMetadata, ClassifierArtifact, LabelDecoder, NaiveBayesData, VectorizerData,
    SUPPORTED_FORMAT_VERSION,
};
use nepali_news_classifier::domain::ports::ConfigProvider;
use nepali_news_classifier::{
    ArtifactLoader, BatchEngine, BatchPipeline, LocalFileStore, PredictionService, TomlConfig,
};
use std::collections::HashMap;
use tempfile::TempDir;

fn fixture_artifact() -> ClassifierArtifact {
    let words = [
        "फुटबल", "खेल", "खेलाडी", "टोलीले", "प्रदर्शन",
        "सरकारले", "प्रधानमन्त्री", "निर्वाचन", "दलले",
    ];
    let vocabulary: HashMap<String, usize> = words
        .iter()
        .enumerate()
        .map(|(idx, word)| (word.to_string(), idx))
        .collect();
    let n_features = words.len();

    let row = |range: std::ops::Range<usize>| -> Vec<f64> {
        (0..n_features)
            .map(|idx| if range.contains(&idx) { -1.6 } else { -6.9 })
            .collect()
    };

    ClassifierArtifact {
        format_version: SUPPORTED_FORMAT_VERSION,
        metadata: ArtifactMetadata {
            name: "nepali-news-nb".to_string(),
            trained_at: chrono::Utc::now(),
            training_samples: Some(2000),
        },
        vectorizer: VectorizerData {
            vocabulary,
            idf: vec![1.0; n_features],
        },
        model: NaiveBayesData {
            classes: vec![0, 1],
            class_log_prior: vec![-0.6931; 2],
            feature_log_prob: vec![row(0..5), row(5..9)],
        },
    }
}

fn write_fixtures(dir: &TempDir) -> Result<()> {
    let model_dir = dir.path().join("model");
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&model_dir)?;
    std::fs::create_dir_all(&data_dir)?;

    std::fs::write(
        model_dir.join("classifier.json"),
        serde_json::to_vec(&fixture_artifact())?,
    )?;
    std::fs::write(
        model_dir.join("labels.json"),
        serde_json::to_vec(&LabelDecoder {
            labels: vec!["Khelkud".to_string(), "Rajniti".to_string()],
        })?,
    )?;

    let input_csv = "\
article_id,body
n-101,नेपालमा आज फुटबल खेल भएको छ। खेलमा नेपाली टोलीले राम्रो प्रदर्शन गरेको थियो।
n-102,सरकारले आज नयाँ निर्वाचन मिति घोषणा गरेको छ। प्रधानमन्त्री र दलले छलफल गरे।
n-103,छोटो पाठ
";
    std::fs::write(data_dir.join("articles.csv"), input_csv)?;

    Ok(())
}

fn batch_config(dir: &TempDir) -> Result<TomlConfig> {
    let toml_content = format!(
        r#"
[job]
name = "test-batch"
description = "Integration test batch"
version = "1.0"

[model]
classifier_path = "{base}/model/classifier.json"
labels_path = "{base}/model/labels.json"

[input]
path = "{base}/data/articles.csv"
text_column = "body"
id_column = "article_id"

[output]
path = "{base}/output"
top_k = 2
"#,
        base = dir.path().to_str().unwrap()
    );

    Ok(TomlConfig::from_toml_str(&toml_content)?)
}

#[tokio::test]
async fn test_end_to_end_batch_classification() -> Result<()> {
    let dir = TempDir::new()?;
    write_fixtures(&dir)?;

    let config = batch_config(&dir)?;

    let store = LocalFileStore::new(".".to_string());
    let loader = ArtifactLoader::new(store.clone());
    let classifier = loader.load(&config).await?;
    let service = PredictionService::new(classifier, config.min_input_chars());

    let pipeline = BatchPipeline::new(store, service, config);
    let engine = BatchEngine::new(pipeline);

    let output_path = engine.run().await?;
    assert!(output_path.ends_with("predictions.csv"));

    // 結果 CSV：兩筆成功分類
    let csv_content = std::fs::read_to_string(dir.path().join("output/predictions.csv"))?;
    let mut lines = csv_content.lines();
    assert_eq!(
        lines.next(),
        Some("id,category,confidence_percent,classified_at")
    );

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("n-101,Khelkud,"));
    assert!(rows[1].starts_with("n-102,Rajniti,"));

    // 過短的第三筆進了 skipped 報告
    let report = std::fs::read_to_string(dir.path().join("output/skipped.json"))?;
    let skipped: Vec<serde_json::Value> = serde_json::from_str(&report)?;
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["id"], "n-103");

    Ok(())
}

#[tokio::test]
async fn test_batch_with_missing_model_fails_before_classification() -> Result<()> {
    let dir = TempDir::new()?;
    // input exists, model files do not
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir)?;
    std::fs::write(data_dir.join("articles.csv"), "article_id,body\n1,x\n")?;

    let config = batch_config(&dir)?;

    let store = LocalFileStore::new(".".to_string());
    let loader = ArtifactLoader::new(store);

    assert!(loader.load(&config).await.is_err());
    Ok(())
}
