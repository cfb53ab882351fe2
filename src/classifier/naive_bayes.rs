use crate::classifier::artifact::ClassifierArtifact;
use crate::classifier::vectorizer::TfIdfVectorizer;
use crate::domain::model::{CategoryScore, Prediction};
use crate::domain::ports::TextClassifier;
use crate::utils::error::{ClassifierError, Result};
use std::cmp::Ordering;

/// Multinomial naive bayes over TF-IDF features, deserialized from a trained
/// artifact. Classification is a pure function of the input text and the weights.
#[derive(Debug)]
pub struct NbTextClassifier {
    vectorizer: TfIdfVectorizer,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    /// Human-readable labels, native class order (decoded at load time).
    labels: Vec<String>,
}

impl NbTextClassifier {
    /// Loader 已檢查過維度一致性並解碼完所有類別標籤。
    pub fn new(artifact: ClassifierArtifact, labels: Vec<String>) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::new(artifact.vectorizer),
            class_log_prior: artifact.model.class_log_prior,
            feature_log_prob: artifact.model.feature_log_prob,
            labels,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Joint log likelihood per class for a sparse feature vector.
    fn joint_log_likelihood(&self, features: &[(usize, f64)]) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .enumerate()
            .map(|(class_idx, &prior)| {
                let row = &self.feature_log_prob[class_idx];
                prior
                    + features
                        .iter()
                        .map(|&(feature_idx, weight)| weight * row[feature_idx])
                        .sum::<f64>()
            })
            .collect()
    }

    /// Log-sum-exp softmax, 數值穩定版本
    fn softmax(log_scores: &[f64]) -> Vec<f64> {
        let max = log_scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = log_scores.iter().map(|&s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }
}

impl TextClassifier for NbTextClassifier {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict(&self, text: &str) -> Result<Prediction> {
        let features = self.vectorizer.transform(text);
        let jll = self.joint_log_likelihood(&features);
        let probabilities = Self::softmax(&jll);

        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(ClassifierError::PredictionError {
                reason: "model produced non-finite confidence scores".to_string(),
            });
        }

        let mut scores: Vec<CategoryScore> = probabilities
            .iter()
            .zip(&self.labels)
            .map(|(&probability, label)| CategoryScore {
                category: label.clone(),
                percent: probability * 100.0,
            })
            .collect();

        // 遞減排序；同分時穩定排序保留類別原生順序
        scores.sort_by(|a, b| {
            b.percent
                .partial_cmp(&a.percent)
                .unwrap_or(Ordering::Equal)
        });

        let category = scores
            .first()
            .map(|top| top.category.clone())
            .ok_or_else(|| ClassifierError::PredictionError {
                reason: "model returned no categories".to_string(),
            })?;

        Ok(Prediction { category, scores })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::artifact::{
        ArtifactMetadata, NaiveBayesData, VectorizerData, SUPPORTED_FORMAT_VERSION,
    };
    use chrono::Utc;
    use std::collections::HashMap;

    fn fixture_classifier() -> NbTextClassifier {
        let words = [
            // Khelkud (sports)
            "फुटबल", "खेल", "खेलाडी", "टोलीले", "प्रदर्शन",
            // Rajniti (politics)
            "सरकारले", "प्रधानमन्त्री", "निर्वाचन", "दलले",
            // Arthatantra (economy)
            "बैंक", "बजारमा", "मूल्य", "अर्थतन्त्र",
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

        let artifact = ClassifierArtifact {
            format_version: SUPPORTED_FORMAT_VERSION,
            metadata: ArtifactMetadata {
                name: "nepali-news-nb".to_string(),
                trained_at: Utc::now(),
                training_samples: Some(3000),
            },
            vectorizer: VectorizerData {
                vocabulary,
                idf: vec![1.0; n_features],
            },
            model: NaiveBayesData {
                classes: vec![0, 1, 2],
                class_log_prior: vec![-1.0986; 3],
                feature_log_prob: vec![row(0..5), row(5..9), row(9..13)],
            },
        };

        NbTextClassifier::new(
            artifact,
            vec![
                "Khelkud".to_string(),
                "Rajniti".to_string(),
                "Arthatantra".to_string(),
            ],
        )
    }

    #[test]
    fn test_sports_sentence_predicts_khelkud() {
        let classifier = fixture_classifier();
        let prediction = classifier
            .predict("नेपालमा आज फुटबल खेल भएको छ। खेलमा नेपाली टोलीले राम्रो प्रदर्शन गरेको थियो।")
            .unwrap();
        assert_eq!(prediction.category, "Khelkud");
        assert_eq!(prediction.scores[0].category, "Khelkud");
    }

    #[test]
    fn test_politics_sentence_predicts_rajniti() {
        let classifier = fixture_classifier();
        let prediction = classifier
            .predict("सरकारले आज नयाँ निर्वाचन मिति घोषणा गरेको छ। प्रधानमन्त्री र दलले छलफल गरे।")
            .unwrap();
        assert_eq!(prediction.category, "Rajniti");
    }

    #[test]
    fn test_scores_sorted_descending_and_sum_to_100() {
        let classifier = fixture_classifier();
        let prediction = classifier
            .predict("बैंक ब्याजदर घटेपछि बजारमा मूल्य स्थिर भयो र अर्थतन्त्र सुध्रियो।")
            .unwrap();

        assert_eq!(prediction.scores.len(), 3);
        for pair in prediction.scores.windows(2) {
            assert!(pair[0].percent >= pair[1].percent);
        }

        let total: f64 = prediction.scores.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let classifier = fixture_classifier();
        let text = "नेपालमा आज फुटबल खेल भएको छ। खेलमा नेपाली टोलीले राम्रो प्रदर्शन गरेको थियो।";
        let first = classifier.predict(text).unwrap();
        let second = classifier.predict(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_words_still_return_a_known_category() {
        let classifier = fixture_classifier();
        // no vocabulary hits: falls back to class priors, still one of the labels
        let prediction = classifier.predict("चलचित्र हेर्न रमाइलो लाग्यो साथीहरूसँग").unwrap();
        assert!(classifier
            .labels()
            .contains(&prediction.category));
    }

    #[test]
    fn test_non_finite_weights_raise_prediction_error() {
        let mut classifier = fixture_classifier();
        classifier.class_log_prior[0] = f64::NAN;
        let err = classifier
            .predict("नेपालमा आज फुटबल खेल भएको छ")
            .unwrap_err();
        assert!(matches!(err, ClassifierError::PredictionError { .. }));
    }

    #[test]
    fn test_top_slice_is_bounded() {
        let classifier = fixture_classifier();
        let prediction = classifier
            .predict("नेपालमा आज फुटबल खेल भएको छ। खेलमा नेपाली टोलीले राम्रो प्रदर्शन गरेको थियो।")
            .unwrap();
        assert_eq!(prediction.top(2).len(), 2);
        assert_eq!(prediction.top(10).len(), 3);
    }
}
