use crate::classifier::artifact::VectorizerData;
use std::collections::HashMap;

/// Inference-side TF-IDF vectorizer. The vocabulary and IDF weights come from the
/// training process; this type only transforms a single document into features.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn new(data: VectorizerData) -> Self {
        Self {
            vocabulary: data.vocabulary,
            idf: data.idf,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// 以空白切詞並修掉頭尾標點（देवनागरी danda「।」等）。不做詞幹還原。
    pub fn tokenize(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|raw| {
                raw.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Sparse TF-IDF features for one document: (feature index, weight) pairs,
    /// sorted by index so downstream float accumulation is deterministic.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let tokens = Self::tokenize(text);
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let doc_length = tokens.len() as f64;
        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, (count / doc_length) * self.idf[idx]))
            .collect();

        features.sort_unstable_by_key(|&(idx, _)| idx);
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfIdfVectorizer {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("फुटबल".to_string(), 0);
        vocabulary.insert("खेल".to_string(), 1);
        vocabulary.insert("सरकार".to_string(), 2);
        TfIdfVectorizer::new(VectorizerData {
            vocabulary,
            idf: vec![1.0, 2.0, 1.5],
        })
    }

    #[test]
    fn test_tokenize_strips_danda() {
        let tokens = TfIdfVectorizer::tokenize("नेपालमा आज फुटबल खेल भएको छ।");
        assert_eq!(
            tokens,
            vec!["नेपालमा", "आज", "फुटबल", "खेल", "भएको", "छ"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_punctuation_only() {
        assert!(TfIdfVectorizer::tokenize("").is_empty());
        assert!(TfIdfVectorizer::tokenize("। , !").is_empty());
    }

    #[test]
    fn test_transform_weights_known_tokens_only() {
        let v = vectorizer();
        // 4 tokens, "खेल" twice (index 1), "फुटबल" once (index 0), one unknown
        let features = v.transform("फुटबल खेल खेल रमाइलो");
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].0, 0);
        assert!((features[0].1 - (1.0 / 4.0) * 1.0).abs() < 1e-12);
        assert_eq!(features[1].0, 1);
        assert!((features[1].1 - (2.0 / 4.0) * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_unknown_text_is_empty() {
        let v = vectorizer();
        assert!(v.transform("चलचित्र हेर्न गएको").is_empty());
    }
}
