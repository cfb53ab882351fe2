use crate::utils::error::{ClassifierError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    if let Some(extension) = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        if !allowed_set.contains(extension) {
            return Err(ClassifierError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: path.to_string(),
                reason: format!(
                    "Unsupported file extension: {}. Allowed extensions: {}",
                    extension,
                    allowed_extensions.join(", ")
                ),
            });
        }
        Ok(())
    } else {
        Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        })
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ClassifierError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 邊界端的長度上限：以字元數截斷，絕不切在 UTF-8 位元組中間
/// （देवनागरी 一個字元佔多個位元組）。
pub fn truncate_to_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_chars_devanagari() {
        let text = "नेपालमा आज फुटबल खेल भएको छ";
        assert_eq!(truncate_to_chars(text, 7), "नेपालमा");
        assert_eq!(truncate_to_chars(text, 1000), text);
        assert_eq!(truncate_to_chars("", 5), "");
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("model.classifier_path", "model/classifier.json").is_ok());
        assert!(validate_path("model.classifier_path", "").is_err());
        assert!(validate_path("model.classifier_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("output.top_k", 3, 1).is_ok());
        assert!(validate_positive_number("output.top_k", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("model.classifier_path", "model/classifier.json", &["json", "zip"]).is_ok());
        assert!(validate_file_extension("model.classifier_path", "model/bundle.zip", &["json", "zip"]).is_ok());
        assert!(validate_file_extension("model.classifier_path", "model/classifier.pkl", &["json", "zip"]).is_err());
        assert!(validate_file_extension("model.classifier_path", "model/classifier", &["json", "zip"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("input.min_chars", 10usize, 1, 2000).is_ok());
        assert!(validate_range("input.min_chars", 0usize, 1, 2000).is_err());
        assert!(validate_range("input.min_chars", 5000usize, 1, 2000).is_err());
    }
}
