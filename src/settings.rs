//! Translation settings and the JSON config they are built from.
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_IGNORE_ANNOTATION: &str = "com.fasterxml.jackson.annotation.JsonIgnore";

/// On-disk shape, e.g. `{ "blackBoxClasses": ["com\\.example\\.raw\\..*"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TranslationConfig {
    /// Regexes matched against the whole qualified class name.
    #[serde(default)]
    pub black_box_classes: Vec<String>,

    /// Members carrying this annotation never become properties.
    #[serde(default = "default_ignore_annotation")]
    pub ignore_annotation: String,
}

/// Validated settings; construction fails on bad patterns.
#[derive(Debug, Clone)]
pub struct TranslationSettings {
    black_box_classes: Vec<Regex>,
    ignore_annotation: String,
}

fn default_ignore_annotation() -> String {
    DEFAULT_IGNORE_ANNOTATION.to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self { black_box_classes: Vec::new(), ignore_annotation: default_ignore_annotation() }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self { black_box_classes: Vec::new(), ignore_annotation: default_ignore_annotation() }
    }
}

impl TranslationSettings {
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ConfigError> {
        if config.ignore_annotation.trim().is_empty() {
            return Err(ConfigError::EmptyIgnoreAnnotation);
        }
        let mut settings = Self {
            black_box_classes: Vec::with_capacity(config.black_box_classes.len()),
            ignore_annotation: config.ignore_annotation.clone(),
        };
        for pattern in &config.black_box_classes {
            settings.add_black_box_pattern(pattern)?;
        }
        Ok(settings)
    }

    pub fn add_black_box_pattern(&mut self, pattern: &str) -> Result<(), ConfigError> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|source| ConfigError::InvalidBlackBoxPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.black_box_classes.push(regex);
        Ok(())
    }

    pub fn is_black_box_class(&self, qualified_name: &str) -> bool {
        self.black_box_classes.iter().any(|rx| rx.is_match(qualified_name))
    }

    pub fn ignore_annotation(&self) -> &str {
        &self.ignore_annotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_match_whole_name() {
        let config = TranslationConfig {
            black_box_classes: vec![r"com\.example\.raw\..*".into(), r"org\.json\.JSONObject".into()],
            ..TranslationConfig::default()
        };
        let settings = TranslationSettings::from_config(&config).unwrap();
        assert!(settings.is_black_box_class("com.example.raw.Blob"));
        assert!(settings.is_black_box_class("org.json.JSONObject"));
        assert!(!settings.is_black_box_class("org.json.JSONObjectWrapper"));
        assert!(!settings.is_black_box_class("com.example.Point"));
    }

    #[test]
    fn invalid_pattern_is_rejected_up_front() {
        let config = TranslationConfig {
            black_box_classes: vec!["com.example.(".into()],
            ..TranslationConfig::default()
        };
        let err = TranslationSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBlackBoxPattern { ref pattern, .. } if pattern == "com.example.("));
    }

    #[test]
    fn empty_ignore_annotation_is_rejected() {
        let config = TranslationConfig { ignore_annotation: " ".into(), ..TranslationConfig::default() };
        assert!(matches!(
            TranslationSettings::from_config(&config),
            Err(ConfigError::EmptyIgnoreAnnotation)
        ));
    }

    #[test]
    fn config_defaults_from_json() {
        let config: TranslationConfig = serde_json::from_str(r#"{ "blackBoxClasses": ["a\\.B"] }"#).unwrap();
        assert_eq!(config.ignore_annotation, DEFAULT_IGNORE_ANNOTATION);
        assert_eq!(config.black_box_classes, vec!["a\\.B".to_string()]);
        assert!(serde_json::from_str::<TranslationConfig>(r#"{ "blackbox": [] }"#).is_err());
    }
}
