//! Viewer settings passed in from the page. Every field is optional.

use serde::{Deserialize, Serialize};

use crate::catalog::{ArticleRecord, Catalog};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Height of the fixed header in CSS pixels.
    pub header_offset: f64,
    pub scroll_debounce_ms: u32,
    pub search_debounce_ms: u32,
    /// Live search while typing starts at this many characters.
    pub min_live_query_chars: usize,
    /// Prefix joined to every record's `contentPath`.
    pub content_base: String,
    pub log_level: String,
    /// Replaces the built-in catalog when present.
    pub catalog: Option<Vec<ArticleRecord>>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            scroll_debounce_ms: 100,
            search_debounce_ms: 300,
            min_live_query_chars: 3,
            content_base: String::new(),
            log_level: "info".to_string(),
            catalog: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The configured catalog, or the built-in one.
    pub fn build_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog {
            Some(records) => Ok(Catalog::new(records.clone())?),
            None => Ok(Catalog::sample()),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Resolves a record's content path against `content_base`.
    pub fn content_url(&self, content_path: &str) -> String {
        if self.content_base.is_empty() {
            return content_path.to_string();
        }
        format!(
            "{}/{}",
            self.content_base.trim_end_matches('/'),
            content_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.scroll_debounce_ms, 100);
    }

    #[test]
    fn reads_camel_case_fields() {
        let config =
            ViewerConfig::from_json(r#"{"headerOffset": 64, "contentBase": "/blog/", "logLevel": "debug"}"#)
                .unwrap();

        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
        assert_eq!(
            config.content_url("content/generative_ai.md"),
            "/blog/content/generative_ai.md"
        );
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = ViewerConfig {
            log_level: "loud".to_string(),
            ..ViewerConfig::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn content_url_without_base_is_unchanged() {
        let config = ViewerConfig::default();
        assert_eq!(config.content_url("content/a.md"), "content/a.md");
    }

    #[test]
    fn custom_catalog_replaces_sample() {
        let json = r#"{"catalog": [{
            "id": "a", "title": "A", "excerpt": "", "date": "2025-01-01",
            "categories": [], "contentPath": "a.md"
        }]}"#;
        let catalog = ViewerConfig::from_json(json).unwrap().build_catalog().unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("a").is_some());
    }

    #[test]
    fn duplicate_ids_in_custom_catalog_are_rejected() {
        let record = r#"{"id": "a", "title": "A", "excerpt": "", "date": "2025-01-01",
            "categories": [], "contentPath": "a.md"}"#;
        let json = format!(r#"{{"catalog": [{record}, {record}]}}"#);
        let config = ViewerConfig::from_json(&json).unwrap();

        assert!(matches!(config.build_catalog(), Err(ConfigError::Catalog(_))));
    }

    #[test]
    fn malformed_json_keeps_the_serde_error() {
        let err = ViewerConfig::from_json(r#"{"headerOffset": "tall"}"#).unwrap_err();

        let ConfigError::Json(source) = &err else {
            panic!("expected a JSON error, got {err:?}");
        };
        assert!(source.is_data());
        assert!(err.to_string().starts_with("invalid viewer configuration: "));
    }
}
