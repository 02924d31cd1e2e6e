//! The single authoritative list of articles shared by filtering, search and loading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::CatalogError;

/// Metadata for one blog post. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub date: NaiveDate,
    pub categories: BTreeSet<String>,
    pub content_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ArticleRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids since the id is the join key
    /// between cards on the page and content files.
    pub fn new(records: Vec<ArticleRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Parses a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ArticleRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// The seven articles published on the blog.
    pub fn sample() -> Self {
        let records = SAMPLE
            .iter()
            .map(|entry| ArticleRecord {
                id: entry.id.to_string(),
                title: entry.title.to_string(),
                excerpt: entry.excerpt.to_string(),
                date: NaiveDate::from_ymd_opt(entry.date.0, entry.date.1, entry.date.2)
                    .unwrap_or_default(),
                categories: entry.categories.iter().map(|c| c.to_string()).collect(),
                content_path: entry.content_path.to_string(),
            })
            .collect();
        Self { records }
    }

    pub fn get(&self, id: &str) -> Option<&ArticleRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArticleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ArticleRecord;
    type IntoIter = std::slice::Iter<'a, ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct SampleEntry {
    id: &'static str,
    title: &'static str,
    excerpt: &'static str,
    date: (i32, u32, u32),
    categories: &'static [&'static str],
    content_path: &'static str,
}

const SAMPLE: &[SampleEntry] = &[
    SampleEntry {
        id: "1",
        title: "Real-time Analytics",
        excerpt: "Exploring the latest techniques in real-time data processing and analytics...",
        date: (2025, 3, 15),
        categories: &["data-engineering", "real-time"],
        content_path: "content/real_time_analytics.md",
    },
    SampleEntry {
        id: "2",
        title: "Machine Learning & MLOps",
        excerpt: "Best practices for implementing machine learning operations in production...",
        date: (2025, 3, 10),
        categories: &["machine-learning", "mlops"],
        content_path: "content/machine_learning_mlops_automl.md",
    },
    SampleEntry {
        id: "3",
        title: "Generative AI",
        excerpt: "Exploring the capabilities and applications of generative AI models...",
        date: (2025, 3, 5),
        categories: &["ai", "generative"],
        content_path: "content/generative_ai.md",
    },
    SampleEntry {
        id: "4",
        title: "ETL Pipelines with Databricks",
        excerpt: "Building efficient ETL pipelines using Databricks and Apache Spark...",
        date: (2025, 2, 28),
        categories: &["data-engineering", "databricks"],
        content_path: "content/etl_pipelines_databricks.md",
    },
    SampleEntry {
        id: "5",
        title: "Data Warehousing Best Practices",
        excerpt: "Modern approaches to data warehousing for analytics and business intelligence...",
        date: (2025, 2, 20),
        categories: &["data-warehousing", "data-engineering"],
        content_path: "content/data_warehousing.md",
    },
    SampleEntry {
        id: "6",
        title: "CI/CD for ML Systems",
        excerpt: "Implementing continuous integration and deployment for machine learning systems...",
        date: (2025, 2, 15),
        categories: &["mlops", "ci-cd"],
        content_path: "content/cicd_ml_systems.md",
    },
    SampleEntry {
        id: "7",
        title: "Technical Documentation Strategies",
        excerpt: "Best practices for creating and maintaining technical documentation...",
        date: (2025, 2, 10),
        categories: &["documentation", "best-practices"],
        content_path: "content/documentation.md",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_seven_unique_records() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 7);
        assert!(Catalog::new(catalog.records().to_vec()).is_ok());
    }

    #[test]
    fn looks_up_records_by_id() {
        let catalog = Catalog::sample();
        let record = catalog.get("4").expect("record 4");

        assert_eq!(record.title, "ETL Pipelines with Databricks");
        assert_eq!(record.content_path, "content/etl_pipelines_databricks.md");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut records = Catalog::sample().records().to_vec();
        records.push(records[0].clone());

        let err = Catalog::new(records).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn parses_json_records() {
        let json = r#"[{
            "id": "intro",
            "title": "Hello",
            "excerpt": "First post",
            "date": "2024-12-01",
            "categories": ["meta"],
            "contentPath": "content/hello.md"
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();

        let record = catalog.get("intro").unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert!(record.categories.contains("meta"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
