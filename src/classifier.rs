//! Keyword-driven category assignment.
//!
//! Override phrases are tried first, then the keyword table in declaration
//! order. The first category with any keyword occurring in the lowercased
//! description wins; there is no scoring. Unmatched descriptions fall back to
//! the reserved default category.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::keywords::{default_config, DEFAULT_CATEGORY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub name: String,
    pub keywords: Vec<String>,
}

/// A phrase that forces a category before the keyword table is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    pub phrase: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_category_name")]
    pub default_category: String,
    #[serde(default)]
    pub overrides: Vec<Override>,
    pub categories: Vec<CategoryKeywords>,
}

fn default_category_name() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        default_config()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("default category name is empty")]
    EmptyDefault,

    #[error("category with an empty name")]
    EmptyCategoryName,

    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("default category '{0}' cannot have keywords")]
    DefaultCategoryKeyed(String),

    #[error("override for '{0}' has an empty phrase")]
    EmptyOverride(String),
}

#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    default_category: String,
    overrides: Vec<Override>,
    categories: Vec<CategoryKeywords>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::build(default_config())
    }
}

impl CategoryClassifier {
    pub fn new(config: ClassifierConfig) -> std::result::Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self::build(config))
    }

    /// Load a JSON keyword table. Categories keep their order from the file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        Ok(Self::new(config)?)
    }

    fn build(config: ClassifierConfig) -> Self {
        let overrides = config
            .overrides
            .into_iter()
            .map(|o| Override {
                phrase: o.phrase.to_lowercase(),
                category: o.category,
            })
            .collect();
        let categories = config
            .categories
            .into_iter()
            .map(|c| CategoryKeywords {
                name: c.name,
                keywords: c
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self {
            default_category: config.default_category,
            overrides,
            categories,
        }
    }

    pub fn classify(&self, description: &str) -> &str {
        let lower = description.to_lowercase();

        if let Some(o) = self.overrides.iter().find(|o| lower.contains(&o.phrase)) {
            return &o.category;
        }

        self.categories
            .iter()
            .find(|c| c.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|c| c.name.as_str())
            .unwrap_or(self.default_category.as_str())
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    pub fn categories(&self) -> &[CategoryKeywords] {
        &self.categories
    }

    /// Every category this classifier can return, table order first, default last.
    pub fn category_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.overrides.iter().map(|o| o.category.as_str()))
            .chain(std::iter::once(self.default_category.as_str()))
            .filter(|name| seen.insert(name.to_lowercase()))
            .collect()
    }
}

fn validate(config: &ClassifierConfig) -> std::result::Result<(), ConfigError> {
    let default = config.default_category.trim();
    if default.is_empty() {
        return Err(ConfigError::EmptyDefault);
    }
    let default_lower = default.to_lowercase();

    let mut names = HashSet::new();
    for category in &config.categories {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyCategoryName);
        }
        let lower = name.to_lowercase();
        if lower == default_lower {
            return Err(ConfigError::DefaultCategoryKeyed(name.to_string()));
        }
        if !names.insert(lower) {
            return Err(ConfigError::DuplicateCategory(name.to_string()));
        }
    }

    for o in &config.overrides {
        if o.category.trim().is_empty() {
            return Err(ConfigError::EmptyCategoryName);
        }
        if o.phrase.trim().is_empty() {
            return Err(ConfigError::EmptyOverride(o.category.clone()));
        }
    }
    Ok(())
}

/// Classify with the stock keyword table.
pub fn classify_description(description: &str) -> &'static str {
    static CLASSIFIER: OnceLock<CategoryClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(CategoryClassifier::default).classify(description)
}
