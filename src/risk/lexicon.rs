// Crisis indicator lexicon
//
// Pure data: category -> indicator phrases + severity weight. Loaded once
// at startup and read-only afterwards.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn default_weight() -> u32 {
    1
}

/// One lexicon category: the phrases that indicate it and the severity
/// weight each match contributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconCategory {
    pub phrases: Vec<String>,
    /// Categories without an explicit weight default to 1.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

/// Configured mapping of crisis-indicator phrases to categories and
/// severity weights. `BTreeMap` keeps the scan order deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(flatten)]
    categories: BTreeMap<String, LexiconCategory>,
}

impl Lexicon {
    pub fn new(categories: BTreeMap<String, LexiconCategory>) -> Result<Self> {
        for (name, category) in &categories {
            if category.weight == 0 {
                bail!("Lexicon category '{}' has weight 0 (must be >= 1)", name);
            }
        }
        Ok(Self { categories })
    }

    /// Load a lexicon from a JSON file of the form
    /// `{ "category": { "weight": N, "phrases": [...] }, ... }`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crisis lexicon file: {}", path.display()))?;

        let categories: BTreeMap<String, LexiconCategory> =
            serde_json::from_str(&contents).context("Failed to parse crisis lexicon JSON")?;

        Self::new(categories)
    }

    /// Iterate categories in deterministic (name) order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &LexiconCategory)> {
        self.categories.iter().map(|(name, cat)| (name.as_str(), cat))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for Lexicon {
    /// Built-in lexicon used when no file is configured. Mirrors
    /// `data/crisis_lexicon.json`.
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "suicidal_ideation".to_string(),
            LexiconCategory {
                phrases: [
                    "suicide",
                    "kill myself",
                    "end my life",
                    "end it all",
                    "want to die",
                    "better off dead",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                weight: 8,
            },
        );
        categories.insert(
            "self_harm".to_string(),
            LexiconCategory {
                phrases: ["hurt myself", "cut myself", "harm myself", "self harm"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                weight: 8,
            },
        );
        categories.insert(
            "hopelessness".to_string(),
            LexiconCategory {
                phrases: ["hopeless", "no way out", "nothing matters", "give up"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                weight: 2,
            },
        );
        categories.insert(
            "isolation".to_string(),
            LexiconCategory {
                phrases: ["all alone", "no one cares", "nobody would miss me"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                weight: 1,
            },
        );
        Self { categories }
    }
}
