//! Read-only multilingual content tables.
//!
//! Every supported language has one JSON document with the same shape:
//! a label plus the five disclosure categories, each holding an ordered list
//! of `{ id, label }` options. Option ids are shared across languages, so id 3
//! under `allergies` names the same allergy in every document.
//!
//! The documents are embedded at build time and parsed once; the resulting
//! [`ContentStore`] is never mutated.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One of the five disclosure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Allergies,
    FoodRestrictions,
    MedicineAllergies,
    MedicalConditions,
    Phobias,
}

impl Category {
    /// Canonical display order. Cards and builders always follow it.
    pub const ALL: [Category; 5] = [
        Category::Allergies,
        Category::FoodRestrictions,
        Category::MedicineAllergies,
        Category::MedicalConditions,
        Category::Phobias,
    ];

    /// Query-string and JSON key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Allergies => "allergies",
            Category::FoodRestrictions => "foodRestrictions",
            Category::MedicineAllergies => "medicineAllergies",
            Category::MedicalConditions => "medicalConditions",
            Category::Phobias => "phobias",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

/// A selectable item within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub id: i64,
    pub label: String,
}

/// A category's label and options in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData {
    pub label: String,
    pub options: Vec<OptionEntry>,
}

/// The five categories of one language document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categories {
    pub allergies: CategoryData,
    pub food_restrictions: CategoryData,
    pub medicine_allergies: CategoryData,
    pub medical_conditions: CategoryData,
    pub phobias: CategoryData,
}

impl Categories {
    pub fn get(&self, category: Category) -> &CategoryData {
        match category {
            Category::Allergies => &self.allergies,
            Category::FoodRestrictions => &self.food_restrictions,
            Category::MedicineAllergies => &self.medicine_allergies,
            Category::MedicalConditions => &self.medical_conditions,
            Category::Phobias => &self.phobias,
        }
    }
}

/// All content for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageData {
    pub id: Language,
    pub label: String,
    pub categories: Categories,
}

/// Category key and label, as listed by the card builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub key: Category,
    pub label: String,
}

/// Language entry for the source/target pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSummary {
    pub id: Language,
    pub label: &'static str,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content document for '{code}': {source}")]
    Parse {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("content document registered as '{expected}' declares id '{found}'")]
    IdMismatch { expected: Language, found: Language },

    #[error("unsupported language code for content document: '{0}'")]
    UnknownLanguage(String),

    #[error("no content document for language '{0}'")]
    MissingLanguage(Language),
}

/// Embedded language documents, keyed by language code.
const EMBEDDED_DOCUMENTS: [(&str, &str); 4] = [
    ("en", include_str!("../data/en.json")),
    ("es", include_str!("../data/es.json")),
    ("zh-Hant", include_str!("../data/zh-Hant.json")),
    ("zh-Hans", include_str!("../data/zh-Hans.json")),
];

/// Immutable mapping from language to its content.
#[derive(Debug, Clone)]
pub struct ContentStore {
    languages: BTreeMap<Language, LanguageData>,
}

impl ContentStore {
    /// Load the documents compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_documents(EMBEDDED_DOCUMENTS)
    }

    /// Load `<code>.json` for every supported language from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        let dir = dir.as_ref();
        let mut documents = Vec::new();

        for language in Language::all() {
            let path = dir.join(format!("{}.json", language.code()));
            let json = std::fs::read_to_string(&path)
                .map_err(|source| ContentError::Io { path, source })?;
            documents.push((language.code(), json));
        }

        Self::from_documents(
            documents
                .iter()
                .map(|(code, json)| (*code, json.as_str())),
        )
    }

    /// Build a store from `(code, json)` pairs.
    ///
    /// Every supported language must be present, and each document's `id`
    /// must match the code it is registered under.
    pub fn from_documents<'a, I>(documents: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut languages = BTreeMap::new();

        for (code, json) in documents {
            let expected = Language::parse(code)
                .ok_or_else(|| ContentError::UnknownLanguage(code.to_string()))?;
            let data: LanguageData =
                serde_json::from_str(json).map_err(|source| ContentError::Parse {
                    code: code.to_string(),
                    source,
                })?;

            if data.id != expected {
                return Err(ContentError::IdMismatch {
                    expected,
                    found: data.id,
                });
            }

            languages.insert(expected, data);
        }

        if let Some(missing) = Language::all()
            .into_iter()
            .find(|language| !languages.contains_key(language))
        {
            return Err(ContentError::MissingLanguage(missing));
        }

        Ok(Self { languages })
    }

    /// Content for a language code; `None` for anything unsupported.
    pub fn language_data(&self, code: &str) -> Option<&LanguageData> {
        Language::parse(code).and_then(|language| self.get(language))
    }

    pub fn get(&self, language: Language) -> Option<&LanguageData> {
        self.languages.get(&language)
    }

    /// Categories with their labels in `language`, in canonical order.
    pub fn category_entries(&self, language: Language) -> Vec<CategoryEntry> {
        let Some(data) = self.get(language) else {
            return Vec::new();
        };

        Category::ALL
            .into_iter()
            .map(|key| CategoryEntry {
                key,
                label: data.categories.get(key).label.clone(),
            })
            .collect()
    }

    /// Options offered for `category` in `language`, in content order.
    pub fn category_options(&self, language: Language, category: Category) -> &[OptionEntry] {
        self.get(language)
            .map(|data| data.categories.get(category).options.as_slice())
            .unwrap_or_default()
    }

    /// Every supported language with its picker label.
    pub fn language_options() -> Vec<LanguageSummary> {
        Language::all()
            .into_iter()
            .map(|id| LanguageSummary {
                id,
                label: id.name(),
            })
            .collect()
    }
}
