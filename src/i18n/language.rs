//! Language type: a language code validated against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A supported language.
///
/// Only codes present in the registry can be turned into a `Language`, so a
/// value of this type always has content behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const SPANISH: Language = Language { code: "es" };
    pub const TRADITIONAL_CHINESE: Language = Language { code: "zh-Hant" };
    pub const SIMPLIFIED_CHINESE: Language = Language { code: "zh-Hans" };

    /// Create a Language from a language code string.
    ///
    /// Use this where an unsupported code is a caller mistake (CLI flags,
    /// configuration). Share links go through [`Language::parse`] instead.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is supported
    /// * `Err` if the code is unknown
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Lenient counterpart of [`Language::from_code`]: unsupported or
    /// malformed codes are simply absent.
    pub fn parse(code: &str) -> Option<Language> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
    }

    /// Get the canonical language.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// All supported languages, in picker order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the language code (e.g., "en", "zh-Hans").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for values built through `from_code`, `parse` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code).map_err(serde::de::Error::custom)
    }
}
