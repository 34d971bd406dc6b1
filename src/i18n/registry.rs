//! Language registry: Single source of truth for all supported card languages.
//!
//! The set of languages is closed and known at build time. The registry is a
//! singleton behind `OnceLock`, initialized on first access and immutable
//! thereafter.

use std::sync::OnceLock;

/// Metadata for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Language code as it appears in share links (e.g., "en", "zh-Hant")
    pub code: &'static str,

    /// English name of the language, shown in the language pickers
    pub name: &'static str,

    /// Native name of the language (e.g., "Español", "繁體中文")
    pub native_name: &'static str,

    /// Whether this is the canonical language (only one should be true)
    pub is_canonical: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// Matching is exact and case-sensitive: "zh-hant" is not "zh-Hant".
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all languages in picker order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the canonical language configuration.
    ///
    /// The canonical language supplies the option list of the card builder.
    ///
    /// # Panics
    /// Panics if no canonical language is found or if multiple canonical
    /// languages are defined (this indicates a configuration error).
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// The four supported languages, in picker order.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
        },
        LanguageConfig {
            code: "zh-Hant",
            name: "Mandarin Chinese (Traditional)",
            native_name: "繁體中文",
            is_canonical: false,
        },
        LanguageConfig {
            code: "zh-Hans",
            name: "Mandarin Chinese (Simplified)",
            native_name: "简体中文",
            is_canonical: false,
        },
    ]
}
