//! Supported languages for disclosure cards.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Validated `Language` type used everywhere a language code is stored
//!
//! # Example
//!
//! ```rust,ignore
//! use disclosure_card::i18n::{Language, LanguageRegistry};
//!
//! // Share links tolerate unknown codes
//! assert_eq!(Language::parse("fr"), None);
//!
//! // Picker order
//! let languages = LanguageRegistry::get().list_all();
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
