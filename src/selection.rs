//! Selection state and its query-string codec.
//!
//! A card is fully described by its share link: the source and target
//! languages plus the selected option ids of each category, written as
//! repeated key/value pairs:
//!
//! ```text
//! source=en&target=es&allergies=1&allergies=3&phobias=2
//! ```
//!
//! Decoding never fails. Unsupported language codes become absent and id
//! tokens without leading digits are dropped, so a stale or hand-edited link
//! still opens.

use crate::content::Category;
use crate::i18n::Language;
use serde::Serialize;
use std::collections::BTreeSet;
use std::num::IntErrorKind;
use url::form_urlencoded;

const SOURCE_KEY: &str = "source";
const TARGET_KEY: &str = "target";

/// The user's languages and selected option ids per category.
///
/// Each category is a set: duplicates collapse and insertion order carries
/// no meaning. Ids are not checked against any content table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub source_language: Option<Language>,
    pub target_language: Option<Language>,
    pub allergies: BTreeSet<i64>,
    pub food_restrictions: BTreeSet<i64>,
    pub medicine_allergies: BTreeSet<i64>,
    pub medical_conditions: BTreeSet<i64>,
    pub phobias: BTreeSet<i64>,
}

impl SelectionState {
    pub fn ids(&self, category: Category) -> &BTreeSet<i64> {
        match category {
            Category::Allergies => &self.allergies,
            Category::FoodRestrictions => &self.food_restrictions,
            Category::MedicineAllergies => &self.medicine_allergies,
            Category::MedicalConditions => &self.medical_conditions,
            Category::Phobias => &self.phobias,
        }
    }

    pub fn ids_mut(&mut self, category: Category) -> &mut BTreeSet<i64> {
        match category {
            Category::Allergies => &mut self.allergies,
            Category::FoodRestrictions => &mut self.food_restrictions,
            Category::MedicineAllergies => &mut self.medicine_allergies,
            Category::MedicalConditions => &mut self.medical_conditions,
            Category::Phobias => &mut self.phobias,
        }
    }

    pub fn is_selected(&self, category: Category, id: i64) -> bool {
        self.ids(category).contains(&id)
    }

    /// Flip the selection of one option.
    ///
    /// # Returns
    /// `true` if the option is selected afterwards.
    pub fn toggle(&mut self, category: Category, id: i64) -> bool {
        let ids = self.ids_mut(category);
        if ids.remove(&id) {
            false
        } else {
            ids.insert(id);
            true
        }
    }

    /// Total number of selected ids across all categories.
    pub fn selected_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.ids(*c).len()).sum()
    }

    /// Decode a query string. A leading `?` is ignored.
    ///
    /// Only the first `source` and `target` values are considered, and only
    /// an exact supported code is kept. Unknown keys are ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut state = SelectionState::default();
        let mut source: Option<String> = None;
        let mut target: Option<String> = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                SOURCE_KEY => {
                    source.get_or_insert_with(|| value.into_owned());
                }
                TARGET_KEY => {
                    target.get_or_insert_with(|| value.into_owned());
                }
                other => {
                    if let Some(category) = Category::from_key(other) {
                        if let Some(id) = parse_id(&value) {
                            state.ids_mut(category).insert(id);
                        }
                    }
                }
            }
        }

        state.source_language = source.as_deref().and_then(Language::parse);
        state.target_language = target.as_deref().and_then(Language::parse);
        state
    }

    /// Encode as a query string, without a leading `?`.
    ///
    /// The default state encodes to the empty string.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some(language) = self.source_language {
            serializer.append_pair(SOURCE_KEY, language.code());
        }
        if let Some(language) = self.target_language {
            serializer.append_pair(TARGET_KEY, language.code());
        }

        for category in Category::ALL {
            for id in self.ids(category) {
                serializer.append_pair(category.key(), &id.to_string());
            }
        }

        serializer.finish()
    }
}

/// Parse the leading base-10 integer of a token.
///
/// Leading whitespace and a sign are allowed and trailing text is ignored, so
/// `12abc` reads as 12 and `1.5` as 1. Tokens without leading digits are
/// dropped. Values beyond the `i64` range saturate.
fn parse_id(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }

    match trimmed[..sign_len + digits_len].parse::<i64>() {
        Ok(id) => Some(id),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
