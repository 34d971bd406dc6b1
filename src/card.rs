//! Card projection: selection + target-language content → display sections.

use crate::content::{Category, LanguageData, OptionEntry};
use crate::selection::SelectionState;
use serde::Serialize;

/// One rendered category of a card, in the target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSection {
    #[serde(rename = "key")]
    pub category: Category,
    pub label: String,
    pub options: Vec<OptionEntry>,
}

/// Build the sections of a card.
///
/// Categories follow [`Category::ALL`]; options follow the content's order,
/// not the order they were selected in. Selected ids the target language does
/// not list are skipped, and categories left with no options are omitted.
/// No language data (target not chosen yet) means no sections.
pub fn build_card_sections(
    data: Option<&LanguageData>,
    state: &SelectionState,
) -> Vec<CardSection> {
    let Some(data) = data else {
        return Vec::new();
    };

    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let content = data.categories.get(category);
            let selected = state.ids(category);

            let options: Vec<OptionEntry> = content
                .options
                .iter()
                .filter(|option| selected.contains(&option.id))
                .cloned()
                .collect();

            (!options.is_empty()).then(|| CardSection {
                category,
                label: content.label.clone(),
                options,
            })
        })
        .collect()
}

/// Selected ids that produced no option on the card, per category.
///
/// Not an error: links outlive content revisions. Callers may log these.
pub fn unmatched_ids(data: &LanguageData, state: &SelectionState) -> Vec<(Category, i64)> {
    Category::ALL
        .into_iter()
        .flat_map(|category| {
            let options = &data.categories.get(category).options;
            state
                .ids(category)
                .iter()
                .filter(|id| !options.iter().any(|option| option.id == **id))
                .map(move |id| (category, *id))
                .collect::<Vec<_>>()
        })
        .collect()
}
