//! Property-based invariant tests for the selection codec and card projection.
//!
//! 1. decode(encode(s)) == s for non-negative ids
//! 2. decode∘encode is idempotent
//! 3. decode never panics on arbitrary input
//! 4. Tokens that are not integers never reach a category set
//! 5. Card sections follow canonical category order
//! 6. Card sections are never empty
//! 7. Card options are selected, listed in content order
//! 8. Projection is deterministic

use disclosure_card::card::build_card_sections;
use disclosure_card::content::{Category, ContentStore};
use disclosure_card::i18n::Language;
use disclosure_card::selection::SelectionState;
use proptest::prelude::*;
use std::collections::BTreeSet;

// ── Strategies ───────────────────────────────────────────────────────

fn language() -> impl Strategy<Value = Option<Language>> {
    prop::option::of(prop::sample::select(Language::all()))
}

fn state_with_ids(ids: impl Strategy<Value = i64> + Clone) -> impl Strategy<Value = SelectionState> {
    let set = move || prop::collection::btree_set(ids.clone(), 0..8);
    (language(), language(), set(), set(), set(), set(), set()).prop_map(
        |(source, target, allergies, food, medicine, conditions, phobias)| SelectionState {
            source_language: source,
            target_language: target,
            allergies,
            food_restrictions: food,
            medicine_allergies: medicine,
            medical_conditions: conditions,
            phobias,
        },
    )
}

fn any_state() -> impl Strategy<Value = SelectionState> {
    state_with_ids(0..=i64::MAX)
}

/// Small ids so that some match the content tables and some do not.
fn card_state() -> impl Strategy<Value = SelectionState> {
    state_with_ids(0i64..15)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Round trip and idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn decode_encode_round_trips(state in any_state()) {
        let decoded = SelectionState::from_query(&state.to_query());
        prop_assert_eq!(decoded, state);
    }

    #[test]
    fn decode_encode_is_idempotent(state in any_state()) {
        let once = SelectionState::from_query(&state.to_query());
        let twice = SelectionState::from_query(&once.to_query());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn negative_ids_round_trip(ids in prop::collection::btree_set(any::<i64>(), 0..8)) {
        let state = SelectionState { phobias: ids, ..Default::default() };
        prop_assert_eq!(SelectionState::from_query(&state.to_query()), state);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Decoding is total and filters tokens
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn decode_never_panics(query in ".*") {
        let _ = SelectionState::from_query(&query);
    }

    #[test]
    fn non_numeric_tokens_are_dropped(token in "[a-zA-Z ]{1,12}", id in 0i64..1000) {
        let query = format!("allergies={}&allergies={}", token.replace(' ', "+"), id);
        let state = SelectionState::from_query(&query);
        prop_assert_eq!(state.allergies, BTreeSet::from([id]));
    }

    #[test]
    fn unsupported_codes_are_absent(code in "[a-z]{3,6}") {
        let state = SelectionState::from_query(&format!("source={}&target={}", code, code));
        prop_assert_eq!(state.source_language, None);
        prop_assert_eq!(state.target_language, None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-8. Card projection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sections_follow_canonical_order(state in card_state()) {
        let store = ContentStore::embedded().unwrap();
        let data = state.target_language.and_then(|l| store.get(l));

        let positions: Vec<usize> = build_card_sections(data, &state)
            .iter()
            .map(|s| Category::ALL.iter().position(|c| *c == s.category).unwrap())
            .collect();

        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sections_are_never_empty(state in card_state()) {
        let store = ContentStore::embedded().unwrap();
        let data = state.target_language.and_then(|l| store.get(l));

        for section in build_card_sections(data, &state) {
            prop_assert!(!section.options.is_empty());
        }
    }

    #[test]
    fn options_are_selected_in_content_order(state in card_state(), language in prop::sample::select(Language::all())) {
        let store = ContentStore::embedded().unwrap();
        let data = store.get(language).unwrap();

        for section in build_card_sections(Some(data), &state) {
            let content: Vec<i64> = data.categories.get(section.category).options.iter().map(|o| o.id).collect();
            let expected: Vec<i64> = content
                .iter()
                .copied()
                .filter(|id| state.is_selected(section.category, *id))
                .collect();
            let actual: Vec<i64> = section.options.iter().map(|o| o.id).collect();

            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn projection_is_deterministic(state in card_state(), language in prop::sample::select(Language::all())) {
        let store = ContentStore::embedded().unwrap();
        let data = store.get(language);

        prop_assert_eq!(build_card_sections(data, &state), build_card_sections(data, &state));
    }
}
