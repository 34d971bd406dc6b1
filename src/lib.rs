//! Multilingual allergy and medical disclosure cards.
//!
//! A card is described entirely by its share link. [`selection`] turns the
//! link into a [`selection::SelectionState`] and back, and [`card`] projects
//! that state onto the target language's [`content`] tables.

pub mod card;
pub mod config;
pub mod content;
pub mod i18n;
pub mod metrics;
pub mod routes;
pub mod selection;
pub mod server;
