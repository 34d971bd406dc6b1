//! Which view a URL opens: the card builder ("maker") or the finished card.

use serde::Serialize;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRoute {
    #[default]
    Maker,
    Card,
}

impl AppRoute {
    /// Classify a path. Only `/card` (with any trailing slashes) is the card.
    pub fn from_path(path: &str) -> AppRoute {
        if normalize_path(path) == "/card" {
            AppRoute::Card
        } else {
            AppRoute::Maker
        }
    }

    /// Read the `view` query parameter. Anything but exactly `card` is the maker.
    pub fn from_search(query: &str) -> AppRoute {
        let query = query.strip_prefix('?').unwrap_or(query);
        let view = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "view")
            .map(|(_, value)| value);

        match view.as_deref() {
            Some("card") => AppRoute::Card,
            _ => AppRoute::Maker,
        }
    }

    /// Resolve a full location: a `/card` path wins, otherwise `view` decides.
    pub fn resolve(path: &str, query: &str) -> AppRoute {
        match Self::from_path(path) {
            AppRoute::Card => AppRoute::Card,
            AppRoute::Maker => Self::from_search(query),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Card => "/card",
            AppRoute::Maker => "/",
        }
    }
}

fn normalize_path(path: &str) -> &str {
    if path.is_empty() || path == "/" {
        return "/";
    }
    path.trim_end_matches('/')
}
