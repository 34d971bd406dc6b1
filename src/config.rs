use crate::i18n::Language;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Content
    /// Directory holding `<code>.json` content files; embedded content when unset
    pub content_dir: Option<String>,

    /// Builder language when a link carries no `source`
    pub default_source_language: Language,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Content
            content_dir: content_dir_from_env(),
            default_source_language: match std::env::var("DEFAULT_SOURCE_LANGUAGE") {
                Ok(code) => Language::from_code(&code)
                    .context("DEFAULT_SOURCE_LANGUAGE must be one of en, es, zh-Hant, zh-Hans")?,
                Err(_) => Language::canonical(),
            },
        })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `CONTENT_DIR`, treating a blank value as unset.
pub fn content_dir_from_env() -> Option<String> {
    std::env::var("CONTENT_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
}
