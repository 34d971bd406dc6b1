//! Preview binary - prints the card a share link describes
//!
//! Usage:
//!   cargo run --bin preview -- "source=en&target=es&allergies=1&phobias=2"
//!   cargo run --bin preview -- "allergies=1" --target zh-Hant
//!
//! Optional:
//! - CONTENT_DIR (read content JSON files from this directory)

use anyhow::{bail, Context, Result};
use disclosure_card::card::{build_card_sections, unmatched_ids, CardSection};
use disclosure_card::config;
use disclosure_card::content::ContentStore;
use disclosure_card::i18n::Language;
use disclosure_card::routes::AppRoute;
use disclosure_card::selection::SelectionState;
use tracing::{info, warn};

/// Parsed command line
struct PreviewArgs {
    query: String,
    target: Option<Language>,
}

impl PreviewArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut query = None;
        let mut target = None;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if arg == "--target" {
                let code = iter.next().context("--target requires a language code")?;
                target = Some(Language::from_code(code)?);
            } else if query.is_none() {
                query = Some(arg.clone());
            } else {
                bail!("Unexpected argument: {}", arg);
            }
        }

        Ok(Self {
            query: query.unwrap_or_default(),
            target,
        })
    }
}

fn format_sections(sections: &[CardSection]) -> String {
    sections
        .iter()
        .map(|section| {
            let options = section
                .options
                .iter()
                .map(|option| format!("  • {}", option.label))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", section.label, options)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("preview=info".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = PreviewArgs::parse(&args)?;

    let content = match config::content_dir_from_env() {
        Some(dir) => ContentStore::from_dir(&dir),
        None => ContentStore::embedded(),
    }
    .context("Failed to load content tables")?;

    let mut selection = SelectionState::from_query(&args.query);
    if let Some(target) = args.target {
        selection.target_language = Some(target);
    }

    info!("Decoded {} selected ids", selection.selected_count());

    let Some(target) = selection.target_language else {
        println!("\nNo target language chosen; the card is empty.");
        println!("Add target=<code> to the link or pass --target <code>.\n");
        return Ok(());
    };

    let data = content.get(target);
    let sections = build_card_sections(data, &selection);

    if let Some(data) = data {
        for (category, id) in unmatched_ids(data, &selection) {
            warn!("{} has no option {} in {}", category.key(), id, target.name());
        }
    }

    println!();
    println!("=== {} ({}) ===", target.native_name(), target.name());
    println!();
    if sections.is_empty() {
        println!("(nothing selected)");
    } else {
        println!("{}", format_sections(&sections));
    }
    println!();
    println!("Share link: {}", format_share_path(&selection));
    println!();

    Ok(())
}

fn format_share_path(selection: &SelectionState) -> String {
    let path = AppRoute::Card.path();
    let query = selection.to_query();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
