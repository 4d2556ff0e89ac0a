//! Command-line interface definitions for the article crawler.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Flags layer on top of the config file: anything given here wins.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the article crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl every known category for today
/// acervo
///
/// # Crawl two categories for a specific archive date
/// acervo -c mundo -c negocios -d 02102015
///
/// # Put the database somewhere else
/// acervo --database /var/lib/acervo/news.db
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Category to crawl (repeatable); defaults to all known categories
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Listing date token passed through to the archive, e.g. "today"
    #[arg(short, long, default_value = "today")]
    pub date: String,

    /// Path of the SQLite database file
    #[arg(long, env = "ACERVO_DATABASE")]
    pub database: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["acervo"]);
        assert!(cli.categories.is_empty());
        assert_eq!(cli.date, "today");
        assert!(cli.database.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_repeatable_categories() {
        let cli = Cli::parse_from(&["acervo", "-c", "mundo", "-c", "negocios"]);
        assert_eq!(cli.categories, vec!["mundo", "negocios"]);
    }

    #[test]
    fn test_cli_date_and_database() {
        let cli = Cli::parse_from(&[
            "acervo",
            "--date",
            "02102015",
            "--database",
            "/tmp/news.db",
        ]);
        assert_eq!(cli.date, "02102015");
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/news.db")));
    }
}
