//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for drillfinder using the `clap` crate.
//!
//! # Commands
//!
//! - **search**: Filter drills by tags and text, one page at a time (default)
//! - **tags**: List the tag vocabulary with usage counts
//! - **show**: Print one drill
//! - **open**: Open a drill's document in the default viewer
//! - **config**: Inspect configuration
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use drillfinder::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["drillfinder", "search", "-t", "math", "--tags", "grade1,grade2"]);
//! let params = cli.get_command().get_search_params().unwrap();
//! assert_eq!(params.tags, vec!["math", "grade1", "grade2"]);
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parameters for the search command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Text matched against titles and tags
    pub query: Option<String>,
    /// Tags every result must carry, in selection order
    pub tags: Vec<String>,
    /// Page to show
    pub page: Option<usize>,
    /// Shareable query string to start from
    pub url: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[derive(Parser, Debug)]
#[command(name = "drillfinder")]
#[command(about = "Browse a catalog of printable drills by tag and title", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog JSON file (overrides config)
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log state changes to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Search drills by tag and text
    #[command(visible_alias = "s")]
    Search {
        /// Text to match in titles and tags
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Required tag (repeatable: -t math -t grade1)
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Required tags as a comma separated list
        #[arg(long = "tags", value_name = "TAGS", value_delimiter = ',')]
        tag_list: Vec<String>,

        /// Page to show
        #[arg(short = 'p', long = "page", value_name = "N", value_parser = clap::value_parser!(usize))]
        page: Option<usize>,

        /// Start from a shareable query string (e.g. "?tags=math&page=2")
        #[arg(long = "url", value_name = "QUERY")]
        url: Option<String>,
    },

    /// List tags with the number of drills using each
    #[command(visible_alias = "t")]
    Tags,

    /// Show one drill
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Open a drill's document
    #[command(visible_alias = "o")]
    Open {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Helper method to get search parameters from the search command
    ///
    /// `-t` tags come first, then `--tags` entries; blanks are skipped.
    #[must_use]
    pub fn get_search_params(&self) -> Option<SearchParams> {
        match self {
            Self::Search {
                query,
                tags,
                tag_list,
                page,
                url,
            } => Some(SearchParams {
                query: query.clone(),
                tags: tags
                    .iter()
                    .chain(tag_list)
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
                page: *page,
                url: url.clone(),
            }),
            _ => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to an unfiltered search
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Search {
            query: None,
            tags: Vec::new(),
            tag_list: Vec::new(),
            page: None,
            url: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search() {
        let cli = Cli::parse_from(["drillfinder"]);
        assert!(cli.command.is_none());
        let params = cli.get_command().get_search_params().unwrap();
        assert_eq!(params, SearchParams::default());
    }

    #[test]
    fn test_parse_search_with_repeated_tags() {
        let cli = Cli::parse_from(["drillfinder", "search", "-t", "math", "--tag", "grade1"]);
        let params = cli.get_command().get_search_params().unwrap();
        assert_eq!(params.tags, vec!["math", "grade1"]);
        assert!(params.query.is_none());
    }

    #[test]
    fn test_parse_search_with_tag_list() {
        let cli = Cli::parse_from(["drillfinder", "s", "--tags", "math, grade1,,", "-p", "2"]);
        let params = cli.get_command().get_search_params().unwrap();
        assert_eq!(params.tags, vec!["math", "grade1"]);
        assert_eq!(params.page, Some(2));
    }

    #[test]
    fn test_parse_search_with_query_and_url() {
        let cli = Cli::parse_from([
            "drillfinder",
            "search",
            "kanji reading",
            "--url",
            "?tags=kanji&page=2",
        ]);
        let params = cli.get_command().get_search_params().unwrap();
        assert_eq!(params.query.as_deref(), Some("kanji reading"));
        assert_eq!(params.url.as_deref(), Some("?tags=kanji&page=2"));
    }

    #[test]
    fn test_invalid_page_is_rejected() {
        assert!(Cli::try_parse_from(["drillfinder", "search", "-p", "two"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["drillfinder", "tags", "-q", "--catalog", "/tmp/drills.json", "-v"]);
        assert!(cli.quiet);
        assert!(cli.verbose);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/drills.json")));
        assert_eq!(cli.get_command(), Commands::Tags);
        assert!(cli.get_command().get_search_params().is_none());
    }

    #[test]
    fn test_parse_show_open_config() {
        let cli = Cli::parse_from(["drillfinder", "show", "m1"]);
        assert_eq!(cli.command, Some(Commands::Show { id: "m1".to_string() }));

        let cli = Cli::parse_from(["drillfinder", "o", "m1"]);
        assert_eq!(cli.command, Some(Commands::Open { id: "m1".to_string() }));

        let cli = Cli::parse_from(["drillfinder", "config", "path"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Path
            })
        );
    }
}
