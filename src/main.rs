//! Drillfinder CLI application entry point
//!
//! Command-line front end for the discovery controller: every invocation
//! starts a session from the catalog, applies the requested selection and
//! prints one result page.
//!
//! # Usage
//!
//! ```bash
//! # First page of the whole catalog (default command)
//! drillfinder
//!
//! # Drills tagged both math and grade1, second page
//! drillfinder search -t math -t grade1 -p 2
//! drillfinder search --tags math,grade1 -p 2
//!
//! # Text search over titles and tags
//! drillfinder search "kanji reading"
//!
//! # Continue from a shared link
//! drillfinder search --url "?tags=math&q=addition&page=2"
//!
//! # Tag vocabulary, one drill, open its document
//! drillfinder tags
//! drillfinder show m1
//! drillfinder open m1
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/drillfinder/config.toml` on Linux) and `DRILLFINDER_*`
//! environment variables. Set `RUST_LOG` or pass `-v` for diagnostics.

use colored::Colorize;
use drillfinder::{
    DrillfinderError, Result,
    catalog::{CachedCatalog, Catalog, CatalogError, JsonCatalog},
    cli::{Cli, Commands, ConfigCommands, SearchParams},
    config::DrillfinderConfig,
    discovery::{DiscoveryController, DiscoverySettings},
    output, search,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins unless `--verbose` is given; the default level is `warn`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Open the catalog named on the command line or in the config
///
/// # Errors
///
/// Returns `DrillfinderError::InvalidInput` if no catalog location is known.
fn open_catalog(cli: &Cli, config: &DrillfinderConfig) -> Result<CachedCatalog<JsonCatalog>> {
    let path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog_path())
        .ok_or_else(|| {
            DrillfinderError::InvalidInput(
                "No catalog configured. Pass --catalog <PATH> or set `catalog` in the config file.".into(),
            )
        })?;

    tracing::debug!(path = %path.display(), "using catalog");
    Ok(CachedCatalog::with_ttl(JsonCatalog::new(path), config.cache_ttl()))
}

/// Handle the search command - print one page of results
///
/// The session starts from `--url` (if any); explicit tags, query and page
/// are then applied on top, in that order.
fn handle_search_command(
    catalog: &impl Catalog,
    settings: DiscoverySettings,
    params: &SearchParams,
    quiet: bool,
) {
    let mut controller = DiscoveryController::builder()
        .catalog(catalog)
        .settings(settings)
        .location(params.url.clone().unwrap_or_default())
        .build();

    for tag in &params.tags {
        if !controller.selection().is_selected(tag) {
            controller.toggle_tag(tag);
        }
    }
    if let Some(query) = &params.query {
        controller.set_search_text(query.as_str());
        controller.flush_search();
    }
    if let Some(page) = params.page {
        controller.request_page(page);
    }

    let view = controller.current_view();

    if quiet {
        for drill in &view.page_items {
            println!("{}", output::drill_line(drill, true));
        }
        return;
    }

    let selection = controller.selection();
    if !selection.selected_tags.is_empty() {
        println!("Tags: {}", selection.selected_tags.join(" + ").green());
    }
    if !selection.search_text.trim().is_empty() {
        println!("Search: '{}'", selection.search_text);
    }
    println!("{}", output::page_summary(view).bold());

    if view.is_empty() {
        println!("  No drills match the current selection.");
        if let Some(hint) = output::no_results_hint(selection) {
            println!("  {}", hint.dimmed());
        }
    }
    for drill in &view.page_items {
        println!("{}", output::drill_line(drill, false));
    }
    if let Some(nav) = output::page_nav(view) {
        println!("{}", nav.dimmed());
    }

    if !controller.vocabulary().is_empty() {
        println!("\n=== Tags ===");
        for line in output::tag_picker(controller.vocabulary(), selection, view) {
            println!("  {line}");
        }
    }

    println!("\nShare: {}", controller.share_path());
}

/// Handle the tags command - list the vocabulary with usage counts
///
/// # Errors
///
/// Returns `DrillfinderError` if the catalog cannot be read.
fn handle_tags_command(catalog: &impl Catalog, quiet: bool) -> Result<()> {
    let drills = catalog.list_all()?;
    let counts = search::tag_counts(&drills);

    if counts.is_empty() {
        if !quiet {
            println!("No tags found in the catalog");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in catalog ({}):", counts.len());
    }
    for (tag, count) in counts {
        println!("{}", output::tag_with_count(&tag, count, quiet));
    }
    Ok(())
}

/// Look up a drill or fail with `NotFound`
fn find_drill(catalog: &impl Catalog, id: &str) -> Result<drillfinder::Drill> {
    catalog
        .get_by_id(id)?
        .ok_or_else(|| CatalogError::NotFound(id.to_string()).into())
}

/// Handle the show command - print one drill
///
/// # Errors
///
/// Returns `DrillfinderError` if the catalog cannot be read or has no such drill.
fn handle_show_command(catalog: &impl Catalog, id: &str) -> Result<()> {
    let drill = find_drill(catalog, id)?;
    println!("{}", output::drill_detail(&drill));
    Ok(())
}

/// Handle the open command - open a drill's document in the default viewer
///
/// # Errors
///
/// Returns `DrillfinderError` if the drill is unknown, has no document, or the
/// viewer cannot be launched.
fn handle_open_command(catalog: &impl Catalog, id: &str, quiet: bool) -> Result<()> {
    let drill = find_drill(catalog, id)?;
    if drill.document_url.is_empty() {
        return Err(DrillfinderError::InvalidInput(format!(
            "Drill '{id}' has no document"
        )));
    }

    if !quiet {
        println!("Opening {}", drill.document_url);
    }
    open::that(&drill.document_url)?;
    Ok(())
}

/// Handle the config command
///
/// # Errors
///
/// Returns `DrillfinderError` if the configuration cannot be serialized or
/// the config directory cannot be determined.
fn handle_config_command(config: &DrillfinderConfig, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let text = toml::to_string_pretty(config).map_err(|e| {
                ::config::ConfigError::Message(format!("Failed to serialize config: {e}"))
            })?;
            print!("{text}");
        }
        ConfigCommands::Path => {
            println!("{}", DrillfinderConfig::config_path()?.display());
        }
    }
    Ok(())
}

/// Main entry point for the drillfinder application
///
/// # Errors
///
/// Returns `DrillfinderError` if configuration loading fails or any command
/// handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let config = DrillfinderConfig::load()?;
    let command = cli.get_command();

    match &command {
        Commands::Search { .. } => {
            let params = command
                .get_search_params()
                .ok_or_else(|| DrillfinderError::InvalidInput("Failed to parse search parameters".into()))?;
            let catalog = open_catalog(&cli, &config)?;
            handle_search_command(&catalog, config.discovery_settings(), &params, cli.quiet);
        }
        Commands::Tags => handle_tags_command(&open_catalog(&cli, &config)?, cli.quiet)?,
        Commands::Show { id } => handle_show_command(&open_catalog(&cli, &config)?, id)?,
        Commands::Open { id } => handle_open_command(&open_catalog(&cli, &config)?, id, cli.quiet)?,
        Commands::Config { command } => handle_config_command(&config, command)?,
    }

    Ok(())
}
