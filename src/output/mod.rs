//! Output formatting for CLI display
//!
//! This module provides utilities for formatting drills, tag pickers and
//! result pages in the CLI.

use crate::catalog::Drill;
use crate::discovery::{ResultView, SelectionState};
use colored::Colorize;

/// Format a drill as one result line
#[must_use]
pub fn drill_line(drill: &Drill, quiet: bool) -> String {
    if quiet {
        drill.id.clone()
    } else if drill.tags.is_empty() {
        format!("  {}  {} (no tags)", drill.id.cyan(), drill.title)
    } else {
        format!("  {}  {} [{}]", drill.id.cyan(), drill.title, drill.tags.join(", "))
    }
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} drill(s))")
    }
}

/// Format one entry of the tag picker
///
/// Selected tags are checked, disabled tags are dimmed since choosing them
/// would leave no results.
#[must_use]
pub fn tag_choice(tag: &str, selected: bool, disabled: bool) -> String {
    if selected {
        format!("[x] {}", tag.green().bold())
    } else if disabled {
        format!("[ ] {}", tag.dimmed())
    } else {
        format!("[ ] {tag}")
    }
}

/// Tag picker lines for the whole vocabulary
#[must_use]
pub fn tag_picker(vocabulary: &[String], selection: &SelectionState, view: &ResultView) -> Vec<String> {
    vocabulary
        .iter()
        .map(|tag| tag_choice(tag, selection.is_selected(tag), view.is_disabled(tag)))
        .collect()
}

/// Summary line for a result page, e.g. `Page 2 of 3 (61 drills)`
#[must_use]
pub fn page_summary(view: &ResultView) -> String {
    let noun = if view.result_count() == 1 { "drill" } else { "drills" };
    format!(
        "Page {} of {} ({} {noun})",
        view.page,
        view.total_pages,
        view.result_count()
    )
}

/// Page navigation hint, e.g. `Previous: -p 1 | Next: -p 3`
///
/// `None` when the results fit on a single page.
#[must_use]
pub fn page_nav(view: &ResultView) -> Option<String> {
    let mut parts = Vec::new();
    if view.has_previous() {
        parts.push(format!("Previous: -p {}", view.page - 1));
    }
    if view.has_next() {
        parts.push(format!("Next: -p {}", view.page + 1));
    }
    (!parts.is_empty()).then(|| parts.join(" | "))
}

/// Hint for an empty result page
///
/// Only a filtered selection can be widened; an empty unfiltered catalog
/// gets no hint.
#[must_use]
pub fn no_results_hint(selection: &SelectionState) -> Option<String> {
    selection
        .is_filtered()
        .then(|| "Remove a tag or clear the search to see more.".to_string())
}

/// Multi-line description of a single drill
#[must_use]
pub fn drill_detail(drill: &Drill) -> String {
    let mut lines = vec![
        format!("{} {}", "Title:".bold(), drill.title),
        format!("{} {}", "Id:".bold(), drill.id),
    ];

    let tags = if drill.tags.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        drill.tags.join(", ")
    };
    lines.push(format!("{} {tags}", "Tags:".bold()));

    if let Some(description) = &drill.description {
        lines.push(format!("{} {description}", "About:".bold()));
    }
    if !drill.document_url.is_empty() {
        lines.push(format!("{} {}", "Document:".bold(), drill.document_url.underline()));
    }
    if !drill.thumbnail.url.is_empty() {
        let size = match (drill.thumbnail.width, drill.thumbnail.height) {
            (Some(w), Some(h)) => format!(" ({w}x{h})"),
            _ => String::new(),
        };
        lines.push(format!("{} {}{size}", "Thumbnail:".bold(), drill.thumbnail.url));
    }
    if let Some(modified) = drill.last_modified() {
        lines.push(format!("{} {}", "Updated:".bold(), modified.format("%Y-%m-%d")));
    }

    lines.join("\n")
}
