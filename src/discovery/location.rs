//! Shareable query-string form of a [`SelectionState`]
//!
//! The query string is the canonical copy of the selection: it survives
//! reloads and history navigation and can be shared as a link.
//!
//! | key    | value                                                    |
//! |--------|----------------------------------------------------------|
//! | `tags` | selected tags joined with `,`, then percent-encoded      |
//! | `q`    | free-text query, percent-encoded                         |
//! | `page` | 1-based page number                                      |
//!
//! Decoding never fails: unknown keys are ignored, a missing, non-numeric or
//! non-positive `page` becomes 1, empty tag elements are dropped, and a
//! repeated key keeps its first value. The `tags` value is decoded before it
//! is split, so `math%2Cgrade1` and `math,grade1` both select two tags; tags
//! therefore never contain a comma (see [`is_valid_tag`]). Encoding omits empty values and
//! page 1, so the unfiltered first page encodes to the empty string.

use super::selection::SelectionState;
use crate::catalog::{TAG_SEPARATOR, is_valid_tag};

pub const TAGS_KEY: &str = "tags";
pub const QUERY_KEY: &str = "q";
pub const PAGE_KEY: &str = "page";

/// Encode a selection as a query string (without the leading `?`)
#[must_use]
pub fn encode(state: &SelectionState) -> String {
    let mut pairs: Vec<String> = Vec::with_capacity(3);

    if !state.selected_tags.is_empty() {
        let joined = state.selected_tags.join(&TAG_SEPARATOR.to_string());
        pairs.push(format!("{TAGS_KEY}={}", urlencoding::encode(&joined)));
    }
    if !state.search_text.is_empty() {
        pairs.push(format!("{QUERY_KEY}={}", urlencoding::encode(&state.search_text)));
    }
    if state.page > 1 {
        pairs.push(format!("{PAGE_KEY}={}", state.page));
    }

    pairs.join("&")
}

/// Decode a query string into a selection, defaulting anything malformed
#[must_use]
pub fn decode(query: &str) -> SelectionState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut tags: Option<&str> = None;
    let mut search: Option<&str> = None;
    let mut page: Option<&str> = None;

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let slot = match decode_component(key).as_str() {
            TAGS_KEY => &mut tags,
            QUERY_KEY => &mut search,
            PAGE_KEY => &mut page,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    let mut state = SelectionState::new();
    if let Some(raw) = tags {
        for tag in decode_component(raw).split(TAG_SEPARATOR) {
            if is_valid_tag(tag) {
                state.select_tag(tag.to_string());
            }
        }
    }
    if let Some(raw) = search {
        state.search_text = decode_component(raw);
    }
    state.page = page.map_or(1, parse_page);
    state
}

/// Path to the catalog page for `state`, e.g. `/?tags=math`
#[must_use]
pub fn share_path(state: &SelectionState) -> String {
    let query = encode(state);
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}

fn parse_page(raw: &str) -> usize {
    match decode_component(raw).trim().parse::<usize>() {
        Ok(page) if page >= 1 => page,
        _ => {
            tracing::debug!(page = raw, "ignoring invalid page in location");
            1
        }
    }
}

/// Percent-decode a form component; `+` is a space
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned(),
    }
}
