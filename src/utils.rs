use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

use crate::types::SpotifyTrack;

pub const DEFAULT_INSTRUMENT: &str = "guitar";
const MAX_INSTRUMENT_LEN: usize = 40;

/// Generates an unguessable, URL-safe token from 16 random bytes.
///
/// Used for session ids and OAuth `state` values.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Escapes text for safe use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cleans up the instrument name coming from the query string.
pub fn normalize_instrument(instrument: Option<&str>) -> String {
    let trimmed = instrument.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DEFAULT_INSTRUMENT.to_string();
    }
    trimmed.chars().take(MAX_INSTRUMENT_LEN).collect()
}

/// Upper-cases the first letter of every whitespace separated word.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Removes repeated tracks, keeping the first occurrence of each id.
///
/// Tracks without an id (local files) are always kept.
pub fn remove_duplicate_tracks(tracks: &mut Vec<SpotifyTrack>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| match &track.id {
        Some(id) => seen_ids.insert(id.clone()),
        None => true,
    });
}
