//! Songbook splitting.
//!
//! An `.irealb` export packs many songs into one percent-encoded
//! `irealb://` url. Songs are separated by `===`; within a song the
//! components are `=`-separated, with a fixed junk marker spliced in
//! before the obfuscated chart text.

use crate::error::ChartError;
use crate::song::{parse_song, Song};

/// Marker spliced in front of the chart text by songbook exports.
const JUNK_MARKER: &str = "1r34LbKcu7";

/// Split a songbook url into its songs, parsing each in turn.
///
/// A malformed song yields an `Err` entry in place and never aborts the
/// rest of the book. Fragments without enough components to name a song
/// are skipped.
pub fn parse_songbook(text: &str) -> Vec<Result<Song, ChartError>> {
    text.split("irealb://")
        .flat_map(|part| part.split("==="))
        .filter_map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Option<Result<Song, ChartError>> {
    let decoded = percent_decode(entry);
    let normalized = decoded.replace(JUNK_MARKER, "=");
    let components: Vec<&str> = normalized
        .split('=')
        .filter(|component| !component.is_empty())
        .collect();
    if components.len() < 5 {
        return None;
    }

    // Older exports leave the unused `n` marker in as its own component.
    let chart = if components.len() > 5 && components[4] == "n" {
        components[5]
    } else {
        components[4]
    };
    let url = format!(
        "irealbook://{}={}={}={}=n={}",
        components[0], components[1], components[2], components[3], chart
    );
    Some(parse_song(&url))
}

/// Decode `%XX` escapes; malformed escapes pass through unchanged.
fn percent_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
