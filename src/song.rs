//! Song url parsing.
//!
//! An `irealbook://` url carries six `=`-separated components: title,
//! composer, style, key signature, an unused `n` marker, and the
//! obfuscated chord progression. The progression is deciphered and
//! tokenized here; everything else is carried through verbatim.

use serde::Serialize;

use crate::chord::KeySignature;
use crate::cipher;
use crate::error::ChartError;
use crate::token::Token;
use crate::tokenizer;

const SCHEME: &str = "irealbook://";

/// A tokenized chord progression, together with the text stages it was
/// derived from. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongChart {
    pub raw: String,
    pub decoded: String,
    pub tokens: Vec<Token>,
}

/// A parsed song. Created once by [`parse_song`]; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub title: String,
    pub composer: String,
    pub style: String,
    pub key_signature: KeySignature,
    pub chart: SongChart,
}

/// Parse a single `irealbook://` song url.
///
/// Fails on a wrong scheme, a component count other than 6, or an
/// unrecognized key signature. A chart whose symbols are partly
/// unrecognized still parses; unmatched symbols are dropped by the
/// tokenizer.
pub fn parse_song(url: &str) -> Result<Song, ChartError> {
    let components: Vec<&str> = url
        .strip_prefix(SCHEME)
        .ok_or_else(|| ChartError::InvalidScheme(url.to_string()))?
        .split('=')
        .collect();

    if components.len() != 6 {
        return Err(ChartError::ComponentCount {
            found: components.len(),
            expected: 6,
        });
    }

    // components[4] is the unused `n` marker.
    Ok(Song {
        title: components[0].to_string(),
        composer: components[1].to_string(),
        style: components[2].to_string(),
        key_signature: KeySignature::from_text(components[3])?,
        chart: parse_chart(components[5]),
    })
}

fn parse_chart(raw: &str) -> SongChart {
    let decoded = cipher::decode(raw);
    let tokens = tokenizer::tokenize(&decoded);
    SongChart {
        raw: raw.to_string(),
        decoded,
        tokens,
    }
}
