//! Chart tokenization.
//!
//! Turns a decoded chord progression into an ordered token sequence.
//!
//! ## Why not a greedy scanner
//! Chord quality suffixes, root letters and structural symbols are
//! prefixes of one another (`7` begins `7sus`, `N` begins nothing but `Y`
//! begins `YY`, a bare `C` is both a chord and the start of `C#-7/Bb`), so
//! a character-by-character greedy scan is ambiguous. Instead the
//! tokenizer inserts delimiters around every symbol that is *not* a chord
//! component and then resolves whole segments by exact lookup against a
//! pre-expanded chord dictionary, turning an ambiguous-grammar problem
//! into exact matching over a large but finite table.
//!
//! ## Pipeline
//! 1. Extract `<...>` spans: recognized staff directives and repeat counts
//!    are swapped for placeholder identifiers and kept aside; all other
//!    bracketed text is dropped.
//! 2. Drop `(...)` spans (ornamental alternate chords).
//! 3. Mask the quality fragments `sus` and `alt` so delimiter insertion
//!    cannot split the chords containing them.
//! 4. Insert delimiters: structural symbols become space-isolated
//!    segments, cosmetic symbols are erased to a space.
//! 5. Split on whitespace and classify each segment through the dispatch
//!    table; segments with no entry are dropped.
//!
//! The output never contains [`TokenKind::Unknown`].

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::token::{Token, TokenKind};

/// Recognized staff directive phrases, as they appear between brackets.
const DIRECTIVE_PHRASES: [&str; 11] = [
    "D.C. al Coda",
    "D.C. al Fine",
    "D.C. al 1st End.",
    "D.C. al 2nd End.",
    "D.C. al 3rd End.",
    "D.S. al Coda",
    "D.S. al Fine",
    "D.S. al 1st End.",
    "D.S. al 2nd End.",
    "D.S. al 3rd End.",
    "Fine",
];

/// Repeat-count phrases: a bracketed `<3x>` asks for 3 passes through the
/// enclosing repeat section.
const REPEAT_COUNT_PHRASES: [&str; 8] = ["1x", "2x", "3x", "4x", "5x", "6x", "7x", "8x"];

/// Time signatures. `T44` is 4/4, `T12` is 12/8.
const TIME_SIGNATURES: [&str; 13] = [
    "T44", "T34", "T24", "T54", "T64", "T74", "T22", "T32", "T58", "T68", "T78", "T98", "T12",
];

/// All recognized chord root (and inversion bass) spellings.
const ROOTS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

/// All recognized chord qualities, including the bare-root empty quality.
const QUALITIES: [&str; 62] = [
    "", "5", "2", "add9", "+", "o", "h", "sus", "^", "-", "^7", "-7", "7", "7sus", "h7", "o7",
    "^9", "^13", "6", "69", "^7#11", "^9#11", "^7#5", "-6", "-69", "-^7", "-^9", "-9", "-11",
    "-7b5", "h9", "-b6", "-#5", "9", "7b9", "7#9", "7#11", "7b5", "7#5", "9#11", "9b5", "9#5",
    "7b13", "7#9#5", "7#9b5", "7#9#11", "7b9#11", "7b9b5", "7b9#5", "7b9#9", "7b9b13", "7alt",
    "13", "13#11", "13b9", "13#9", "7b9sus", "7susadd3", "9sus", "13sus", "7b13sus", "11",
];

/// Symbols that must become standalone tokens; delimiter insertion
/// surrounds each with spaces.
const STANDALONE_SYMBOLS: [&str; 10] = ["{", "}", "S", "Q", "N1", "N2", "N3", "N0", "x", "r"];

/// Cosmetic symbols with no tokenizable meaning; each is erased to a
/// single space. Longer symbols first, so `YYY` wins over `Y`.
const ERASED_SYMBOLS: [&str; 18] = [
    "YYY", "YY", "Y", "*A", "*B", "*C", "*D", "*V", "*i", "|", "[", "]", "Z", "s", "l", "p", ",",
    "f",
];

/// Stand-ins for the `sus` and `alt` quality fragments while delimiters
/// are inserted, and the marker that introduces a protected-span
/// placeholder. Private-use characters never occur in chart text.
const SUS_MASK: char = '\u{e000}';
const ALT_MASK: char = '\u{e001}';
const SPAN_MARK: char = '\u{e002}';

/// Tokenize a decoded chord progression.
///
/// Never fails: segments that match no dispatch entry are dropped.
pub fn tokenize(decoded: &str) -> Vec<Token> {
    let (text, spans) = extract_protected_spans(decoded);
    let text = remove_alternate_chords(&text);
    let text = text.replace("sus", &SUS_MASK.to_string());
    let text = text.replace("alt", &ALT_MASK.to_string());
    let text = insert_delimiters(&text);
    let text = text.replace(SUS_MASK, "sus");
    let text = text.replace(ALT_MASK, "alt");
    text.split_whitespace()
        .filter_map(|segment| classify(segment, &spans))
        .collect()
}

/// Replace recognized `<...>` spans with space-delimited placeholders and
/// collect their tokens; drop every other bracketed span. An unterminated
/// span is dropped to end of input.
fn extract_protected_spans(text: &str) -> (String, Vec<Token>) {
    let mut out = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('>') else {
            return (out, spans);
        };
        let span = &tail[..=end];
        let inner = &span[1..span.len() - 1];
        let kind = if DIRECTIVE_PHRASES.contains(&inner) {
            Some(TokenKind::StaffDirective)
        } else if REPEAT_COUNT_PHRASES.contains(&inner) {
            Some(TokenKind::RepeatCount)
        } else {
            None
        };
        match kind {
            Some(kind) => {
                out.push_str(&format!(" {}{} ", SPAN_MARK, spans.len()));
                spans.push(Token::new(kind, span));
            }
            None => out.push(' '),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    (out, spans)
}

/// Drop `(...)` spans, leaving a space so the neighbours stay separated.
/// An unterminated span is dropped to end of input.
fn remove_alternate_chords(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('(') {
        out.push_str(&rest[..start]);
        out.push(' ');
        let tail = &rest[start..];
        let Some(end) = tail.find(')') else {
            return out;
        };
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Surround standalone-token symbols with spaces and erase cosmetic
/// symbols to a space; everything else passes through untouched.
fn insert_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut rest = text;
    'scan: while let Some(c) = rest.chars().next() {
        for symbol in STANDALONE_SYMBOLS {
            if let Some(tail) = rest.strip_prefix(symbol) {
                out.push(' ');
                out.push_str(symbol);
                out.push(' ');
                rest = tail;
                continue 'scan;
            }
        }
        for symbol in ERASED_SYMBOLS {
            if let Some(tail) = rest.strip_prefix(symbol) {
                out.push(' ');
                rest = tail;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Classify one whitespace-delimited segment, or `None` for segments that
/// produce no token.
fn classify(segment: &str, spans: &[Token]) -> Option<Token> {
    if let Some(index) = segment.strip_prefix(SPAN_MARK) {
        return index.parse::<usize>().ok().and_then(|i| spans.get(i)).cloned();
    }
    let kind = *dispatch_table().get(segment)?;
    Some(Token::new(kind, segment))
}

/// The exact-match dispatch table, built once on first use and shared
/// read-only afterwards.
///
/// Chord entries are the full cross-product of root x quality x inversion
/// suffix; every combination maps to a single Chord token whose symbol is
/// the concatenated text.
fn dispatch_table() -> &'static HashMap<String, TokenKind> {
    static TABLE: OnceLock<HashMap<String, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        table.insert("{".to_string(), TokenKind::BarLineOpen);
        table.insert("}".to_string(), TokenKind::BarLineClose);
        table.insert("S".to_string(), TokenKind::RehearsalMark);
        table.insert("Q".to_string(), TokenKind::RehearsalMark);
        table.insert("n".to_string(), TokenKind::NoChord);
        for symbol in ["N1", "N2", "N3", "N0"] {
            table.insert(symbol.to_string(), TokenKind::Ending);
        }
        for symbol in ["x", "r"] {
            table.insert(symbol.to_string(), TokenKind::RepeatSymbol);
        }
        for symbol in TIME_SIGNATURES {
            table.insert(symbol.to_string(), TokenKind::TimeSignature);
        }
        for root in ROOTS {
            for quality in QUALITIES {
                let base = format!("{root}{quality}");
                for bass in ROOTS {
                    table.insert(format!("{base}/{bass}"), TokenKind::Chord);
                }
                table.insert(base, TokenKind::Chord);
            }
        }
        table
    })
}
