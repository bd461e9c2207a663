//! Catalog statistics.
//!
//! Renders a parsed catalog as a `;`-separated table: one line per song
//! with its category ids, a chord-degree histogram over the performed
//! (repeat-resolved) sequence, and per-quality chord counts. Quality
//! columns are ordered by descending frequency across the whole catalog.

use std::collections::HashMap;
use std::hash::Hash;

use crate::player;
use crate::song::Song;
use crate::token::TokenKind;

/// Render catalog statistics as CSV.
pub fn catalog_csv(songs: &[Song]) -> String {
    let played: Vec<_> = songs.iter().map(player::play).collect();

    let style_ids = category_ids(songs.iter().map(|song| song.style.clone()));
    let key_ids = category_ids(songs.iter().map(|song| format!("{:?}", song.key_signature)));
    let time_ids = category_ids(songs.iter().map(time_signature));

    let quality_counts = count(played.iter().flatten().map(|chord| chord.quality.clone()));
    let mut qualities: Vec<&String> = quality_counts.keys().collect();
    qualities.sort_by(|a, b| quality_counts[*b].cmp(&quality_counts[*a]).then(a.cmp(b)));

    let mut header: Vec<String> = [
        "Title",
        "Composer",
        "Style",
        "StyleId",
        "KeySignature",
        "KeySignatureId",
        "TimeSignature",
        "TimeSignatureId",
    ]
    .iter()
    .map(|field| field.to_string())
    .collect();
    header.extend((0..12).map(|degree| format!("[{degree}]")));
    header.extend(qualities.iter().map(|quality| quality.to_string()));

    let mut out = csv_line(&header);
    for (song, chords) in songs.iter().zip(&played) {
        let degrees = count(chords.iter().map(|chord| chord.degree(song.key_signature)));
        let song_qualities = count(chords.iter().map(|chord| chord.quality.as_str()));
        let key = format!("{:?}", song.key_signature);
        let time = time_signature(song);

        let mut fields = vec![
            song.title.clone(),
            song.composer.clone(),
            song.style.clone(),
            style_ids[&song.style].to_string(),
            key.clone(),
            key_ids[&key].to_string(),
            time.clone(),
            time_ids[&time].to_string(),
        ];
        fields.extend(
            (0u8..12).map(|degree| degrees.get(&degree).copied().unwrap_or(0).to_string()),
        );
        fields.extend(qualities.iter().map(|quality| {
            song_qualities
                .get(quality.as_str())
                .copied()
                .unwrap_or(0)
                .to_string()
        }));

        out.push('\n');
        out.push_str(&csv_line(&fields));
    }
    out.push('\n');
    out
}

/// First time signature in the chart, or empty when there is none.
fn time_signature(song: &Song) -> String {
    song.chart
        .tokens
        .iter()
        .find(|token| token.kind == TokenKind::TimeSignature)
        .map(|token| token.symbol.clone())
        .unwrap_or_default()
}

/// Count occurrences of each item.
fn count<T: Eq + Hash>(items: impl Iterator<Item = T>) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Assign each distinct category its first-appearance index.
fn category_ids(items: impl Iterator<Item = String>) -> HashMap<String, usize> {
    let mut ids = HashMap::new();
    for item in items {
        let next = ids.len();
        ids.entry(item).or_insert(next);
    }
    ids
}

/// Join fields with `;`, stripping the separator from field text.
fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| field.replace(';', " "))
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::parse_song;

    fn catalog() -> Vec<Song> {
        [
            "irealbook://First=Doe Jane=Swing=C=n=T44{C^7 F G7 }",
            "irealbook://Second=Doe Jane=Ballad=G=n=T34|C^7 D7",
        ]
        .iter()
        .map(|url| parse_song(url).unwrap())
        .collect()
    }

    #[test]
    fn test_header_shape() {
        let csv = catalog_csv(&catalog());
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with(
            "Title;Composer;Style;StyleId;KeySignature;KeySignatureId;TimeSignature;TimeSignatureId;[0]"
        ));
        assert!(header.contains(";[11]"));
        // Quality columns, most common first: `7` and `^7` tie at three
        // apiece, then the empty quality (the plain F chords) renders as
        // a trailing empty column.
        assert!(header.ends_with(";7;^7;"));
    }

    #[test]
    fn test_song_lines() {
        let csv = catalog_csv(&catalog());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("First;Doe Jane;Swing;0;CMajor;0;T44;0"));
        assert!(lines[2].starts_with("Second;Doe Jane;Ballad;1;GMajor;1;T34;1"));
    }

    #[test]
    fn test_degree_histogram_reflects_playback() {
        // The repeat section plays twice, so each chord counts twice.
        let songs = vec![parse_song("irealbook://One=X=Swing=C=n=T44{C F G7 }").unwrap()];
        let csv = catalog_csv(&songs);
        let line: Vec<&str> = csv.lines().nth(1).unwrap().split(';').collect();
        let degrees = &line[8..20];
        // C is the tonic, F is degree 5, G degree 7.
        assert_eq!(degrees[0], "2");
        assert_eq!(degrees[5], "2");
        assert_eq!(degrees[7], "2");
        assert_eq!(degrees[1], "0");
    }

    #[test]
    fn test_fields_are_sanitized() {
        let songs = vec![parse_song("irealbook://One;Two=X=Swing=C=n=C").unwrap()];
        let csv = catalog_csv(&songs);
        assert!(csv.lines().nth(1).unwrap().starts_with("One Two;X;"));
    }

    #[test]
    fn test_empty_catalog() {
        let csv = catalog_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }
}
