//! Chart playback.
//!
//! Replays a token sequence into the linear chord sequence actually
//! performed. A repeat section (`{` ... `}`) plays exactly twice: on
//! reaching the closing bar line both markers are retired and the cursor
//! rewinds to just past the opening one, so no third pass can occur.
//! Repeat-count staff text (`<3x>`) is tokenized upstream but not
//! consumed here; sections always play twice.

use crate::chord::Chord;
use crate::song::{Song, SongChart};
use crate::token::{Token, TokenKind};

/// Iterator over the chords of a chart in performance order.
///
/// Lazy and finite: each slot is visited at most twice (once forward,
/// once during a repeat rewind). The player owns a private copy of the
/// chart's tokens plus the retired-marker state, and is good for exactly
/// one playback; construct a fresh player per playback.
///
/// Playback is defined for charts of chord, time signature and repeat
/// bar line tokens. Any other token kind ends the sequence immediately.
pub struct Player {
    tokens: Vec<Token>,
    retired: Vec<bool>,
    index: usize,
    completed: bool,
}

impl Player {
    pub fn new(chart: &SongChart) -> Self {
        Self {
            tokens: chart.tokens.clone(),
            retired: vec![false; chart.tokens.len()],
            index: 0,
            completed: chart.tokens.is_empty(),
        }
    }

    fn forward(&mut self) -> bool {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
            true
        } else {
            self.completed = true;
            false
        }
    }

    fn backward(&mut self) -> bool {
        if self.index > 1 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Retire the closing bar line under the cursor, scan backward for an
    /// open repeat bar line and retire the slot the scan stops on. Slot 0
    /// is never revisited by a backward scan, so a chart may not open a
    /// repeat on its very first token.
    fn rewind_to_open(&mut self) {
        self.retired[self.index] = true;
        while !(self.tokens[self.index].kind == TokenKind::BarLineOpen
            && !self.retired[self.index])
        {
            if !self.backward() {
                break;
            }
        }
        self.retired[self.index] = true;
    }
}

impl Iterator for Player {
    type Item = Chord;

    fn next(&mut self) -> Option<Chord> {
        while !self.completed {
            if self.retired[self.index] {
                // Retired repeat markers are passed over like unknowns.
                if !self.forward() {
                    return None;
                }
                continue;
            }
            match self.tokens[self.index].kind {
                TokenKind::Chord => {
                    match Chord::parse(&self.tokens[self.index].symbol) {
                        Ok(chord) => {
                            self.forward();
                            return Some(chord);
                        }
                        Err(_) => {
                            self.completed = true;
                            return None;
                        }
                    }
                }
                TokenKind::BarLineClose => self.rewind_to_open(),
                TokenKind::BarLineOpen | TokenKind::TimeSignature | TokenKind::Unknown => {}
                _ => {
                    self.completed = true;
                    return None;
                }
            }
            if !self.forward() {
                return None;
            }
        }
        None
    }
}

/// Play a song's chart to completion, collecting the performed chords.
pub fn play(song: &Song) -> Vec<Chord> {
    Player::new(&song.chart).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::PitchClass;

    fn chord(symbol: &str) -> Token {
        Token::new(TokenKind::Chord, symbol)
    }

    fn chart(tokens: Vec<Token>) -> SongChart {
        SongChart {
            raw: String::new(),
            decoded: String::new(),
            tokens,
        }
    }

    fn roots(chart: &SongChart) -> Vec<PitchClass> {
        Player::new(chart).map(|chord| chord.root).collect()
    }

    #[test]
    fn test_linear_chart() {
        let chart = chart(vec![chord("C"), chord("F"), chord("G"), chord("C")]);
        assert_eq!(
            roots(&chart),
            vec![PitchClass::C, PitchClass::F, PitchClass::G, PitchClass::C]
        );
        for played in Player::new(&chart) {
            assert_eq!(played.quality, "");
        }
    }

    #[test]
    fn test_repeated_section_plays_twice() {
        let chart = chart(vec![
            chord("C"),
            Token::new(TokenKind::BarLineOpen, "{"),
            chord("F"),
            chord("G"),
            Token::new(TokenKind::BarLineClose, "}"),
            chord("C"),
        ]);
        assert_eq!(
            roots(&chart),
            vec![
                PitchClass::C,
                PitchClass::F,
                PitchClass::G,
                PitchClass::F,
                PitchClass::G,
                PitchClass::C,
            ]
        );
    }

    #[test]
    fn test_consecutive_repeat_sections() {
        let chart = chart(vec![
            chord("C"),
            Token::new(TokenKind::BarLineOpen, "{"),
            chord("F"),
            Token::new(TokenKind::BarLineClose, "}"),
            Token::new(TokenKind::BarLineOpen, "{"),
            chord("G"),
            Token::new(TokenKind::BarLineClose, "}"),
        ]);
        assert_eq!(
            roots(&chart),
            vec![
                PitchClass::C,
                PitchClass::F,
                PitchClass::F,
                PitchClass::G,
                PitchClass::G,
            ]
        );
    }

    #[test]
    fn test_time_signatures_and_open_bars_skipped() {
        let chart = chart(vec![
            Token::new(TokenKind::TimeSignature, "T44"),
            Token::new(TokenKind::BarLineOpen, "{"),
            chord("D-9"),
            Token::new(TokenKind::Unknown, "?"),
            chord("G7"),
            Token::new(TokenKind::BarLineClose, "}"),
        ]);
        assert_eq!(
            roots(&chart),
            vec![PitchClass::D, PitchClass::G, PitchClass::D, PitchClass::G]
        );
    }

    #[test]
    fn test_unsupported_kind_ends_playback() {
        let chart = chart(vec![
            chord("C"),
            Token::new(TokenKind::StaffDirective, "<D.C. al Coda>"),
            chord("F"),
        ]);
        assert_eq!(roots(&chart), vec![PitchClass::C]);
    }

    #[test]
    fn test_no_chord_ends_playback() {
        let chart = chart(vec![chord("C"), Token::new(TokenKind::NoChord, "n"), chord("F")]);
        assert_eq!(roots(&chart), vec![PitchClass::C]);
    }

    #[test]
    fn test_empty_chart() {
        assert!(roots(&chart(vec![])).is_empty());
    }

    #[test]
    fn test_exhausted_player_stays_done() {
        let mut player = Player::new(&chart(vec![chord("C")]));
        assert!(player.next().is_some());
        assert!(player.next().is_none());
        assert!(player.next().is_none());
    }

    #[test]
    fn test_fresh_player_replays_identically() {
        let chart = chart(vec![
            chord("C"),
            Token::new(TokenKind::BarLineOpen, "{"),
            chord("F"),
            Token::new(TokenKind::BarLineClose, "}"),
        ]);
        let first = roots(&chart);
        assert_eq!(
            first,
            vec![PitchClass::C, PitchClass::F, PitchClass::F]
        );
        assert_eq!(roots(&chart), first);
    }
}
