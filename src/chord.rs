//! Chord symbols, pitch classes, key signatures and scale-degree
//! arithmetic.

use serde::Serialize;

use crate::error::ChartError;

/// One of the twelve pitch classes.
///
/// Enharmonic spellings collapse to a single value (C# and Db are the same
/// pitch class), named here by the flat spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PitchClass {
    A,
    Bb,
    B,
    C,
    Db,
    D,
    Eb,
    E,
    F,
    Gb,
    G,
    Ab,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::A,
        PitchClass::Bb,
        PitchClass::B,
        PitchClass::C,
        PitchClass::Db,
        PitchClass::D,
        PitchClass::Eb,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Gb,
        PitchClass::G,
        PitchClass::Ab,
    ];

    /// Semitone index 0..=11, counted up from A.
    pub fn index(self) -> u8 {
        match self {
            PitchClass::A => 0,
            PitchClass::Bb => 1,
            PitchClass::B => 2,
            PitchClass::C => 3,
            PitchClass::Db => 4,
            PitchClass::D => 5,
            PitchClass::Eb => 6,
            PitchClass::E => 7,
            PitchClass::F => 8,
            PitchClass::Gb => 9,
            PitchClass::G => 10,
            PitchClass::Ab => 11,
        }
    }

    /// Parse a root spelling (`C`, `F#`, `Bb`, ...).
    fn from_spelling(spelling: &str) -> Option<PitchClass> {
        match spelling {
            "A" => Some(PitchClass::A),
            "A#" | "Bb" => Some(PitchClass::Bb),
            "B" => Some(PitchClass::B),
            "C" => Some(PitchClass::C),
            "C#" | "Db" => Some(PitchClass::Db),
            "D" => Some(PitchClass::D),
            "D#" | "Eb" => Some(PitchClass::Eb),
            "E" => Some(PitchClass::E),
            "F" => Some(PitchClass::F),
            "F#" | "Gb" => Some(PitchClass::Gb),
            "G" => Some(PitchClass::G),
            "G#" | "Ab" => Some(PitchClass::Ab),
            _ => None,
        }
    }
}

/// One of the 24 key signatures: 12 majors and 12 minors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KeySignature {
    AMajor,
    BFlatMajor,
    BMajor,
    CMajor,
    DFlatMajor,
    DMajor,
    EFlatMajor,
    EMajor,
    FMajor,
    GFlatMajor,
    GMajor,
    AFlatMajor,
    AMinor,
    BFlatMinor,
    BMinor,
    CMinor,
    CSharpMinor,
    DMinor,
    EFlatMinor,
    EMinor,
    FMinor,
    FSharpMinor,
    GMinor,
    GSharpMinor,
}

impl KeySignature {
    pub const ALL: [KeySignature; 24] = [
        KeySignature::AMajor,
        KeySignature::BFlatMajor,
        KeySignature::BMajor,
        KeySignature::CMajor,
        KeySignature::DFlatMajor,
        KeySignature::DMajor,
        KeySignature::EFlatMajor,
        KeySignature::EMajor,
        KeySignature::FMajor,
        KeySignature::GFlatMajor,
        KeySignature::GMajor,
        KeySignature::AFlatMajor,
        KeySignature::AMinor,
        KeySignature::BFlatMinor,
        KeySignature::BMinor,
        KeySignature::CMinor,
        KeySignature::CSharpMinor,
        KeySignature::DMinor,
        KeySignature::EFlatMinor,
        KeySignature::EMinor,
        KeySignature::FMinor,
        KeySignature::FSharpMinor,
        KeySignature::GMinor,
        KeySignature::GSharpMinor,
    ];

    /// Tonic pitch class of the key.
    pub fn tonic(self) -> PitchClass {
        match self {
            KeySignature::AMajor | KeySignature::AMinor => PitchClass::A,
            KeySignature::BFlatMajor | KeySignature::BFlatMinor => PitchClass::Bb,
            KeySignature::BMajor | KeySignature::BMinor => PitchClass::B,
            KeySignature::CMajor | KeySignature::CMinor => PitchClass::C,
            KeySignature::DFlatMajor | KeySignature::CSharpMinor => PitchClass::Db,
            KeySignature::DMajor | KeySignature::DMinor => PitchClass::D,
            KeySignature::EFlatMajor | KeySignature::EFlatMinor => PitchClass::Eb,
            KeySignature::EMajor | KeySignature::EMinor => PitchClass::E,
            KeySignature::FMajor | KeySignature::FMinor => PitchClass::F,
            KeySignature::GFlatMajor | KeySignature::FSharpMinor => PitchClass::Gb,
            KeySignature::GMajor | KeySignature::GMinor => PitchClass::G,
            KeySignature::AFlatMajor | KeySignature::GSharpMinor => PitchClass::Ab,
        }
    }

    /// Parse the key signature field of a song url. Minor keys carry a `-`
    /// suffix (`A-`, `Bb-`); enharmonic spellings map to the same key.
    pub fn from_text(text: &str) -> Result<KeySignature, ChartError> {
        match text {
            "C" => Ok(KeySignature::CMajor),
            "C#" | "Db" => Ok(KeySignature::DFlatMajor),
            "D" => Ok(KeySignature::DMajor),
            "D#" | "Eb" => Ok(KeySignature::EFlatMajor),
            "E" => Ok(KeySignature::EMajor),
            "F" => Ok(KeySignature::FMajor),
            "F#" | "Gb" => Ok(KeySignature::GFlatMajor),
            "G" => Ok(KeySignature::GMajor),
            "G#" | "Ab" => Ok(KeySignature::AFlatMajor),
            "A" => Ok(KeySignature::AMajor),
            "A#" | "Bb" => Ok(KeySignature::BFlatMajor),
            "B" => Ok(KeySignature::BMajor),
            "A-" => Ok(KeySignature::AMinor),
            "A#-" | "Bb-" => Ok(KeySignature::BFlatMinor),
            "B-" => Ok(KeySignature::BMinor),
            "C-" => Ok(KeySignature::CMinor),
            "C#-" | "Db-" => Ok(KeySignature::CSharpMinor),
            "D-" => Ok(KeySignature::DMinor),
            "D#-" | "Eb-" => Ok(KeySignature::EFlatMinor),
            "E-" => Ok(KeySignature::EMinor),
            "F-" => Ok(KeySignature::FMinor),
            "F#-" | "Gb-" => Ok(KeySignature::FSharpMinor),
            "G-" => Ok(KeySignature::GMinor),
            "G#-" | "Ab-" => Ok(KeySignature::GSharpMinor),
            other => Err(ChartError::UnknownKeySignature(other.to_string())),
        }
    }
}

/// A chord: root, quality text and inversion bass note.
///
/// The inversion defaults to the root when the symbol carries no `/bass`
/// suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Chord {
    pub root: PitchClass,
    pub quality: String,
    pub inversion: PitchClass,
}

impl Chord {
    /// Parse a chord symbol of the form `root [quality] [/bass]`.
    ///
    /// Fails when the root or bass is not a recognized spelling, or when
    /// more than one `/` is present. The tokenizer only emits symbols
    /// drawn from the same spellings, so for those this cannot fail; it is
    /// a defensive boundary for symbols supplied directly by callers.
    pub fn parse(symbol: &str) -> Result<Chord, ChartError> {
        let bad = || ChartError::ChordFormat(symbol.to_string());

        let (root, rest) = split_root(symbol).ok_or_else(bad)?;
        let (quality, inversion) = match rest.split_once('/') {
            Some((quality, bass)) => {
                let bass = PitchClass::from_spelling(bass).ok_or_else(bad)?;
                (quality, bass)
            }
            None => (rest, root),
        };
        Ok(Chord {
            root,
            quality: quality.to_string(),
            inversion,
        })
    }

    /// Semitone offset of the chord root from the key's tonic, always in
    /// `[0, 11]`.
    pub fn degree(&self, key: KeySignature) -> u8 {
        (self.root.index() + 12 - key.tonic().index()) % 12
    }
}

/// Split a symbol into its leading root spelling and the remainder. The
/// two-character spellings (`F#`, `Bb`) win over the bare letter.
fn split_root(symbol: &str) -> Option<(PitchClass, &str)> {
    if let Some(root) = symbol.get(..2).and_then(PitchClass::from_spelling) {
        return Some((root, &symbol[2..]));
    }
    symbol
        .get(..1)
        .and_then(PitchClass::from_spelling)
        .map(|root| (root, &symbol[1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_root() {
        let chord = Chord::parse("C").unwrap();
        assert_eq!(chord.root, PitchClass::C);
        assert_eq!(chord.quality, "");
        assert_eq!(chord.inversion, PitchClass::C);
    }

    #[test]
    fn test_parse_root_and_quality() {
        let chord = Chord::parse("A-7").unwrap();
        assert_eq!(chord.root, PitchClass::A);
        assert_eq!(chord.quality, "-7");
        assert_eq!(chord.inversion, PitchClass::A);
    }

    #[test]
    fn test_parse_inversion() {
        let chord = Chord::parse("C-7/Bb").unwrap();
        assert_eq!(chord.root, PitchClass::C);
        assert_eq!(chord.quality, "-7");
        assert_eq!(chord.inversion, PitchClass::Bb);
    }

    #[test]
    fn test_parse_inversion_without_quality() {
        let chord = Chord::parse("C/E").unwrap();
        assert_eq!(chord.root, PitchClass::C);
        assert_eq!(chord.quality, "");
        assert_eq!(chord.inversion, PitchClass::E);
    }

    #[test]
    fn test_parse_two_character_root() {
        let chord = Chord::parse("Bb7").unwrap();
        assert_eq!(chord.root, PitchClass::Bb);
        assert_eq!(chord.quality, "7");
    }

    #[test]
    fn test_enharmonic_roots_collapse() {
        assert_eq!(
            Chord::parse("C#7").unwrap().root,
            Chord::parse("Db7").unwrap().root
        );
        assert_eq!(
            Chord::parse("G#").unwrap().root,
            Chord::parse("Ab").unwrap().root
        );
    }

    #[test]
    fn test_parse_rejects_bad_symbols() {
        assert!(Chord::parse("").is_err());
        assert!(Chord::parse("H7").is_err());
        assert!(Chord::parse("C/H").is_err());
        assert!(Chord::parse("C/E/G").is_err());
    }

    #[test]
    fn test_degree_in_c_major() {
        let g7 = Chord::parse("G7").unwrap();
        assert_eq!(g7.degree(KeySignature::CMajor), 7);
        let tonic = Chord::parse("C").unwrap();
        assert_eq!(tonic.degree(KeySignature::CMajor), 0);
        let flat_six = Chord::parse("Ab").unwrap();
        assert_eq!(flat_six.degree(KeySignature::CMajor), 8);
    }

    #[test]
    fn test_degree_always_in_range() {
        for root in PitchClass::ALL {
            for key in KeySignature::ALL {
                let chord = Chord {
                    root,
                    quality: String::new(),
                    inversion: root,
                };
                assert!(chord.degree(key) < 12);
            }
        }
    }

    #[test]
    fn test_key_text_round_trip() {
        assert_eq!(
            KeySignature::from_text("Ab").unwrap(),
            KeySignature::AFlatMajor
        );
        assert_eq!(
            KeySignature::from_text("C#-").unwrap(),
            KeySignature::CSharpMinor
        );
        assert_eq!(
            KeySignature::from_text("Gb-").unwrap(),
            KeySignature::FSharpMinor
        );
        assert!(KeySignature::from_text("H").is_err());
        assert!(KeySignature::from_text("").is_err());
    }

    #[test]
    fn test_enharmonic_keys_share_tonic() {
        assert_eq!(
            KeySignature::from_text("C#").unwrap(),
            KeySignature::from_text("Db").unwrap()
        );
        assert_eq!(
            KeySignature::DFlatMajor.tonic(),
            KeySignature::CSharpMinor.tonic()
        );
    }
}
