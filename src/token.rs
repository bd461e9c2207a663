use serde::Serialize;

/// Classification of a chart symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Opening repeat bar line `{`
    BarLineOpen,
    /// Closing repeat bar line `}`
    BarLineClose,
    /// `T44`, `T34`, ... placed before a bar line
    TimeSignature,
    /// Segno `S` or Coda `Q`
    RehearsalMark,
    /// Numbered ending `N1`..`N3`, or `N0` for an ending without text
    Ending,
    /// Recognized staff text such as `<D.S. al Coda>`
    StaffDirective,
    /// Repeat-count staff text `<1x>`..`<8x>`
    RepeatCount,
    Chord,
    /// The `n` (N.C.) symbol
    NoChord,
    /// `x` repeats one measure, `r` the previous two
    RepeatSymbol,
    Unknown,
}

/// A chart symbol together with its classification.
///
/// Two tokens are equal iff both the kind and the exact matched text are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub symbol: String,
}

impl Token {
    pub fn new(kind: TokenKind, symbol: impl Into<String>) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
        }
    }
}
