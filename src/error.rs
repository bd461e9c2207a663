use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Song url has invalid scheme: {0}")]
    InvalidScheme(String),

    #[error("Song url has {found} components - expecting {expected}")]
    ComponentCount { found: usize, expected: usize },

    #[error("Unknown key signature: {0}")]
    UnknownKeySignature(String),

    #[error("Failed to parse chord symbol: {0}")]
    ChordFormat(String),
}
