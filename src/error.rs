use std::path::PathBuf;
use thiserror::Error;

/// Problems with a level template. Raised while parsing, never mid-round.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code:?} at row {row}, column {col}")]
    UnknownCode { code: char, row: usize, col: usize },
    #[error("level has no player start marker")]
    MissingStart,
    #[error("level has more than one player start marker")]
    MultipleStarts,
    #[error("tile unit size must be positive")]
    ZeroUnitSize,
}

/// Startup failures. Any of these stops the game before the window opens.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid level {path}: {source}")]
    Level {
        path: PathBuf,
        #[source]
        source: LevelError,
    },
}
