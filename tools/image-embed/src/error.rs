//! Error type for the embedder

use std::path::PathBuf;

/// Everything that can abort a generator run.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("Invalid source pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to enumerate {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Symbol '{symbol}' derived from both {} and {}", first.display(), second.display())]
    SymbolCollision {
        symbol: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Symbol '{symbol}' derived from {} is reserved", path.display())]
    ReservedSymbol { symbol: String, path: PathBuf },

    #[error("Target {} must have a .{expected} extension", path.display())]
    TargetExtension { path: PathBuf, expected: String },

    #[error("Failed to format generated source: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, EmbedError>;
