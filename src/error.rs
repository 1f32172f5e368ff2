use std::path::PathBuf;
use thiserror::Error;

/// Errors from walking, loading and writing the page tree
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("page directory not found: {}", .0.display())]
    MissingAppDir(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid base URL '{0}': expected http:// or https:// followed by a host")]
    InvalidBaseUrl(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse page {}: {source}", path.display())]
    PageParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize page {route}: {source}")]
    PageSerialize {
        route: String,
        #[source]
        source: toml::ser::Error,
    },
}

impl SiteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from laying out a register bit-field diagram
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitFieldError {
    #[error("register width {0} is outside 1..=64")]
    BadWidth(u8),

    #[error("field '{name}' has high bit {high} below low bit {low}")]
    Inverted { name: String, high: u8, low: u8 },

    #[error("field '{name}' bit {high} does not fit a {width}-bit register")]
    OutOfRange { name: String, high: u8, width: u8 },

    #[error("fields '{first}' and '{second}' overlap at bit {bit}")]
    Overlap {
        first: String,
        second: String,
        bit: u8,
    },
}
