use std::path::PathBuf;

use awstape_format::{DecodeError, TransformError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open tape image `{}`", .path.display())]
    OpenTape {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read tape image `{}`", .path.display())]
    ReadTape {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Cannot create tape image `{}`", .path.display())]
    CreateTape {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write to tape image `{}`", .path.display())]
    WriteTape {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tape image already exists: `{}`", .path.display())]
    TapeExists { path: PathBuf },

    #[error("Refusing to store the tape image `{}` inside itself", .path.display())]
    SelfInclusion { path: PathBuf },

    #[error("Block size must not be zero")]
    InvalidBlockSize,

    #[error("Cannot open file `{}`", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create file `{}`", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create directory `{}`", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot convert `{}`", .path.display())]
    Convert {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot convert record data")]
    Transform(#[from] TransformError),

    #[error("Cannot write output")]
    Output(#[source] std::io::Error),

    #[error("Cannot serialize block as JSON")]
    Json(#[from] serde_json::Error),
}
