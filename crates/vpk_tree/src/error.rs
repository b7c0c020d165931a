//! Error types that can be emitted from this library

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is an invalid vpk directory file
    #[error("file is an invalid vpk directory file")]
    InvalidArchive,

    /// unsupported vpk version {0}
    #[error("unsupported vpk version {0}")]
    #[diagnostic(help("only version 1 and version 2 directory files can be read"))]
    UnsupportedVersion(u32),

    /// error reading {token} name
    #[error("error reading {token} name")]
    Stream {
        /// The token that was being read
        token: NameToken,
        #[source]
        source: std::io::Error,
    },

    /// stream ended inside a {token} name
    #[error("stream ended inside a {token} name")]
    UnexpectedEof {
        /// The token that was cut short
        token: NameToken,
    },

    /// {token} name is not valid utf-8
    #[error("{token} name is not valid utf-8")]
    InvalidName {
        /// The token holding the invalid bytes
        token: NameToken,
        #[source]
        source: std::str::Utf8Error,
    },

    /// malformed file record for {location}
    #[error("malformed file record for {location}")]
    MalformedRecord {
        /// The entry whose record could not be read
        location: EntryLocation,
        #[source]
        source: std::io::Error,
    },

    /// file record for {location} ends with {found:#06x} instead of 0xffff
    #[error("file record for {location} ends with {found:#06x} instead of 0xffff")]
    BadTerminator {
        /// The entry whose record is corrupt
        location: EntryLocation,
        /// The terminator value that was read
        found: u16,
    },

    /// duplicate file in same tree: {location}
    #[error("duplicate file in same tree: {location}")]
    DuplicateEntry {
        /// The triple that appeared twice
        location: EntryLocation,
    },
}

/// Identifies which of the three name levels of the tree was being read
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NameToken {
    /// The outer level, shared by every file with the same extension
    Extension,
    /// The middle level, a directory path
    Path,
    /// The inner level, a file name without its extension
    Filename,
}

impl fmt::Display for NameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameToken::Extension => f.write_str("extension"),
            NameToken::Path => f.write_str("path"),
            NameToken::Filename => f.write_str("filename"),
        }
    }
}

/// The (extension, path, filename) triple a tree entry is stored under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryLocation {
    /// File extension, without the leading dot
    pub extension: String,
    /// Directory path
    pub path: String,
    /// File name, without the extension
    pub filename: String,
}

impl fmt::Display for EntryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.{}", self.path, self.filename, self.extension)
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
