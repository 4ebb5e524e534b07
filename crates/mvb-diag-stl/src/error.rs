//! Error types for STL reading and writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing or scanning STL files.
#[derive(Error, Debug)]
pub enum StlError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before the 80-byte header and triangle count.
    #[error("truncated header: got {len} of 84 bytes")]
    TruncatedHeader {
        /// Bytes available before end of stream.
        len: usize,
    },

    /// The stream ended before all announced triangle records were read.
    #[error("truncated file: header announces {expected} triangles, only {read} complete")]
    Truncated {
        /// Triangle count stored at offset 80.
        expected: u32,
        /// Complete records read before end of stream.
        read: u32,
    },

    /// More triangles than the 32-bit count field can hold.
    #[error("too many triangles for binary STL: {0}")]
    TooManyTriangles(usize),

    /// Directory scan target is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A file inside a directory scan failed.
    #[error("failed to read {}", path.display())]
    File {
        /// File that failed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<StlError>,
    },
}

/// Result type for STL operations.
pub type Result<T> = std::result::Result<T, StlError>;
