#![warn(missing_docs)]

//! Binary STL bounding-box extraction.
//!
//! Streams the fixed-size records of a binary STL file and reports the
//! triangle count together with the axis-aligned bounding box of every
//! vertex. Nothing but the running extrema is kept in memory.
//!
//! # Example
//!
//! ```no_run
//! use mvb_diag_stl::summarize_file;
//!
//! let summary = summarize_file("output/core.stl")?;
//! println!("Number of triangles: {}", summary.triangle_count);
//! if let Some(size) = summary.size() {
//!     println!("Size: {:.2} x {:.2} x {:.2} mm", size.x, size.y, size.z);
//! }
//! # Ok::<(), mvb_diag_stl::StlError>(())
//! ```

pub mod error;
pub mod read;
pub mod scan;
pub mod write;

pub use error::{Result, StlError};
pub use read::{read_stl_summary, summarize_file, StlSummary};
pub use scan::{is_stl_name, scan_dir};
pub use write::{to_stl_bytes, write_binary_stl, Triangle};

/// Length of the free-form header.
pub const HEADER_LEN: usize = 80;

/// Length of the header plus the triangle count.
pub const PREAMBLE_LEN: usize = HEADER_LEN + 4;

/// Length of one triangle record: normal, three vertices, attribute count.
pub const RECORD_LEN: usize = 50;

/// Exact byte length of a well-formed binary STL holding `triangles` records.
pub fn expected_len(triangles: u32) -> u64 {
    PREAMBLE_LEN as u64 + u64::from(triangles) * RECORD_LEN as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_len() {
        assert_eq!(expected_len(0), 84);
        assert_eq!(expected_len(12), 84 + 600);
        assert_eq!(expected_len(u32::MAX), 84 + 50 * u64::from(u32::MAX));
    }
}
