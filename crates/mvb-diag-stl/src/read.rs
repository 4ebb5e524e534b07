//! Streaming bounding-box extraction from binary STL.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use mvb_diag_math::{Aabb3, Point3, Vec3};
use tracing::debug;

use crate::error::{Result, StlError};
use crate::{HEADER_LEN, PREAMBLE_LEN, RECORD_LEN};

/// Byte offset of the first vertex inside a record (after the normal).
const VERTEX_OFFSET: usize = 12;

/// Triangle count and bounds of one binary STL file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlSummary {
    /// Count stored at byte offset 80.
    pub triangle_count: u32,
    /// Running extrema after every vertex was consumed.
    ///
    /// Keeps the `+inf`/`-inf` sentinels of [`Aabb3::empty`] when the file
    /// holds no triangles. Prefer [`StlSummary::bounds`].
    pub raw_bounds: Aabb3,
}

impl StlSummary {
    /// Bounding box, or `None` when the file has no geometry.
    pub fn bounds(&self) -> Option<Aabb3> {
        if self.triangle_count == 0 || self.raw_bounds.is_empty() {
            None
        } else {
            Some(self.raw_bounds)
        }
    }

    /// Extent along each axis, or `None` when the file has no geometry.
    pub fn size(&self) -> Option<Vec3> {
        self.bounds().map(|b| b.size())
    }
}

/// Read a binary STL stream and compute its triangle count and bounds.
///
/// The header content is ignored. Fails with [`StlError::TruncatedHeader`]
/// or [`StlError::Truncated`] when the stream ends early; no partial
/// result is produced in that case.
pub fn read_stl_summary<R: Read>(mut reader: R) -> Result<StlSummary> {
    let mut preamble = [0u8; PREAMBLE_LEN];
    let len = read_full(&mut reader, &mut preamble)?;
    if len < PREAMBLE_LEN {
        return Err(StlError::TruncatedHeader { len });
    }
    let triangle_count = u32::from_le_bytes([
        preamble[HEADER_LEN],
        preamble[HEADER_LEN + 1],
        preamble[HEADER_LEN + 2],
        preamble[HEADER_LEN + 3],
    ]);
    debug!(triangles = triangle_count, "reading binary STL");

    let mut bounds = Aabb3::empty();
    let mut record = [0u8; RECORD_LEN];
    for read in 0..triangle_count {
        if read_full(&mut reader, &mut record)? < RECORD_LEN {
            return Err(StlError::Truncated {
                expected: triangle_count,
                read,
            });
        }
        for v in 0..3 {
            bounds.include_point(&vertex_at(&record, VERTEX_OFFSET + v * 12));
        }
    }

    Ok(StlSummary {
        triangle_count,
        raw_bounds: bounds,
    })
}

/// Open `path` and run [`read_stl_summary`] over a buffered reader.
pub fn summarize_file(path: impl AsRef<Path>) -> Result<StlSummary> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening STL");
    let file = File::open(path)?;
    read_stl_summary(BufReader::new(file))
}

fn vertex_at(record: &[u8; RECORD_LEN], offset: usize) -> Point3 {
    let coord = |i: usize| {
        let o = offset + i * 4;
        f64::from(f32::from_le_bytes([
            record[o],
            record[o + 1],
            record[o + 2],
            record[o + 3],
        ]))
    };
    Point3::new(coord(0), coord(1), coord(2))
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
/// Returns the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::{to_stl_bytes, Triangle};
    use std::io::Cursor;

    fn unit_box_triangles() -> Vec<Triangle> {
        // Two triangles spanning [-1.5, 2] x [0.25, 4] x [-8, 0.5]
        vec![
            [[-1.5, 0.25, -8.0], [2.0, 0.25, 0.0], [0.0, 4.0, 0.5]],
            [[0.0, 1.0, 0.0], [1.0, 2.0, -3.0], [-1.0, 3.0, 0.25]],
        ]
    }

    #[test]
    fn test_roundtrip_exact_bounds() {
        let bytes = to_stl_bytes("two triangles", &unit_box_triangles()).unwrap();
        let summary = read_stl_summary(Cursor::new(bytes)).unwrap();

        assert_eq!(summary.triangle_count, 2);
        let b = summary.bounds().unwrap();
        assert_eq!(b.min, Point3::new(-1.5, 0.25, -8.0));
        assert_eq!(b.max, Point3::new(2.0, 4.0, 0.5));
        assert_eq!(summary.size().unwrap(), Vec3::new(3.5, 3.75, 8.5));
    }

    #[test]
    fn test_non_representable_floats_widen_exactly() {
        let tri: Triangle = [[0.1, 0.2, 0.3], [0.7, -0.9, 1.1], [0.4, 0.5, 0.6]];
        let bytes = to_stl_bytes("", &[tri]).unwrap();
        let b = read_stl_summary(Cursor::new(bytes)).unwrap().bounds().unwrap();
        assert_eq!(b.min.x, f64::from(0.1f32));
        assert_eq!(b.min.y, f64::from(-0.9f32));
        assert_eq!(b.max.z, f64::from(1.1f32));
    }

    #[test]
    fn test_count_matches_offset_80() {
        let tris: Vec<Triangle> = (0..7)
            .map(|i| {
                let z = i as f32;
                [[0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z]]
            })
            .collect();
        let bytes = to_stl_bytes("stack", &tris).unwrap();
        let stored = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
        let summary = read_stl_summary(Cursor::new(bytes)).unwrap();
        assert_eq!(summary.triangle_count, stored);
        assert_eq!(summary.triangle_count, 7);
    }

    #[test]
    fn test_min_le_max_when_nonempty() {
        let tris: Vec<Triangle> = (0..20)
            .map(|i| {
                let t = i as f32 * 0.37 - 3.0;
                [[t, -t, t * t], [-t, t * 2.0, 1.0], [t * 0.5, 0.0, -t]]
            })
            .collect();
        let bytes = to_stl_bytes("sweep", &tris).unwrap();
        let b = read_stl_summary(Cursor::new(bytes)).unwrap().bounds().unwrap();
        assert!(b.min.x <= b.max.x);
        assert!(b.min.y <= b.max.y);
        assert!(b.min.z <= b.max.z);
    }

    #[test]
    fn test_header_content_is_ignored() {
        let mut bytes = to_stl_bytes("", &unit_box_triangles()).unwrap();
        // ASCII-looking header must not change the result
        bytes[..5].copy_from_slice(b"solid");
        bytes[5..80].fill(0xff);
        let summary = read_stl_summary(Cursor::new(bytes)).unwrap();
        assert_eq!(summary.triangle_count, 2);
    }

    #[test]
    fn test_zero_triangles_keeps_sentinels() {
        let bytes = to_stl_bytes("empty", &[]).unwrap();
        assert_eq!(bytes.len(), 84);
        let summary = read_stl_summary(Cursor::new(bytes)).unwrap();

        assert_eq!(summary.triangle_count, 0);
        assert!(summary.bounds().is_none());
        assert!(summary.size().is_none());
        assert_eq!(summary.raw_bounds.min.x, f64::INFINITY);
        assert_eq!(summary.raw_bounds.min.y, f64::INFINITY);
        assert_eq!(summary.raw_bounds.min.z, f64::INFINITY);
        assert_eq!(summary.raw_bounds.max.x, f64::NEG_INFINITY);
        assert_eq!(summary.raw_bounds.max.y, f64::NEG_INFINITY);
        assert_eq!(summary.raw_bounds.max.z, f64::NEG_INFINITY);
    }

    #[test]
    fn test_truncated_header() {
        let err = read_stl_summary(Cursor::new(vec![0u8; 60])).unwrap_err();
        assert!(matches!(err, StlError::TruncatedHeader { len: 60 }));
    }

    #[test]
    fn test_truncated_records_fail_without_partial_result() {
        let mut bytes = to_stl_bytes("cut", &unit_box_triangles()).unwrap();
        bytes.truncate(84 + 50 + 20);
        let err = read_stl_summary(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            StlError::Truncated {
                expected: 2,
                read: 1
            }
        ));
    }

    #[test]
    fn test_count_larger_than_payload() {
        let mut bytes = to_stl_bytes("liar", &unit_box_triangles()).unwrap();
        bytes[80..84].copy_from_slice(&1000u32.to_le_bytes());
        let err = read_stl_summary(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            StlError::Truncated {
                expected: 1000,
                read: 2
            }
        ));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut bytes = to_stl_bytes("padded", &unit_box_triangles()).unwrap();
        bytes.extend_from_slice(&[0xAB; 17]);
        let summary = read_stl_summary(Cursor::new(bytes)).unwrap();
        assert_eq!(summary.triangle_count, 2);
    }

    #[test]
    fn test_summarize_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.stl");
        std::fs::write(&path, to_stl_bytes("part", &unit_box_triangles()).unwrap()).unwrap();

        let summary = summarize_file(&path).unwrap();
        assert_eq!(summary.triangle_count, 2);
        assert_eq!(summary.bounds().unwrap().max, Point3::new(2.0, 4.0, 0.5));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = summarize_file(dir.path().join("nope.stl")).unwrap_err();
        match err {
            StlError::Io(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
