//! Binary STL writer.
//!
//! Used to synthesize fixtures with known geometry.

use std::io::Write;

use crate::error::{Result, StlError};
use crate::{expected_len, HEADER_LEN};

/// One triangle as three `[x, y, z]` vertices.
pub type Triangle = [[f32; 3]; 3];

/// Write `triangles` as binary STL.
///
/// `header` is truncated or zero-padded to 80 bytes. Normals are computed
/// from the winding order; degenerate triangles get `(0, 0, 1)`.
pub fn write_binary_stl<W: Write>(
    mut writer: W,
    header: &str,
    triangles: &[Triangle],
) -> Result<()> {
    let count = u32::try_from(triangles.len())
        .map_err(|_| StlError::TooManyTriangles(triangles.len()))?;

    let mut head = [0u8; HEADER_LEN];
    let bytes = header.as_bytes();
    let n = bytes.len().min(HEADER_LEN);
    head[..n].copy_from_slice(&bytes[..n]);
    writer.write_all(&head)?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in triangles {
        for c in face_normal(tri) {
            writer.write_all(&c.to_le_bytes())?;
        }
        for v in tri {
            for c in v {
                writer.write_all(&c.to_le_bytes())?;
            }
        }
        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode `triangles` as binary STL bytes.
pub fn to_stl_bytes(header: &str, triangles: &[Triangle]) -> Result<Vec<u8>> {
    let count = u32::try_from(triangles.len())
        .map_err(|_| StlError::TooManyTriangles(triangles.len()))?;
    let mut data = Vec::with_capacity(expected_len(count) as usize);
    write_binary_stl(&mut data, header, triangles)?;
    Ok(data)
}

fn face_normal(tri: &Triangle) -> [f32; 3] {
    let [v0, v1, v2] = tri;
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let nx = e1[1] * e2[2] - e1[2] * e2[1];
    let ny = e1[2] * e2[0] - e1[0] * e2[2];
    let nz = e1[0] * e2[1] - e1[1] * e2[0];
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-12 {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}
