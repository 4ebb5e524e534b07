//! Plain-text rendering of the diagnostics.

use std::io::{self, Write};

use mvb_diag_mas::{DimensionReport, TurnReport};
use mvb_diag_math::{Aabb3, CenteredBox};
use mvb_diag_stl::StlSummary;

/// Triangle count, bounds and per-axis size of one file.
pub fn write_stl_report(out: &mut impl Write, summary: &StlSummary) -> io::Result<()> {
    writeln!(out, "Number of triangles: {}", summary.triangle_count)?;
    let Some(b) = summary.bounds() else {
        return writeln!(out, "Bounding box: empty ({})", empty_reason(summary));
    };
    let size = b.size();
    writeln!(out, "Bounding box:")?;
    for (axis, min, max, len) in [
        ('X', b.min.x, b.max.x, size.x),
        ('Y', b.min.y, b.max.y, size.y),
        ('Z', b.min.z, b.max.z, size.z),
    ] {
        writeln!(out, "  {axis}: {min:.3} to {max:.3} (size: {len:.3} mm)")?;
    }
    Ok(())
}

/// Two-line size summary used by `sizes`.
pub fn write_size_line(out: &mut impl Write, name: &str, summary: &StlSummary) -> io::Result<()> {
    writeln!(out, "{name}:")?;
    match summary.size() {
        Some(s) => writeln!(
            out,
            "  Triangles: {}, Size: {:.2} x {:.2} x {:.2} mm",
            summary.triangle_count, s.x, s.y, s.z
        ),
        None => writeln!(
            out,
            "  Triangles: {}, Size: empty ({})",
            summary.triangle_count,
            empty_reason(summary)
        ),
    }
}

fn empty_reason(summary: &StlSummary) -> &'static str {
    if summary.triangle_count == 0 {
        "no triangles"
    } else {
        "no finite vertices"
    }
}

/// Core part dimensions, bobbin column and winding window.
pub fn write_dimension_report(out: &mut impl Write, report: &DimensionReport) -> io::Result<()> {
    for part in &report.parts {
        writeln!(out, "Part {} dimensions:", part.index)?;
        for (name, mm) in &part.dimensions {
            writeln!(out, "  {name}: {mm:.3} mm")?;
        }
        let rotation: Vec<String> = part.rotation.iter().map(|v| v.to_string()).collect();
        writeln!(out, "  rotation: [{}]", rotation.join(", "))?;
        writeln!(out)?;
    }

    let bobbin = &report.bobbin;
    writeln!(out, "Bobbin:")?;
    writeln!(out, "  columnDepth: {:.3} mm", bobbin.column_depth_mm)?;
    writeln!(out, "  columnWidth: {:.3} mm", bobbin.column_width_mm)?;
    writeln!(out, "  columnShape: {}", bobbin.column_shape)?;

    let window = &report.winding_window;
    writeln!(out)?;
    writeln!(out, "Winding Window:")?;
    writeln!(out, "  height: {:.3} mm", window.height_mm)?;
    writeln!(out, "  width: {:.3} mm", window.width_mm)
}

/// Turns per layer with polar inner/outer coordinates.
pub fn write_turn_report(out: &mut impl Write, report: &TurnReport) -> io::Result<()> {
    writeln!(out, "Number of turns: {}", report.turn_count)?;
    for layer in &report.layers {
        writeln!(out)?;
        writeln!(out, "=== {} ({} turns) ===", layer.layer, layer.total)?;
        for turn in &layer.turns {
            let outer = turn.outer.unwrap_or_default();
            writeln!(out, "Turn {}: rotation={:.1}°", turn.index, turn.rotation)?;
            writeln!(
                out,
                "  inner: r={:.2}mm @ {:.1}°",
                turn.inner.radius, turn.inner.angle_deg
            )?;
            writeln!(
                out,
                "  outer: r={:.2}mm @ {:.1}°",
                outer.radius, outer.angle_deg
            )?;
            writeln!(out, "  angle_diff: {:.1}°", turn.angle_diff())?;
        }
    }
    Ok(())
}

/// Bounds and centers of a centered box, before and after translation.
pub fn write_box_report(
    out: &mut impl Write,
    original: &CenteredBox,
    moved: &CenteredBox,
) -> io::Result<()> {
    let l = original.lengths();
    writeln!(out, "Centered box({}, {}, {}):", l.x, l.y, l.z)?;
    write_bounds_with_center(out, &original.bounding_box())?;

    let t = moved.offset() - original.offset();
    writeln!(out)?;
    writeln!(out, "After translate(({}, {}, {})):", t.x, t.y, t.z)?;
    write_bounds_with_center(out, &moved.bounding_box())
}

fn write_bounds_with_center(out: &mut impl Write, b: &Aabb3) -> io::Result<()> {
    let c = b.center();
    writeln!(out, "  X: {} to {} (center: {})", b.min.x, b.max.x, c.x)?;
    writeln!(out, "  Y: {} to {} (center: {})", b.min.y, b.max.y, c.y)?;
    writeln!(out, "  Z: {} to {} (center: {})", b.min.z, b.max.z, c.z)
}
