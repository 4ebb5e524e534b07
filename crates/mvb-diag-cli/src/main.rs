//! mvb-diag CLI - geometry diagnostics for magnetic-component CAD output
//!
//! Each subcommand reads one file (or directory), prints a plain-text
//! report to stdout and exits non-zero on the first error.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use mvb_diag_mas::{DimensionReport, Magnetic, MasDocument, TurnReport, TurnReportOptions};
use mvb_diag_math::CenteredBox;

mod output;

const DEFAULT_STL: &str = "output/toroidal_one_turn_rectangular_wire.stl";
const DEFAULT_STL_DIR: &str = "output";
const DEFAULT_TURNS: &str = "tests/testData/toroidal_two_layers_not_compact.json";

#[derive(Parser)]
#[command(name = "mvb-diag")]
#[command(about = "Geometry diagnostics for magnetic-component CAD output", long_about = None)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Triangle count and bounding box of a binary STL file
    Stl {
        /// Binary STL file
        #[arg(default_value = DEFAULT_STL)]
        file: PathBuf,
    },
    /// Triangle count and size of one STL file, or of every .stl in a directory
    Sizes {
        /// Single STL file; when omitted, --dir is scanned
        file: Option<PathBuf>,
        /// Directory to scan for .stl files
        #[arg(long, default_value = DEFAULT_STL_DIR, conflicts_with = "file")]
        dir: PathBuf,
    },
    /// Core, bobbin and winding-window dimensions of a MAS JSON file
    Dims {
        /// MAS JSON file
        file: PathBuf,
    },
    /// Polar coordinates of coil turns, grouped by layer
    Turns {
        /// MAS JSON file (wrapped in "magnetic" or bare)
        #[arg(default_value = DEFAULT_TURNS)]
        file: PathBuf,
        /// Turns shown per layer
        #[arg(long, default_value_t = 3)]
        per_layer: usize,
        /// Show every turn
        #[arg(long, conflicts_with = "per_layer")]
        all: bool,
    },
    /// Bounds of a box centered at the origin, before and after a translation
    #[command(name = "box")]
    BoxBounds {
        /// Box lengths
        #[arg(
            long,
            num_args = 3,
            value_names = ["X", "Y", "Z"],
            default_values_t = [10.0, 20.0, 5.0]
        )]
        size: Vec<f64>,
        /// Translation applied to the box
        #[arg(
            long,
            num_args = 3,
            value_names = ["DX", "DY", "DZ"],
            allow_negative_numbers = true,
            default_values_t = [5.0, 10.0, 2.5]
        )]
        translate: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Stl { file } => show_stl(&mut out, &file)?,
        Commands::Sizes { file: Some(file), .. } => show_size(&mut out, &file)?,
        Commands::Sizes { file: None, dir } => show_dir_sizes(&mut out, &dir)?,
        Commands::Dims { file } => show_dims(&mut out, &file)?,
        Commands::Turns {
            file,
            per_layer,
            all,
        } => {
            let options = TurnReportOptions {
                per_layer: (!all).then_some(per_layer),
            };
            show_turns(&mut out, &file, &options)?;
        }
        Commands::BoxBounds { size, translate } => show_box(&mut out, &size, &translate)?,
    }

    out.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter(verbose, rust_log.as_deref()))
        .init();
}

/// `RUST_LOG` when set, otherwise WARN (DEBUG with `--verbose`).
fn env_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

fn show_stl(out: &mut impl Write, file: &Path) -> Result<()> {
    let summary = mvb_diag_stl::summarize_file(file)
        .with_context(|| format!("failed to read STL {}", file.display()))?;
    output::write_stl_report(out, &summary)?;
    Ok(())
}

fn show_size(out: &mut impl Write, file: &Path) -> Result<()> {
    let summary = mvb_diag_stl::summarize_file(file)
        .with_context(|| format!("failed to read STL {}", file.display()))?;
    output::write_size_line(out, &display_name(file), &summary)?;
    Ok(())
}

fn show_dir_sizes(out: &mut impl Write, dir: &Path) -> Result<()> {
    let results = mvb_diag_stl::scan_dir(dir)
        .with_context(|| format!("failed to scan {}", dir.display()))?;
    debug!(dir = %dir.display(), files = results.len(), "writing size lines");
    for (path, summary) in &results {
        output::write_size_line(out, &display_name(path), summary)?;
    }
    Ok(())
}

fn show_dims(out: &mut impl Write, file: &Path) -> Result<()> {
    let doc = MasDocument::load(file)
        .with_context(|| format!("failed to load MAS document {}", file.display()))?;
    let report = DimensionReport::from_document(&doc)
        .with_context(|| format!("incomplete MAS document {}", file.display()))?;
    output::write_dimension_report(out, &report)?;
    Ok(())
}

fn show_turns(out: &mut impl Write, file: &Path, options: &TurnReportOptions) -> Result<()> {
    let magnetic = Magnetic::load_lenient(file)
        .with_context(|| format!("failed to load magnetic {}", file.display()))?;
    let report = TurnReport::from_magnetic(&magnetic, options)?;
    output::write_turn_report(out, &report)?;
    Ok(())
}

fn show_box(out: &mut impl Write, size: &[f64], translate: &[f64]) -> Result<()> {
    let (&[lx, ly, lz], &[dx, dy, dz]) = (size, translate) else {
        anyhow::bail!("--size and --translate take exactly three values");
    };
    let original = CenteredBox::new(lx, ly, lz)?;
    let moved = original.translate(dx, dy, dz);
    output::write_box_report(out, &original, &moved)?;
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stl_defaults_to_output_file() {
        let cli = Cli::try_parse_from(["mvb-diag", "stl"]).unwrap();
        match cli.command {
            Commands::Stl { file } => assert_eq!(file, PathBuf::from(DEFAULT_STL)),
            _ => panic!("expected stl"),
        }
    }

    #[test]
    fn test_box_accepts_negative_translation() {
        let cli = Cli::try_parse_from([
            "mvb-diag",
            "box",
            "--size",
            "1",
            "2",
            "3",
            "--translate",
            "-1",
            "0",
            "-2.5",
        ])
        .unwrap();
        match cli.command {
            Commands::BoxBounds { size, translate } => {
                assert_eq!(size, [1.0, 2.0, 3.0]);
                assert_eq!(translate, [-1.0, 0.0, -2.5]);
            }
            _ => panic!("expected box"),
        }
    }

    #[test]
    fn test_sizes_file_conflicts_with_dir() {
        assert!(Cli::try_parse_from(["mvb-diag", "sizes", "a.stl", "--dir", "out"]).is_err());
    }

    #[test]
    fn test_dir_sizes_skip_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let tri = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let bytes = mvb_diag_stl::to_stl_bytes("core", &[tri]).unwrap();
        std::fs::write(dir.path().join("core.stl"), &bytes).unwrap();
        std::fs::write(dir.path().join("core.json"), "{}").unwrap();

        let mut buf = Vec::<u8>::new();
        show_dir_sizes(&mut buf, dir.path()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "core.stl:\n  Triangles: 1, Size: 2.00 x 1.00 x 0.00 mm\n"
        );
    }

    #[test]
    fn test_truncated_stl_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.stl");
        std::fs::write(&path, [0u8; 40]).unwrap();

        let err = show_stl(&mut Vec::<u8>::new(), &path).unwrap_err();
        assert!(err.to_string().contains("cut.stl"));
        assert!(format!("{err:#}").contains("truncated header"));
    }

    #[test]
    fn test_rust_log_overrides_default_level() {
        assert_eq!(env_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(env_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            env_filter(false, Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            env_filter(true, Some("error")).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }

    #[test]
    fn test_box_rejects_zero_length() {
        assert!(show_box(&mut Vec::<u8>::new(), &[0.0, 1.0, 1.0], &[0.0, 0.0, 0.0]).is_err());
    }
}
