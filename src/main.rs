//! motifmark - Motif Mark
//!
//! Draws genes and the motif occurrences found in them as an SVG image.
//!
//! ## Usage
//!
//! ```bash
//! motifmark -f genes.fasta -m motifs.txt              # writes genes.svg
//! motifmark -f genes.fasta -m motifs.txt -o plot.svg
//! motifmark -f genes.fasta -m motifs.txt -o - > plot.svg
//! ```
//!
//! The FASTA file holds one exon per record in uppercase, flanked by lowercase
//! introns. The motif file holds one motif per line and accepts IUPAC codes.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use motifmark::layout::LayoutConfig;
use motifmark::pipeline::run;
use motifmark::render::{render_svg, write_svg, RenderStyle};

/// Motif Mark - draw genes with the positions of degenerate motifs
///
/// Each gene is drawn as a line, its exon as a black box and every motif
/// occurrence as a colored tick. Output is a single SVG image.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file with single exons (uppercase) and flanking introns (lowercase)
    #[arg(short = 'f', long = "fasta")]
    fasta: PathBuf,

    /// File with one query motif per line (accepts IUPAC degenerate symbols)
    #[arg(short = 'm', long = "motifs")]
    motifs: PathBuf,

    /// Output SVG file (default: FASTA file name with .svg). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Tick color, repeat to give each motif its own color (cycled by motif order)
    #[arg(short = 'c', long = "color")]
    colors: Vec<String>,

    /// Width of a motif tick on the canvas, in pixels
    #[arg(long = "tick-width", default_value = "2")]
    tick_width: u32,

    /// Log per-gene details (same as RUST_LOG=debug)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    if args.tick_width < 1 {
        anyhow::bail!("Tick width must be at least 1 (got {})", args.tick_width);
    }

    let config = LayoutConfig {
        tick_width: args.tick_width as f64,
        ..LayoutConfig::default()
    };
    let mut style = RenderStyle::default();
    if !args.colors.is_empty() {
        style.motif_colors = args.colors;
        if style.motif_colors.len() > 1 {
            style.caption =
                "*Black boxes represent exons. Colored lines indicate locations of input motifs."
                    .to_string();
        }
    }

    let annotation = run(&args.fasta, &args.motifs, &config)?;

    let output = args
        .output
        .unwrap_or_else(|| args.fasta.with_extension("svg").display().to_string());

    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", render_svg(&annotation.layout, &style))?;
    } else {
        write_svg(&output, &annotation.layout, &style)
            .with_context(|| format!("Failed to write {}", output))?;
        info!(
            "Wrote {} genes ({}x{}) to {}",
            annotation.index.len(),
            annotation.layout.width,
            annotation.layout.height,
            output
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_tick_width_help_is_in_pixels() {
        let command = Args::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "tick_width")
            .and_then(|arg| arg.get_help())
            .map(|help| help.to_string())
            .unwrap();
        assert!(help.contains("pixels"));
        assert!(!help.contains("bases"));
    }
}
