//! Straighten a scanned page.
//!
//! Reads an image, estimates its skew, rotates the colour original level
//! and writes it as JPEG (quality 95, 4:4:4) or PNG. The applied rotation
//! is printed with one decimal place.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docangle::io::{DEFAULT_JPEG_QUALITY, ImageFormat, JpegOptions, encode_rgb, read_rgb};
use docangle::skew::SearchOptions;
use docangle::straighten;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "straighten", version)]
#[command(about = "Estimate the skew of a scanned page and write a straightened copy")]
struct Cli {
    /// Input image
    input: PathBuf,
    /// Output image (JPEG unless the extension is .png)
    output: PathBuf,
    /// First candidate angle, in degrees
    #[arg(long, default_value_t = -2.5, allow_hyphen_values = true)]
    min_delta: f64,
    /// Last candidate angle, in degrees
    #[arg(long, default_value_t = 2.5, allow_hyphen_values = true)]
    max_delta: f64,
    /// Candidate spacing, in degrees
    #[arg(long, default_value_t = 0.1)]
    step: f64,
    /// Skip the search for vertical text lines
    #[arg(long)]
    no_90: bool,
    /// Downscale bound for the search, 0 to disable
    #[arg(long, default_value_t = 1000)]
    max_resolution: u32,
    /// JPEG quality
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = SearchOptions::new()
        .with_range(cli.min_delta, cli.max_delta)
        .with_step(cli.step)
        .with_include_90(!cli.no_90)
        .with_max_resolution(cli.max_resolution);
    options.validate()?;

    let format = match ImageFormat::from_path(&cli.output) {
        Ok(ImageFormat::Png) => ImageFormat::Png,
        _ => ImageFormat::Jpeg,
    };

    let page = read_rgb(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let result = straighten(&page, &options)?;
    tracing::info!(
        skew = result.estimate.degrees,
        score = result.estimate.score,
        "estimated skew"
    );

    // Encode fully before touching the output path
    let bytes = encode_rgb(
        &result.image,
        format,
        &JpegOptions::default().with_quality(cli.quality),
    )?;
    fs::write(&cli.output, bytes)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!("{:.1}", result.correction);
    Ok(())
}
