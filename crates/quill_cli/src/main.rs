//! Quill CLI
//!
//! Replay recorded pen input through the ink engine and export the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quill_ink::{Style, Surface};
use quill_tess::{tessellate_all, TessOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod recording;
mod svg;

use recording::Recording;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Quill ink engine CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded sample stream and report the resulting ink
    Render {
        /// Recording (JSON)
        recording: PathBuf,

        /// Configuration file (defaults to ./quill.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the finished strokes to an SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Write a default quill.toml in the current directory
    Init {
        /// Overwrite an existing quill.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Show version and supported styles
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            recording,
            config,
            svg,
        } => cmd_render(&recording, config.as_deref(), svg.as_deref()),

        Commands::Init { force } => cmd_init(force),

        Commands::Info => cmd_info(),
    }
}

fn cmd_render(recording_path: &Path, config_path: Option<&Path>, svg_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => config::load_file(path)?,
        None => config::load_from_dir(&std::env::current_dir()?)?,
    };
    let options = TessOptions {
        line_width: config.line_width,
        tolerance: config.tolerance,
    };

    let recording = Recording::load(recording_path)?;
    info!(
        "Replaying {} strokes from {}",
        recording.strokes.len(),
        recording_path.display()
    );

    let mut surface = Surface::with_config(config);
    let reports = recording::replay(&recording, &mut surface, &options)?;

    let geometry = surface.geometry();
    let mesh = tessellate_all(&geometry, &options);
    let cancelled = reports.iter().filter(|r| r.cancelled).count();
    info!(
        "{} strokes finished, {} cancelled, {} triangles, {} bytes of vertex data",
        surface.strokes().len(),
        cancelled,
        mesh.triangle_count(),
        mesh.vertex_bytes().len()
    );

    if let Some(svg_path) = svg_path {
        let document = svg::document(&geometry, options.line_width);
        fs::write(svg_path, document)
            .with_context(|| format!("Failed to write {}", svg_path.display()))?;
        info!("SVG written to {}", svg_path.display());
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let path = config::write_default(&cwd, force)?;

    info!("Wrote {}", path.display());
    info!("Run `quill render <recording.json>` to replay input with these settings");

    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("Quill Ink Engine");
    println!("================");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Styles:");
    for style in Style::ALL {
        let kind = if style.is_pressure_sensitive() {
            "filled ribbon, pressure/tilt sensitive"
        } else {
            "stroked centerline"
        };
        let marker = if style == Style::default() { " (default)" } else { "" };
        println!("  - {}{}: {}", style, marker, kind);
    }

    Ok(())
}
