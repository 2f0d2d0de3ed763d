//! antmap — headless CLI editor for terrapaint tile maps.
//!
//! Subcommands:
//!   new     — create a blank map and write its save file
//!   paint   — apply brush footprints to a saved map
//!   fill    — flood a saved map with one brush
//!   export  — render a saved map to a PNG snapshot
//!   info    — print dimensions, layer histogram and compression rate

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use terrapaint_core::{Material, Point};

#[derive(Parser)]
#[command(name = "antmap", about = "Headless tile-map painter")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create a blank map and write its save file
    New {
        #[arg(long, default_value_t = 90)]
        width: i32,
        #[arg(long, default_value_t = 90)]
        height: i32,
        /// Optionally flood the new map with this brush id
        #[arg(long)]
        fill: Option<u8>,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Apply brush footprints to a saved map
    Paint {
        #[arg(short, long)]
        input: PathBuf,
        /// Brush id painted into the cells
        #[arg(long)]
        brush: u8,
        /// Brush width in cells
        #[arg(long, default_value_t = 1)]
        width: i32,
        /// Centre cell, as X,Y. May be given multiple times.
        #[arg(long = "at", value_parser = commands::parse_point, required = true)]
        at: Vec<Point>,
        /// Output file (defaults to rewriting the input)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Flood a saved map with one brush
    Fill {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        brush: u8,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Render a saved map to a PNG snapshot
    Export {
        #[arg(short, long)]
        input: PathBuf,
        /// Cell side length in pixels; invalid values fall back to 8
        #[arg(long)]
        cell_size: Option<String>,
        /// Material rendered for layer 0 cells
        #[arg(long)]
        color: Option<Material>,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Print dimensions, layer histogram and compression rate
    Info {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Cmd::New {
            width,
            height,
            fill,
            out,
        } => commands::new(width, height, fill, &out),
        Cmd::Paint {
            input,
            brush,
            width,
            at,
            out,
        } => commands::paint(&input, brush, width, &at, out.as_deref()),
        Cmd::Fill { input, brush, out } => commands::fill(&input, brush, out.as_deref()),
        Cmd::Export {
            input,
            cell_size,
            color,
            out,
        } => commands::export(&input, cell_size.as_deref(), color, &out),
        Cmd::Info { input } => commands::info(&input),
    }
}
