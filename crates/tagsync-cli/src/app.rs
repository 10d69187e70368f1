//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tower_lsp::lsp_types::{Position, Range};

use tagsync_lsp::{apply_edits, UpdateTagAnalyzer};
use tagsync_markup::HtmlService;

#[derive(Parser)]
#[command(name = "tagsync")]
#[command(version, about = "Rename HTML/XML tag pairs in sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename the tag pair enclosing each cursor position
    Rename {
        /// Input file
        file: PathBuf,

        /// Replacement tag name
        #[arg(short, long)]
        name: String,

        /// Cursor position as 1-based LINE:COL; may be repeated
        #[arg(long = "at", value_name = "LINE:COL", required = true)]
        at: Vec<String>,

        /// Rewrite the file instead of printing to stdout
        #[arg(long)]
        in_place: bool,

        /// Treat the input as XML (no HTML void elements)
        #[arg(long)]
        xml: bool,
    },
}

/// Parse and dispatch the command line
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rename {
            file,
            name,
            at,
            in_place,
            xml,
        } => rename_command(&file, &name, &at, in_place, xml),
    }
}

fn rename_command(file: &Path, name: &str, at: &[String], in_place: bool, xml: bool) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;

    let positions = at
        .iter()
        .map(|spec| parse_position(spec))
        .collect::<Result<Vec<_>>>()?;

    let result = rename_text(&text, &positions, name, xml)?;

    if in_place {
        fs::write(file, result).with_context(|| format!("writing {}", file.display()))?;
    } else {
        print!("{}", result);
    }
    Ok(())
}

/// Rename the enclosing tag pair at each cursor and return the new text.
///
/// Cursors outside any element are skipped; if none of them sits inside an
/// element the text comes back unchanged.
pub fn rename_text(text: &str, cursors: &[Position], new_name: &str, xml: bool) -> Result<String> {
    if new_name.is_empty() {
        bail!("replacement tag name must not be empty");
    }

    let service = if xml {
        HtmlService::xml()
    } else {
        HtmlService::new()
    };
    let analyzer = UpdateTagAnalyzer::new(text, &service);

    let selections: Vec<Range> = cursors.iter().map(|&pos| Range::new(pos, pos)).collect();
    let edits = analyzer
        .edits(&selections, new_name)
        .context("parsing markup")?;

    Ok(apply_edits(text, &edits))
}

/// Parse a 1-based `LINE:COL` cursor specification
fn parse_position(spec: &str) -> Result<Position> {
    let (line, col) = spec
        .split_once(':')
        .with_context(|| format!("invalid position '{}', expected LINE:COL", spec))?;
    let line: u32 = line
        .trim()
        .parse()
        .with_context(|| format!("invalid line in '{}'", spec))?;
    let col: u32 = col
        .trim()
        .parse()
        .with_context(|| format!("invalid column in '{}'", spec))?;
    if line == 0 || col == 0 {
        bail!("positions are 1-based: '{}'", spec);
    }
    Ok(Position::new(line - 1, col - 1))
}
