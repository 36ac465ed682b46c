//! cellref CLI - inspect and normalize A1-style references

use anyhow::{Context, Result};
use cellref_core::{reference_hash, CellReference, RangeReference};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "cellref")]
#[command(author, version, about = "Inspect, offset and normalize A1-style cell references")]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "cellref_core=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the column, row and anchors of each reference
    Parse {
        /// References such as B12, $A$1 or aa100
        #[arg(required = true)]
        references: Vec<String>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Shift a reference by a number of columns and rows
    Offset {
        /// Starting reference
        reference: String,

        /// Columns to move (negative moves left)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        columns: i32,

        /// Rows to move (negative moves up)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        rows: i32,
    },

    /// Build a range from one or two cells, or from an A1:B2 literal
    Range {
        /// First corner, or a full range
        from: String,

        /// Second corner
        to: Option<String>,

        /// Anchor every corner ($A$1:$B$2)
        #[arg(short, long)]
        absolute: bool,
    },

    /// Print references in row-major order
    Sort {
        #[arg(required = true)]
        references: Vec<String>,

        /// Collapse references to the same cell, keeping the first seen
        #[arg(long)]
        dedup: bool,
    },
}

#[derive(Serialize)]
struct ReferenceInfo {
    reference: CellReference,
    column: String,
    column_index: u32,
    row: u32,
    absolute_column: bool,
    absolute_row: bool,
    key: u64,
}

impl From<CellReference> for ReferenceInfo {
    fn from(cell: CellReference) -> Self {
        Self {
            reference: cell,
            column: cell.column().to_letters(),
            column_index: cell.column_index(),
            row: cell.row(),
            absolute_column: cell.is_absolute_column(),
            absolute_row: cell.is_absolute_row(),
            key: reference_hash(cell),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(cli.command, &mut out)
}

/// Initialize logging to stderr, preferring RUST_LOG over the flag
fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

fn run(command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Parse { references, json } => parse_references(&references, json, out),
        Commands::Offset {
            reference,
            columns,
            rows,
        } => offset_reference(&reference, columns, rows, out),
        Commands::Range { from, to, absolute } => {
            build_range(&from, to.as_deref(), absolute, out)
        }
        Commands::Sort { references, dedup } => sort_references(&references, dedup, out),
    }
}

fn parse_cell(text: &str) -> Result<CellReference> {
    CellReference::parse(text).with_context(|| format!("Failed to parse reference '{text}'"))
}

fn parse_references(references: &[String], json: bool, out: &mut impl Write) -> Result<()> {
    for text in references {
        let info = ReferenceInfo::from(parse_cell(text)?);

        if json {
            serde_json::to_writer(&mut *out, &info)?;
            writeln!(out)?;
        } else {
            writeln!(
                out,
                "{}\tcolumn={} ({})\trow={}\tabsolute_column={}\tabsolute_row={}",
                info.reference,
                info.column,
                info.column_index,
                info.row,
                info.absolute_column,
                info.absolute_row
            )?;
        }
    }
    Ok(())
}

fn offset_reference(text: &str, columns: i32, rows: i32, out: &mut impl Write) -> Result<()> {
    let cell = parse_cell(text)?;
    let shifted = cell
        .make_offset(columns, rows)
        .with_context(|| format!("Cannot move {cell} by {columns} columns and {rows} rows"))?;

    tracing::debug!(from = %cell, to = %shifted, "offset reference");
    writeln!(out, "{shifted}")?;
    Ok(())
}

fn build_range(from: &str, to: Option<&str>, absolute: bool, out: &mut impl Write) -> Result<()> {
    let mut range = match to {
        Some(to) => RangeReference::new(parse_cell(from)?, parse_cell(to)?),
        None => RangeReference::parse(from)
            .with_context(|| format!("Failed to parse range '{from}'"))?,
    };

    if absolute {
        range.make_absolute();
    }

    writeln!(
        out,
        "{range}\t{} x {} ({} cells)",
        range.width(),
        range.height(),
        range.cell_count()
    )?;
    Ok(())
}

fn sort_references(references: &[String], dedup: bool, out: &mut impl Write) -> Result<()> {
    let mut cells = references
        .iter()
        .map(|text| parse_cell(text))
        .collect::<Result<Vec<_>>>()?;

    // Stable, so the first spelling of a cell stays first
    cells.sort_by(|a, b| a.cmp_position(b));
    if dedup {
        let before = cells.len();
        cells.dedup_by(|a, b| a.same_cell(b));
        tracing::debug!(removed = before - cells.len(), "deduplicated references");
    }

    for cell in cells {
        writeln!(out, "{cell}")?;
    }
    Ok(())
}
