//! sheetsync command-line tool
//!
//! Reads a Smartsheet sheet or report to CSV, and writes a CSV file back to
//! a sheet keyed on a reference column.
//!
//! Usage:
//!   sheetsync read --id 123 --output sheet.csv
//!   sheetsync write --id 123 --input local.csv --reference-column "Part No" --add-missing
//!
//! The access token comes from `--access-token` or `SMARTSHEET_ACCESS_TOKEN`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetsync_cli::{read_table_from_path, summary_line, write_table, write_table_to_path};
use sheetsync_sync::{
    DuplicateReferencePolicy, SheetSync, SmartsheetClient, SmartsheetConfig, SyncConfig,
    WriteRequest, DEFAULT_PAGE_SIZE,
};
use sheetsync_types::{SheetId, Table};
use std::{io, path::PathBuf, sync::Arc};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sheetsync")]
#[command(about = "Read and write Smartsheet sheets as CSV")]
struct Args {
    /// Smartsheet API access token
    #[arg(long, env = "SMARTSHEET_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Smartsheet API base URL
    #[arg(long, default_value = "https://api.smartsheet.com/2.0")]
    api_base_url: String,

    /// Rows per bulk page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a sheet or report into CSV
    Read {
        /// Sheet or report id
        #[arg(long)]
        id: SheetId,

        /// Read a report instead of a sheet
        #[arg(long)]
        report: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where to write the report's source sheets
        #[arg(long, requires = "report")]
        sources: Option<PathBuf>,
    },
    /// Write a CSV file to a sheet
    Write {
        /// Sheet id
        #[arg(long)]
        id: SheetId,

        /// Local CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Column joining local and remote rows
        #[arg(short, long)]
        reference_column: String,

        /// Delete every remote row first
        #[arg(long)]
        clear_first: bool,

        /// Create remote rows for new references
        #[arg(long)]
        add_missing: bool,

        /// Delete remote rows whose reference is gone locally
        #[arg(long)]
        remove_orphans: bool,

        /// What to do when remote rows share a reference
        #[arg(long, value_enum, default_value_t = Duplicates::LastWins)]
        duplicates: Duplicates,

        /// Print the plan as JSON instead of writing
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Duplicates {
    LastWins,
    FirstWins,
    Reject,
}

impl From<Duplicates> for DuplicateReferencePolicy {
    fn from(d: Duplicates) -> Self {
        match d {
            Duplicates::LastWins => DuplicateReferencePolicy::LastWins,
            Duplicates::FirstWins => DuplicateReferencePolicy::FirstWins,
            Duplicates::Reject => DuplicateReferencePolicy::Reject,
        }
    }
}

fn emit(table: &Table, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => write_table_to_path(table, path)
            .with_context(|| format!("failed to write {}", path.display())),
        None => write_table(table, io::stdout().lock()).context("failed to write to stdout"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let client = SmartsheetClient::new(SmartsheetConfig {
        access_token: args.access_token.unwrap_or_default(),
        api_base_url: args.api_base_url,
        ..Default::default()
    })?;

    let mut config = SyncConfig {
        page_size: args.page_size,
        ..Default::default()
    };

    match args.command {
        Command::Read {
            id,
            report,
            output,
            sources,
        } => {
            let sync = SheetSync::new(Arc::new(client), config);
            let read = sync.read(id, report).await?;
            info!("Read {} rows from {}", read.table.len(), read.source_name);
            for (column, kind) in read.table.columns().iter().zip(&read.display_kinds) {
                debug!("  {} ({:?})", column.title, kind);
            }

            emit(&read.table, output.as_ref())?;
            if let Some(path) = sources {
                write_table_to_path(&read.source_sheets, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
        Command::Write {
            id,
            input,
            reference_column,
            clear_first,
            add_missing,
            remove_orphans,
            duplicates,
            dry_run,
        } => {
            config.duplicate_policy = duplicates.into();
            let local = read_table_from_path(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            info!("Loaded {} local rows from {}", local.len(), input.display());

            let request = WriteRequest::new(id, local, reference_column)
                .clear_first(clear_first)
                .add_missing(add_missing)
                .remove_orphans(remove_orphans);
            let sync = SheetSync::new(Arc::new(client), config);

            if dry_run {
                let plan = sync.plan(&request).await?;
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                let summary = sync.write(request).await?;
                println!("{}", summary_line(&summary));
            }
        }
    }

    Ok(())
}
