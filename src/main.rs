//! datacompare - compare two tabular datasets by identifier columns

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use termcolor::{ColorChoice, StandardStream};

use datacompare::config::{CompareConfig, InputFormat};
use datacompare::diff::compare;
use datacompare::output::TerminalOutput;

/// Field-level diff of two CSV or Excel files keyed by identifier columns
#[derive(Parser, Debug)]
#[command(name = "datacompare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First file to compare (table A)
    source_a: PathBuf,

    /// Second file to compare (table B)
    source_b: PathBuf,

    /// Where to write the difference report; the summary goes next to it as summary_<name>
    #[arg(short, long)]
    output: PathBuf,

    /// Identifier column(s) used to align rows (comma-separated)
    #[arg(short, long, value_delimiter = ',', required = true)]
    key: Vec<String>,

    /// Input format: csv or excel
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// For Excel files: which sheet to compare
    #[arg(long)]
    sheet: Option<String>,

    /// Field delimiter for CSV input
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Do not print the terminal summary
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(has_differences) => {
            if has_differences {
                ExitCode::from(1) // Differences found
            } else {
                ExitCode::SUCCESS // No differences
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "datacompare=warn",
        1 => "datacompare=info",
        _ => "datacompare=debug",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let format: InputFormat = cli.format.parse()?;
    let delimiter = u8::try_from(cli.delimiter).context("delimiter must be a single-byte character")?;

    let mut config = CompareConfig::new(cli.source_a, cli.source_b, cli.output)
        .with_identifier_columns(cli.key)
        .with_format(format)
        .with_delimiter(delimiter);
    if let Some(sheet) = cli.sheet {
        config = config.with_sheet_name(sheet);
    }

    let result = compare(&config).with_context(|| {
        format!(
            "Failed to compare {} with {}",
            config.source_a.display(),
            config.source_b.display()
        )
    })?;

    if !cli.quiet {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        TerminalOutput::new()
            .render(&result, &mut stdout)
            .context("Failed to write terminal summary")?;
    }

    Ok(result.stats.has_differences())
}
