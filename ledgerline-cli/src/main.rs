use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledgerline_ingest::{detect_pattern, parse_statement_detailed};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod output;

use config::OutputFormat;
use output::FileResult;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LEDGERLINE_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "ledgerline",
    version = VERSION,
    about = "Extract transactions from bank statement text dumps"
)]
struct Cli {
    /// Log per-file progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statement text files and print their transactions
    Parse {
        /// Statement text files (PDF-to-text output)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (default from config: json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the detected statement layout of each file
    Detect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Write the default config to ~/.ledgerline/config.toml
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse {
            files,
            format,
            compact,
            output,
        } => {
            let cfg = config::load_config()?;
            let format = format.unwrap_or(cfg.output.format);
            let pretty = cfg.output.pretty && !compact;

            let results = parse_files(files).await?;
            let rendered = output::render(&results, format, pretty)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "wrote results");
                }
                None => println!("{}", rendered.trim_end()),
            }
        }

        Command::Detect { files } => {
            for path in files {
                let Some(text) = read_statement(&path)? else {
                    continue;
                };
                println!("{}\t{}", file_label(&path), detect_pattern(&text));
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a statement, reporting (not failing on) missing files.
///
/// Invalid UTF-8 is replaced rather than rejected.
fn read_statement(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        return Ok(None);
    }
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "replacing invalid UTF-8");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(Some(text))
}

fn parse_file(path: &Path) -> Result<Option<FileResult>> {
    let Some(text) = read_statement(path)? else {
        return Ok(None);
    };
    let name = file_label(path);
    let parsed = parse_statement_detailed(&text, &name);

    let dates: Vec<_> = parsed.transactions.iter().filter_map(|t| t.naive_date()).collect();
    tracing::info!(
        file = %name,
        pattern = %parsed.pattern,
        count = parsed.transactions.len(),
        first = ?dates.iter().min(),
        last = ?dates.iter().max(),
        "parsed statement"
    );

    Ok(Some(FileResult {
        name,
        transactions: parsed.transactions,
    }))
}

/// Parse every file on a blocking worker; results keep argument order.
async fn parse_files(files: Vec<PathBuf>) -> Result<Vec<FileResult>> {
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| tokio::task::spawn_blocking(move || parse_file(&path)))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        if let Some(result) = handle.await.context("statement worker failed")?? {
            results.push(result);
        }
    }
    Ok(results)
}
