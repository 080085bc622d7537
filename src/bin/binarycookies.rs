//! binarycookies: CLI tool for exporting Apple binary cookie files to a table.

use binarycookies::{Container, DecoderConfig, Error, ExportFormat, TimeZone};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "binarycookies")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Decode Cookies.binarycookies files and export them as a table", long_about = None)]
struct Cli {
    /// Input binary cookie file (optionally gzip-compressed)
    input: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "binary_cookies.csv")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Render timestamps in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Skip records with non-UTF-8 text instead of replacing invalid bytes
    #[arg(long)]
    strict_text: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = DecoderConfig::new()
        .with_time_zone(if cli.utc { TimeZone::Utc } else { TimeZone::Local })
        .with_strict_text(cli.strict_text);

    println!("Parsing {:?}...", cli.input);
    let container = match Container::open(&cli.input, &config) {
        Ok(container) if !container.is_empty() => container,
        Ok(_) => {
            println!("No cookies were found in this file.");
            std::process::exit(1);
        }
        Err(Error::Io(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            log::debug!("Decode failed: {}", e);
            println!("No cookies were found in this file.");
            std::process::exit(1);
        }
    };

    if let Err(e) = export(&container, &cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn export(container: &Container, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let failures = container.failures().count();
    if cli.verbose {
        println!(
            "Decoded {} records from {} pages (sha256 {})",
            container.record_count(),
            container.page_count(),
            container.source_sha256
        );
    }
    if failures > 0 {
        log::warn!("{} records could not be decoded and were skipped", failures);
    }
    for (index, error) in container.page_failures() {
        log::warn!("Page {} could not be decoded and was skipped: {}", index, error);
    }

    println!("We have cookies! Writing {:?}...", cli.output);
    let file = fs::File::create(&cli.output)?;
    let format = ExportFormat::from(cli.format);
    let rows = format.write(BufWriter::new(file), container)?;

    println!(
        "Successfully exported {} rows ({}) -> {:?}",
        rows,
        format.name(),
        cli.output
    );
    Ok(())
}
