use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use figtrim::{Policy, compress, parse_document, write_document};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "figtrim")]
#[command(about = "Compress design-tool JSON exports before sending them to a plugin", long_about = None)]
struct Cli {
    /// Input JSON file (use - for stdin)
    input_file: PathBuf,

    /// Output file for the compressed JSON (use - for stdout)
    output_file: PathBuf,

    /// Use aggressive compression
    #[arg(long)]
    aggressive: bool,

    /// Target size in MB
    #[arg(long, default_value = "150")]
    target_size: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Read input
    info!(input = %cli.input_file.display(), "loading");
    let input = if cli.input_file.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&cli.input_file)?
    };
    let doc = parse_document(&input)?;
    drop(input);

    let policy = Policy {
        target_size_mb: cli.target_size as f64,
        force_aggressive: cli.aggressive,
        ..Policy::default()
    };

    let compressed = compress(doc, &policy)?;

    // Write output
    info!(output = %cli.output_file.display(), "saving");
    if cli.output_file.as_os_str() == "-" {
        let mut out = BufWriter::new(io::stdout().lock());
        write_document(&mut out, &compressed.document)?;
        out.flush()?;
    } else {
        let mut out = BufWriter::new(fs::File::create(&cli.output_file)?);
        write_document(&mut out, &compressed.document)?;
        out.flush()?;
    }

    let report = &compressed.report;
    if report.was_compressed() {
        info!(
            original_mb = %format!("{:.2}", report.original_mb()),
            final_mb = %format!("{:.2}", report.final_mb()),
            reduction = %format!("{:.1}%", report.reduction_percent()),
            "compression complete"
        );
    }
    if report.is_oversized() {
        warn!("file is still very large, consider capturing a smaller page");
    }

    Ok(())
}
