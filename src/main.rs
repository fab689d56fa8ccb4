//! bucketform - Generate Terraform S3 bucket objects from a directory tree.
//!
//! Usage:
//!   bucketform <ROOT_DIR> <BUCKET_NAME>              Print the document
//!   bucketform -x '*.map' -x drafts/* <ROOT> <BUCKET> Skip matching files
//!   bucketform --help                               Show help

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bucketform_core::{ExcludeRule, ExcludeSet, GenerateConfig};
use bucketform_scan::JwalkScanner;

#[derive(Parser)]
#[command(
    name = "bucketform",
    version,
    about = "Generate Terraform S3 bucket objects from a directory tree",
    long_about = "bucketform walks a directory and prints a Terraform JSON document \
                  declaring one aws_s3_bucket_object per file.\n\n\
                  Files that cannot be read are reported on stderr and left out."
)]
struct Cli {
    /// Directory to walk
    root_dir: PathBuf,

    /// Bucket the objects are declared in
    bucket_name: String,

    /// Glob pattern to exclude. Patterns with a '/' match the whole relative
    /// path, others match any single path segment. May be repeated.
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN", value_parser = ExcludeRule::parse)]
    exclude: Vec<ExcludeRule>,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = GenerateConfig::builder()
        .root(cli.root_dir)
        .bucket(cli.bucket_name)
        .exclude(cli.exclude.into_iter().collect::<ExcludeSet>())
        .build()
        .context("Invalid configuration")?;

    run_generate(&config)
}

/// Scan the tree, report skipped entries and print the document.
fn run_generate(config: &GenerateConfig) -> Result<()> {
    debug!(
        root = %config.root.display(),
        bucket = %config.bucket,
        excludes = config.exclude.len(),
        "generating"
    );

    let output = JwalkScanner::new().scan(config);

    for warning in &output.warnings {
        eprintln!("{warning}");
    }

    debug!(
        objects = output.stats.total_objects,
        dirs = output.stats.total_dirs,
        excluded = output.stats.excluded,
        skipped = output.stats.skipped,
        collisions = output.stats.collisions,
        "scan finished in {:.2}s",
        output.scan_duration.as_secs_f64()
    );

    let document = output.into_document();
    if document.is_empty() {
        debug!("no objects to declare");
    }

    let stdout = BufWriter::new(io::stdout().lock());
    document
        .write_json(stdout)
        .context("Failed to write document")?;

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bucketform=debug,bucketform_scan=debug,warn")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
