//! pdf-comments
//!
//! Extracts reviewer comments from a marked-up PDF and writes three markdown
//! reports into an output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pdf_comments::comments;
use pdf_comments::config::Config;
use pdf_comments::document::DocumentSource;
use pdf_comments::mupdf::MupdfSource;
use pdf_comments::report::{render_reports, write_reports};
use pdf_comments::validation::{
    check_file_size, check_page_count, prepare_output_dir, validate_pdf_path,
};

#[derive(Parser, Debug)]
#[command(name = "pdf-comments")]
#[command(about = "Extract comments from a marked-up PDF and generate markdown files")]
struct Args {
    /// Path to the PDF file
    #[arg(long)]
    pdf: PathBuf,

    /// Directory for output files
    #[arg(long, alias = "output_dir")]
    output_dir: PathBuf,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("pdf_comments=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "pdf_comments=info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    match run(&args, &config) {
        Ok(()) => {
            tracing::info!("Processing complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config) -> anyhow::Result<()> {
    let pdf_path = validate_pdf_path(&args.pdf)?;
    let output_dir = prepare_output_dir(&args.output_dir)?;
    check_file_size(&pdf_path, &config.limits)?;

    tracing::info!("Opening PDF: {}", pdf_path.display());
    let source = MupdfSource::open(&pdf_path)
        .with_context(|| format!("Error opening PDF {}", pdf_path.display()))?;
    check_page_count(source.page_count(), &config.limits)?;
    tracing::info!("Successfully opened PDF with {} pages", source.page_count());

    let extraction = comments::extract(&source).context("Failed to extract comments")?;
    if extraction.chapters.is_useful() {
        tracing::info!("Grouping by {} chapters", extraction.chapters.chapter_count());
    } else {
        tracing::info!("Grouping by page");
    }

    let reports = render_reports(&extraction.comments, &extraction.chapters)?;
    let written = write_reports(&output_dir, &config.output, &reports)
        .context("Error generating output files")?;
    tracing::info!("Wrote {} files to {}", written.len(), output_dir.display());

    Ok(())
}
