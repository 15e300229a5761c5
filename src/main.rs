//! Command line front end: analyze one template and print the report.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use longan::{PptxPackage, TemplateAnalysis};

#[derive(Parser)]
#[command(
    name = "longan",
    version,
    about = "Analyze the fonts, sizes, colors, and layout of a PowerPoint template"
)]
struct Args {
    /// Path to the presentation file to analyze
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let package = PptxPackage::open(&args.path)
        .with_context(|| format!("failed to open {}", args.path.display()))?;
    let analysis = TemplateAnalysis::from_package(&package)
        .with_context(|| format!("failed to analyze {}", args.path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    longan::render(&analysis, &mut out)?;
    out.flush()?;
    Ok(())
}
