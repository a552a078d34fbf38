use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

use uctax_rs::{assign_taxonomy, DEFAULT_MIN_CONSENSUS_FRACTION, DEFAULT_UNASSIGNED_LABEL};

/// Assign consensus taxonomy to query sequences from uclust/usearch
/// cluster results and a reference taxonomy.
#[derive(Parser)]
#[command(name = "uctax-rs", version)]
struct Cli {
    /// Cluster search results in .uc format (optionally gzipped)
    #[arg(long, value_name = "FILE")]
    uc_file: PathBuf,

    /// Reference taxonomy, one `id<TAB>lineage` per line (optionally gzipped)
    #[arg(long, value_name = "FILE")]
    taxonomy: PathBuf,

    /// Where to write the assignment table
    #[arg(long, value_name = "FILE")]
    output: PathBuf,

    /// Fraction of candidates that must agree at each rank, in (0.5, 1.0]
    #[arg(long, default_value_t = DEFAULT_MIN_CONSENSUS_FRACTION)]
    min_consensus_fraction: f64,

    /// Label reported for queries with no resolvable consensus
    #[arg(long, default_value = DEFAULT_UNASSIGNED_LABEL)]
    unassigned_label: String,
}

fn spinner(color: &str, msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg.to_string());
    spinner
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let progress = spinner("green", "Assigning consensus taxonomy...");
    let results = assign_taxonomy(
        &cli.uc_file,
        &cli.taxonomy,
        cli.min_consensus_fraction,
        &cli.unassigned_label,
    )
    .expect("Taxonomy assignment failed");
    progress.finish_with_message(format!(
        "Assigned taxonomy for {} queries.",
        results.assignments.len()
    ));

    let progress = spinner("yellow", "Writing output file...");
    fs::write(&cli.output, results.render_tsv()).expect("Could not write output file");
    progress.finish_with_message(format!("Wrote {}.", cli.output.display()));
}
