pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gallery;
pub mod taxon;

use clap::Parser;
use cli::Cli;
use config::{ExtractorConfig, load_config};
use error::{CrateError, Result};
use export::{ExportFormat, export_to_file, write_results_bundle, write_text_table};
use gallery::read_gallery;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use taxon::extractor::SpeciesExtractor;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = env_logger::Builder::from_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(cli.log_level())
        .try_init()
    {
        eprintln!("Failed to initialize logger: {}", e);
    }

    info!("Starting species extraction...");
    info!("Input file: {:?}", cli.input_file);
    let start_time = Instant::now();

    if !cli.input_file.exists() {
        error!("File not found: {:?}", cli.input_file);
        return Err(CrateError::InputNotFound(cli.input_file));
    }

    // 1. Configuration
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExtractorConfig::default(),
    };

    // 2. Gallery items
    let units = match read_gallery(&cli.input_file, &cli.selectors()) {
        Ok(units) => units,
        Err(e) => {
            error!("Failed to read gallery items: {}", e);
            return Err(e);
        }
    };

    // 3. Extraction
    let pb = ProgressBar::new(units.len() as u64);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        Ok(style) => pb.set_style(style.progress_chars("##-")),
        Err(e) => warn!("Falling back to the default progress style: {}", e),
    }

    let mut extractor = SpeciesExtractor::new(config);
    extractor.process_all(units.iter().inspect(|_| pb.inc(1)));
    pb.finish_with_message("Gallery items processed.");

    let stats = extractor.stats();
    let records = extractor.into_records();
    info!(
        "Finished extraction. {} records from {} gallery items.",
        records.len(),
        stats.units
    );

    if !cli.quiet {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if records.is_empty() {
            println!("No species found!");
        } else {
            write_text_table(&records, &mut handle)?;
        }
    }

    if !records.is_empty() && records.len() <= 5 {
        warn!(
            "Only {} species found. Wix galleries may load items dynamically; \
the saved page might not contain the full gallery.",
            records.len()
        );
    }

    // 4. Output files
    let mut written: Vec<PathBuf> = Vec::new();
    if let Some(dir) = &cli.results_dir {
        written.extend(write_results_bundle(&records, dir)?);
    }
    for (path, format) in [
        (&cli.tsv, ExportFormat::Tsv),
        (&cli.csv, ExportFormat::Csv),
        (&cli.json, ExportFormat::Json),
        (&cli.md, ExportFormat::Markdown),
    ] {
        if let Some(path) = path {
            if export_to_file(&records, format, path)? {
                written.push(path.clone());
            }
        }
    }

    let duration = start_time.elapsed();

    println!("\n--- Summary Report ---");
    println!("Gallery items read: {}", stats.units);
    println!("Species records extracted: {}", stats.accepted);
    println!("Items without a species name: {}", stats.no_match);
    println!("Names rejected as implausible: {}", stats.rejected);
    println!("Names without a taxonomy line: {}", stats.missing_taxonomy);
    println!("Duplicate entries dropped: {}", stats.duplicates);
    if written.is_empty() {
        println!("No output files written.");
    } else {
        println!("Output files:");
        for path in &written {
            println!("- {}", path.display());
        }
    }
    println!("Execution time: {:.2?}", duration);

    Ok(())
}
