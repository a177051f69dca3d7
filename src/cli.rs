use crate::gallery::{
    DEFAULT_DESCRIPTION_SELECTOR, DEFAULT_ITEM_SELECTOR, DEFAULT_TITLE_SELECTOR, GallerySelectors,
};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extracts butterfly species records from a saved gallery page", long_about = None)]
pub struct Cli {
    /// Path to the saved HTML page.
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,

    /// Write the records as tab-separated values.
    #[arg(long, value_name = "FILE")]
    pub tsv: Option<PathBuf>,

    /// Write the records as comma-separated values.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write the records as a JSON array.
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Write the records as a Markdown table.
    #[arg(long, value_name = "FILE")]
    pub md: Option<PathBuf>,

    /// Directory that receives EXTRACTION_RESULTS.md and EXTRACTION_RESULTS.tsv.
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// JSON file with correction tables, rejected genera and thresholds.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CSS selector of one gallery item.
    #[arg(long, default_value = DEFAULT_ITEM_SELECTOR)]
    pub item_selector: String,

    /// CSS selector of the title (common name) inside an item.
    #[arg(long, default_value = DEFAULT_TITLE_SELECTOR)]
    pub title_selector: String,

    /// CSS selector of the description inside an item.
    #[arg(long, default_value = DEFAULT_DESCRIPTION_SELECTOR)]
    pub description_selector: String,

    /// Do not print the species table.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn selectors(&self) -> GallerySelectors {
        GallerySelectors {
            item: self.item_selector.clone(),
            title: self.title_selector.clone(),
            description: self.description_selector.clone(),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
