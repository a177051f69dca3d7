//! Writers that project the record list into TSV, CSV, JSON and Markdown.
use crate::error::Result;
use crate::taxon::record::{RECORD_COLUMNS, TaxonomicRecord};
use csv::WriterBuilder;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const RESULTS_MARKDOWN: &str = "EXTRACTION_RESULTS.md";
pub const RESULTS_TSV: &str = "EXTRACTION_RESULTS.tsv";

const MARKDOWN_HEADER: [&str; 9] = [
    "Subfamily",
    "Tribe",
    "Genus",
    "Specific Epithet",
    "Subspecific Epithet",
    "Common Name",
    "Scientific Name",
    "Author",
    "Year",
];

pub fn write_tsv(records: &[TaxonomicRecord], writer: &mut dyn Write) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.write_record(record.columns())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(records: &[TaxonomicRecord], writer: &mut dyn Write) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json(records: &[TaxonomicRecord], writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writeln!(writer)?;
    Ok(())
}

fn markdown_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

fn markdown_row<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    let cells: Vec<String> = cells.into_iter().map(markdown_cell).collect();
    format!("| {} |", cells.join(" | "))
}

pub fn render_markdown(records: &[TaxonomicRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(markdown_row(MARKDOWN_HEADER));
    lines.push(format!(
        "|{}|",
        MARKDOWN_HEADER
            .iter()
            .map(|h| "-".repeat(h.len() + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for record in records {
        lines.push(markdown_row(record.columns()));
    }
    lines.join("\n")
}

pub fn write_markdown(records: &[TaxonomicRecord], writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "{}", render_markdown(records))?;
    Ok(())
}

/// Fixed-width table for the terminal.
pub fn write_text_table(records: &[TaxonomicRecord], writer: &mut dyn Write) -> Result<()> {
    let rule = "=".repeat(160);
    writeln!(writer)?;
    writeln!(writer, "{}", rule)?;
    writeln!(
        writer,
        "{:<18} {:<15} {:<15} {:<15} {:<15} {:<20} {:<25} {:<15} {:<6}",
        "Subfamily",
        "Tribe",
        "Genus",
        "Sp. Epithet",
        "Subsp. Epithet",
        "Common Name",
        "Scientific Name",
        "Author",
        "Year"
    )?;
    writeln!(writer, "{}", rule)?;
    for r in records {
        writeln!(
            writer,
            "{:<18} {:<15} {:<15} {:<15} {:<15} {:<20} {:<25} {:<15} {:<6}",
            r.higher_rank_1,
            r.higher_rank_2,
            r.genus,
            r.specific_epithet,
            r.subspecific_epithet,
            r.common_name,
            r.scientific_name,
            r.author,
            r.year_of_publication
        )?;
    }
    writeln!(writer, "{}", rule)?;
    writeln!(writer, "\nTotal species found: {}", records.len())?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Tsv,
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    fn label(self) -> &'static str {
        match self {
            ExportFormat::Tsv => "TSV",
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Markdown => "Markdown table",
        }
    }
}

/// Writes `records` to `path` in the given format.
///
/// Returns `false` without creating the file when there is nothing to write,
/// except for JSON which always gets an array.
pub fn export_to_file(records: &[TaxonomicRecord], format: ExportFormat, path: &Path) -> Result<bool> {
    if records.is_empty() && format != ExportFormat::Json {
        warn!("No species found! Skipping {} export to {:?}", format.label(), path);
        return Ok(false);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Tsv => write_tsv(records, &mut writer)?,
        ExportFormat::Csv => write_csv(records, &mut writer)?,
        ExportFormat::Json => write_json(records, &mut writer)?,
        ExportFormat::Markdown => write_markdown(records, &mut writer)?,
    }
    writer.flush()?;
    info!("{} exported to: {:?}", format.label(), path);
    Ok(true)
}

/// Writes the Markdown and TSV result files into `dir`.
pub fn write_results_bundle(records: &[TaxonomicRecord], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (format, name) in [
        (ExportFormat::Markdown, RESULTS_MARKDOWN),
        (ExportFormat::Tsv, RESULTS_TSV),
    ] {
        let path = dir.join(name);
        if export_to_file(records, format, &path)? {
            written.push(path);
        }
    }
    Ok(written)
}
