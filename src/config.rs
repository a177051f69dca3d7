use crate::error::{CrateError, Result};
use log::info;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Minimum length of a specific or subspecific epithet.
pub const MIN_EPITHET_LEN: usize = 3;
/// Minimum length of a cleaned author string.
pub const MIN_AUTHOR_LEN: usize = 3;
/// Share of uppercase letters a title needs to count as a common name.
pub const UPPERCASE_RATIO_THRESHOLD: f64 = 0.7;

/// Genera whose tribe is mislabelled by the source gallery template.
const DEFAULT_FINER_RANK_CORRECTIONS: [(&str, &str); 1] = [("Sinthusa", "Polyommatini")];

/// Capitalized words that the name pattern picks up but are not genera.
const DEFAULT_REJECTED_GENERA: [&str; 13] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "treadaway",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    finer_rank_corrections: HashMap<String, String>,
    // Stored lowercased.
    rejected_genera: HashSet<String>,
}

impl ReferenceTables {
    pub fn new<C, R, S>(corrections: C, rejected: R) -> Self
    where
        C: IntoIterator<Item = (String, String)>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            finer_rank_corrections: corrections.into_iter().collect(),
            rejected_genera: rejected
                .into_iter()
                .map(|g| g.as_ref().trim().to_lowercase())
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }

    /// Corrected finer rank for `genus`, if the genus is listed.
    pub fn finer_rank_correction(&self, genus: &str) -> Option<&str> {
        self.finer_rank_corrections.get(genus).map(String::as_str)
    }

    pub fn is_rejected_genus(&self, genus: &str) -> bool {
        self.rejected_genera.contains(&genus.to_lowercase())
    }

    fn merge(&mut self, other: ReferenceTables) {
        self.finer_rank_corrections
            .extend(other.finer_rank_corrections);
        self.rejected_genera.extend(other.rejected_genera);
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::new(
            DEFAULT_FINER_RANK_CORRECTIONS
                .iter()
                .map(|(g, r)| (g.to_string(), r.to_string())),
            DEFAULT_REJECTED_GENERA,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub min_epithet_len: usize,
    pub min_author_len: usize,
    pub uppercase_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_epithet_len: MIN_EPITHET_LEN,
            min_author_len: MIN_AUTHOR_LEN,
            uppercase_ratio: UPPERCASE_RATIO_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractorConfig {
    pub tables: ReferenceTables,
    pub thresholds: Thresholds,
}

// On-disk shape of a configuration file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_extend")]
    extend_defaults: bool,
    #[serde(default)]
    finer_rank_corrections: HashMap<String, String>,
    #[serde(default)]
    rejected_genera: Vec<String>,
    #[serde(default)]
    thresholds: Thresholds,
}

fn default_extend() -> bool {
    true
}

/// Parses a JSON configuration document.
pub fn parse_config(json: &str) -> Result<ExtractorConfig> {
    let file: ConfigFile = serde_json::from_str(json)?;

    if !(0.0..=1.0).contains(&file.thresholds.uppercase_ratio) {
        return Err(CrateError::InvalidConfig(format!(
            "uppercase_ratio must be between 0 and 1, got {}",
            file.thresholds.uppercase_ratio
        )));
    }

    let file_tables = ReferenceTables::new(file.finer_rank_corrections, file.rejected_genera);
    let tables = if file.extend_defaults {
        let mut tables = ReferenceTables::default();
        tables.merge(file_tables);
        tables
    } else {
        file_tables
    };

    Ok(ExtractorConfig {
        tables,
        thresholds: file.thresholds,
    })
}

/// Loads an extractor configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractorConfig> {
    info!("Loading extractor configuration from {:?}", path);
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_tables_carry_known_corrections() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.finer_rank_correction("Sinthusa"), Some("Polyommatini"));
        assert_eq!(tables.finer_rank_correction("Danaus"), None);
        assert!(tables.is_rejected_genus("May"));
        assert!(tables.is_rejected_genus("TREADAWAY"));
        assert!(!tables.is_rejected_genus("Papilio"));
    }

    #[test]
    fn correction_keys_are_case_sensitive() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.finer_rank_correction("sinthusa"), None);
    }

    #[test]
    fn empty_config_document_yields_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn file_tables_extend_defaults() {
        let json = r#"{
            "finer_rank_corrections": {"Arhopala": "Arhopalini"},
            "rejected_genera": ["Moore"],
            "thresholds": {"min_epithet_len": 4}
        }"#;
        let config = parse_config(json).unwrap();
        assert_eq!(config.tables.finer_rank_correction("Arhopala"), Some("Arhopalini"));
        assert_eq!(config.tables.finer_rank_correction("Sinthusa"), Some("Polyommatini"));
        assert!(config.tables.is_rejected_genus("moore"));
        assert!(config.tables.is_rejected_genus("june"));
        assert_eq!(config.thresholds.min_epithet_len, 4);
        assert_eq!(config.thresholds.min_author_len, MIN_AUTHOR_LEN);
    }

    #[test]
    fn file_tables_can_replace_defaults() {
        let json = r#"{"extend_defaults": false, "rejected_genera": ["Moore"]}"#;
        let config = parse_config(json).unwrap();
        assert_eq!(config.tables.finer_rank_correction("Sinthusa"), None);
        assert!(!config.tables.is_rejected_genus("june"));
        assert!(config.tables.is_rejected_genus("Moore"));
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        let json = r#"{"thresholds": {"uppercase_ratio": 1.5}}"#;
        assert!(matches!(parse_config(json), Err(CrateError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(parse_config("{not json"), Err(CrateError::JsonError(_))));
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"finer_rank_corrections": {{"Jamides": "Polyommatini"}}}}"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.tables.finer_rank_correction("Jamides"), Some("Polyommatini"));
    }
}
