//! Turns gallery text units into deduplicated species records.
use crate::config::ExtractorConfig;
use crate::taxon::common_name::filter_common_name;
use crate::taxon::dedup::Deduplicator;
use crate::taxon::normalizer::decode_entities;
use crate::taxon::patterns::{Authority, match_name, match_taxonomy};
use crate::taxon::reconciler::reconcile_finer_rank;
use crate::taxon::record::{TaxonomicRecord, build_record};
use crate::taxon::validator::{Rejection, validate_candidate};
use log::{debug, trace};

/// Text pulled from one gallery item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextUnit {
    pub title: String,
    pub description: String,
}

impl TextUnit {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What happened to a single text unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// A new record was appended; holds its index.
    Accepted(usize),
    NoMatch,
    Rejected(Rejection),
    MissingTaxonomy,
    Duplicate,
}

/// Per-outcome tallies for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub units: usize,
    pub accepted: usize,
    pub no_match: usize,
    pub rejected: usize,
    pub missing_taxonomy: usize,
    pub duplicates: usize,
}

impl ExtractionStats {
    pub fn record(&mut self, outcome: &UnitOutcome) {
        self.units += 1;
        match outcome {
            UnitOutcome::Accepted(_) => self.accepted += 1,
            UnitOutcome::NoMatch => self.no_match += 1,
            UnitOutcome::Rejected(_) => self.rejected += 1,
            UnitOutcome::MissingTaxonomy => self.missing_taxonomy += 1,
            UnitOutcome::Duplicate => self.duplicates += 1,
        }
    }
}

/// State for one extraction run: the seen identities and the records so far.
#[derive(Debug)]
pub struct SpeciesExtractor {
    config: ExtractorConfig,
    dedup: Deduplicator,
    records: Vec<TaxonomicRecord>,
    stats: ExtractionStats,
}

impl SpeciesExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            dedup: Deduplicator::new(),
            records: Vec::new(),
            stats: ExtractionStats::default(),
        }
    }

    /// Runs one text unit through the pipeline, appending a record if it
    /// survives every step.
    pub fn process(&mut self, unit: &TextUnit) -> UnitOutcome {
        let outcome = self.process_unit(unit);
        self.stats.record(&outcome);
        outcome
    }

    fn process_unit(&mut self, unit: &TextUnit) -> UnitOutcome {
        let description = decode_entities(&unit.description);

        let candidate = match match_name(&description).into_candidate() {
            Some(candidate) => candidate,
            None => return UnitOutcome::NoMatch,
        };

        let name = match validate_candidate(candidate, &self.config.tables, &self.config.thresholds)
        {
            Ok(name) => name,
            Err(rejection) => {
                debug!("Skipping candidate: {}", rejection);
                return UnitOutcome::Rejected(rejection);
            }
        };

        let taxonomy = match match_taxonomy(&description) {
            Some(taxonomy) => taxonomy,
            None => {
                debug!(
                    "Skipping {} {}: no taxonomy line",
                    name.genus, name.specific_epithet
                );
                return UnitOutcome::MissingTaxonomy;
            }
        };

        trace!(
            "{} {} classified under {}; {}",
            name.genus, name.specific_epithet, taxonomy.family, taxonomy.minor_rank
        );
        let finer_rank = reconcile_finer_rank(&self.config.tables, &name.genus, taxonomy.finer_rank);
        let (author, year) = match name.authority {
            Some(Authority { author, year }) => (author, year),
            None => (String::new(), String::new()),
        };
        let common_name = filter_common_name(
            &decode_entities(&unit.title),
            self.config.thresholds.uppercase_ratio,
        );

        let record = build_record(
            name.genus,
            name.specific_epithet,
            name.subspecific_epithet,
            common_name,
            author,
            year,
            taxonomy.minor_rank,
            finer_rank,
        );

        if !self.dedup.first_sighting(record.identity_key()) {
            trace!("Duplicate record for {}", record.scientific_name);
            return UnitOutcome::Duplicate;
        }

        self.records.push(record);
        UnitOutcome::Accepted(self.records.len() - 1)
    }

    pub fn process_all<'a>(&mut self, units: impl IntoIterator<Item = &'a TextUnit>) {
        for unit in units {
            self.process(unit);
        }
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    pub fn into_records(self) -> Vec<TaxonomicRecord> {
        self.records
    }
}
