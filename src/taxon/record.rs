use serde::{Deserialize, Serialize};

/// Column order shared by the tabular exporters.
pub const RECORD_COLUMNS: [&str; 9] = [
    "higher_rank_1",
    "higher_rank_2",
    "genus",
    "specific_epithet",
    "subspecific_epithet",
    "common_name",
    "scientific_name",
    "author",
    "year_of_publication",
];

/// One extracted species. Absent optional fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomicRecord {
    /// e.g. the subfamily.
    pub higher_rank_1: String,
    /// e.g. the tribe; empty when the page gives none.
    pub higher_rank_2: String,
    pub genus: String,
    pub specific_epithet: String,
    pub subspecific_epithet: String,
    pub common_name: String,
    pub scientific_name: String,
    pub author: String,
    pub year_of_publication: String,
}

/// Fields that decide whether two records describe the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub genus: String,
    pub specific_epithet: String,
    pub subspecific_epithet: String,
    pub author: String,
    pub year_of_publication: String,
    pub higher_rank_2: String,
}

impl TaxonomicRecord {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            genus: self.genus.clone(),
            specific_epithet: self.specific_epithet.clone(),
            subspecific_epithet: self.subspecific_epithet.clone(),
            author: self.author.clone(),
            year_of_publication: self.year_of_publication.clone(),
            higher_rank_2: self.higher_rank_2.clone(),
        }
    }

    /// Field values in `RECORD_COLUMNS` order.
    pub fn columns(&self) -> [&str; 9] {
        [
            self.higher_rank_1.as_str(),
            self.higher_rank_2.as_str(),
            self.genus.as_str(),
            self.specific_epithet.as_str(),
            self.subspecific_epithet.as_str(),
            self.common_name.as_str(),
            self.scientific_name.as_str(),
            self.author.as_str(),
            self.year_of_publication.as_str(),
        ]
    }
}

/// Joins the non-empty name parts with single spaces.
pub fn scientific_name(genus: &str, specific_epithet: &str, subspecific_epithet: &str) -> String {
    [genus, specific_epithet, subspecific_epithet]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[allow(clippy::too_many_arguments)]
pub fn build_record(
    genus: String,
    specific_epithet: String,
    subspecific_epithet: String,
    common_name: String,
    author: String,
    year_of_publication: String,
    higher_rank_1: String,
    higher_rank_2: String,
) -> TaxonomicRecord {
    let scientific_name = scientific_name(&genus, &specific_epithet, &subspecific_epithet);
    TaxonomicRecord {
        higher_rank_1,
        higher_rank_2,
        genus,
        specific_epithet,
        subspecific_epithet,
        common_name,
        scientific_name,
        author,
        year_of_publication,
    }
}
