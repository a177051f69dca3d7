use once_cell::sync::Lazy;
use regex::Regex;

// Genus species [subspecies] Author[,] Year
static FULL_SPECIES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-z]+)\s+([a-z]+)(?:\s+([a-z]+))?\s+(\p{Lu}[\p{L}\s.&,\-]*[\p{L}.]),?\s+(\d{4})")
        .expect("valid full species regex")
});

// Genus sp. [?|♀|♂]
static UNSPECIFIED_SPECIES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-z]+)\s+(sp\.?)(?:\s+[?♀♂])?").expect("valid unspecified species regex")
});

// Family; Subfamily[; Tribe]
static TAXONOMY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z]+);\s*([A-Za-z]+)(?:;\s*([A-Za-z]+))?").expect("valid taxonomy regex")
});

/// Author citation attached to a fully named species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    pub author: String,
    pub year: String,
}

/// Raw fields captured by a name recognizer, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCandidate {
    pub genus: String,
    pub specific_epithet: String,
    pub subspecific_epithet: Option<String>,
    pub authority: Option<Authority>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Full(NameCandidate),
    Unspecified(NameCandidate),
    NoMatch,
}

impl NameMatch {
    pub fn is_match(&self) -> bool {
        !matches!(self, NameMatch::NoMatch)
    }

    pub fn into_candidate(self) -> Option<NameCandidate> {
        match self {
            NameMatch::Full(c) | NameMatch::Unspecified(c) => Some(c),
            NameMatch::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    FullSpecies,
    UnspecifiedSpecies,
}

/// Recognizers in the order they are tried; the first match wins.
pub const NAME_PATTERN_PRECEDENCE: [NamePattern; 2] =
    [NamePattern::FullSpecies, NamePattern::UnspecifiedSpecies];

impl NamePattern {
    /// Leftmost match of this recognizer in `text`.
    pub fn try_match(self, text: &str) -> NameMatch {
        match self {
            NamePattern::FullSpecies => match FULL_SPECIES_REGEX.captures(text) {
                Some(caps) => NameMatch::Full(NameCandidate {
                    genus: caps[1].to_string(),
                    specific_epithet: caps[2].to_string(),
                    subspecific_epithet: caps.get(3).map(|m| m.as_str().to_string()),
                    authority: Some(Authority {
                        author: caps[4].to_string(),
                        year: caps[5].to_string(),
                    }),
                }),
                None => NameMatch::NoMatch,
            },
            NamePattern::UnspecifiedSpecies => match UNSPECIFIED_SPECIES_REGEX.captures(text) {
                Some(caps) => NameMatch::Unspecified(NameCandidate {
                    genus: caps[1].to_string(),
                    specific_epithet: caps[2].to_string(),
                    subspecific_epithet: None,
                    authority: None,
                }),
                None => NameMatch::NoMatch,
            },
        }
    }
}

/// Tries each recognizer in precedence order.
pub fn match_name(text: &str) -> NameMatch {
    NAME_PATTERN_PRECEDENCE
        .iter()
        .map(|pattern| pattern.try_match(text))
        .find(NameMatch::is_match)
        .unwrap_or(NameMatch::NoMatch)
}

/// Ranks captured from a `Family; Subfamily[; Tribe]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyMatch {
    pub family: String,
    /// Second token, e.g. the subfamily.
    pub minor_rank: String,
    /// Third token, e.g. the tribe. Empty when the line has only two tokens.
    pub finer_rank: String,
}

pub fn match_taxonomy(text: &str) -> Option<TaxonomyMatch> {
    TAXONOMY_REGEX.captures(text).map(|caps| TaxonomyMatch {
        family: caps[1].to_string(),
        minor_rank: caps[2].to_string(),
        finer_rank: caps
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(text: &str) -> NameCandidate {
        match match_name(text) {
            NameMatch::Full(c) => c,
            other => panic!("expected a full match for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn full_species_with_comma_before_year() {
        let c = full("Danaus genutia Cramer, 1779");
        assert_eq!(c.genus, "Danaus");
        assert_eq!(c.specific_epithet, "genutia");
        assert_eq!(c.subspecific_epithet, None);
        assert_eq!(
            c.authority,
            Some(Authority {
                author: "Cramer".to_string(),
                year: "1779".to_string()
            })
        );
    }

    #[test]
    fn full_species_without_comma_and_with_subspecies() {
        let c = full("Troides rhadamantus plateni Staudinger 1888");
        assert_eq!(c.subspecific_epithet.as_deref(), Some("plateni"));
        let authority = c.authority.unwrap();
        assert_eq!(authority.author, "Staudinger");
        assert_eq!(authority.year, "1888");
    }

    #[test]
    fn multi_part_authors_are_captured() {
        let c = full("Arhopala anthelus C. & R. Felder, 1860");
        assert_eq!(c.authority.unwrap().author, "C. & R. Felder");

        let c = full("Jamides cleodus Felder & Felder 1865");
        assert_eq!(c.authority.unwrap().author, "Felder & Felder");

        let c = full("Appias nero domitia C. Felder & R. Felder, 1862");
        assert_eq!(c.subspecific_epithet.as_deref(), Some("domitia"));
        assert_eq!(c.authority.unwrap().author, "C. Felder & R. Felder");
    }

    #[test]
    fn accented_authors_are_captured() {
        let c = full("Ideopsis juventa Frühstorfer, 1899");
        assert_eq!(c.authority.unwrap().author, "Frühstorfer");

        let c = full("Arhopala anthelus C. Åhlin, 1860");
        assert_eq!(c.authority.unwrap().author, "C. Åhlin");
    }

    #[test]
    fn full_pattern_wins_over_unspecified() {
        let m = match_name("Delias sp. ? and Delias henningia Eschscholtz, 1821");
        assert!(matches!(m, NameMatch::Full(ref c) if c.specific_epithet == "henningia"));
    }

    #[test]
    fn unspecified_species_variants() {
        for (text, epithet) in [
            ("Sinthusa sp. ?", "sp."),
            ("Sinthusa sp ♀", "sp"),
            ("Arhopala sp. ♂", "sp."),
            ("Arhopala sp.", "sp."),
        ] {
            match match_name(text) {
                NameMatch::Unspecified(c) => {
                    assert_eq!(c.specific_epithet, epithet, "{text}");
                    assert!(c.authority.is_none());
                    assert!(c.subspecific_epithet.is_none());
                }
                other => panic!("expected unspecified match for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn text_without_names_does_not_match() {
        assert_eq!(match_name("Photographed in Mindanao"), NameMatch::NoMatch);
        assert_eq!(match_name("lowercase words only 1999"), NameMatch::NoMatch);
        assert_eq!(match_name(""), NameMatch::NoMatch);
    }

    #[test]
    fn taxonomy_with_three_ranks() {
        let t = match_taxonomy("Lycaenidae; Polyommatinae; Polyommatini").unwrap();
        assert_eq!(t.family, "Lycaenidae");
        assert_eq!(t.minor_rank, "Polyommatinae");
        assert_eq!(t.finer_rank, "Polyommatini");
    }

    #[test]
    fn taxonomy_with_two_ranks_has_empty_finer_rank() {
        let t = match_taxonomy("Danaus genutia Cramer, 1779\nNymphalidae;Danainae").unwrap();
        assert_eq!(t.minor_rank, "Danainae");
        assert_eq!(t.finer_rank, "");
    }

    #[test]
    fn missing_taxonomy_line() {
        assert!(match_taxonomy("Danaus genutia Cramer, 1779").is_none());
    }
}
