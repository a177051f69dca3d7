use crate::config::{ReferenceTables, Thresholds};
use crate::taxon::patterns::{Authority, NameCandidate};
use std::fmt;

/// Specific epithets that mark a specimen identified only to genus.
pub const UNSPECIFIED_MARKERS: [&str; 2] = ["sp.", "sp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    SpecificEpithet(String),
    SubspecificEpithet(String),
    Author(String),
    RejectedGenus(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::SpecificEpithet(v) => write!(f, "implausible specific epithet '{}'", v),
            Rejection::SubspecificEpithet(v) => {
                write!(f, "implausible subspecific epithet '{}'", v)
            }
            Rejection::Author(v) => write!(f, "implausible author '{}'", v),
            Rejection::RejectedGenus(v) => write!(f, "'{}' is not a genus", v),
        }
    }
}

pub fn is_unspecified_marker(epithet: &str) -> bool {
    UNSPECIFIED_MARKERS.contains(&epithet)
}

pub fn meets_min_length(value: &str, min_len: usize) -> bool {
    value.chars().count() >= min_len
}

/// True when the value has cased letters and none of them are uppercase.
pub fn is_fully_lowercase(value: &str) -> bool {
    value.chars().any(char::is_lowercase) && !value.chars().any(char::is_uppercase)
}

pub fn contains_digit(value: &str) -> bool {
    value.chars().any(char::is_numeric)
}

pub fn has_uppercase(value: &str) -> bool {
    value.chars().any(char::is_uppercase)
}

pub fn is_plausible_epithet(epithet: &str, thresholds: &Thresholds) -> bool {
    meets_min_length(epithet, thresholds.min_epithet_len)
        && is_fully_lowercase(epithet)
        && !contains_digit(epithet)
}

/// Collapses whitespace runs, trims, and drops a trailing comma.
pub fn clean_author(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches(',').trim().to_string()
}

/// An all-lowercase author is usually a stray fragment of the caption.
pub fn is_plausible_author(author: &str, thresholds: &Thresholds) -> bool {
    meets_min_length(author, thresholds.min_author_len) && has_uppercase(author)
}

/// A candidate that passed every plausibility rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedName {
    pub genus: String,
    pub specific_epithet: String,
    pub subspecific_epithet: String,
    pub authority: Option<Authority>,
}

/// Runs each plausibility rule in order and reports the first that fails.
pub fn validate_candidate(
    candidate: NameCandidate,
    tables: &ReferenceTables,
    thresholds: &Thresholds,
) -> Result<ValidatedName, Rejection> {
    let NameCandidate {
        genus,
        specific_epithet,
        subspecific_epithet,
        authority,
    } = candidate;

    if !is_unspecified_marker(&specific_epithet)
        && !is_plausible_epithet(&specific_epithet, thresholds)
    {
        return Err(Rejection::SpecificEpithet(specific_epithet));
    }

    let subspecific_epithet = subspecific_epithet.unwrap_or_default();
    if !subspecific_epithet.is_empty() && !is_plausible_epithet(&subspecific_epithet, thresholds) {
        return Err(Rejection::SubspecificEpithet(subspecific_epithet));
    }

    let authority = match authority {
        Some(Authority { author, year }) => {
            let author = clean_author(&author);
            if !is_plausible_author(&author, thresholds) {
                return Err(Rejection::Author(author));
            }
            Some(Authority { author, year })
        }
        None => None,
    };

    if tables.is_rejected_genus(&genus) {
        return Err(Rejection::RejectedGenus(genus));
    }

    Ok(ValidatedName {
        genus,
        specific_epithet,
        subspecific_epithet,
        authority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        genus: &str,
        species: &str,
        subspecies: Option<&str>,
        author: Option<&str>,
    ) -> NameCandidate {
        NameCandidate {
            genus: genus.to_string(),
            specific_epithet: species.to_string(),
            subspecific_epithet: subspecies.map(String::from),
            authority: author.map(|a| Authority {
                author: a.to_string(),
                year: "1860".to_string(),
            }),
        }
    }

    fn validate(c: NameCandidate) -> Result<ValidatedName, Rejection> {
        validate_candidate(c, &ReferenceTables::default(), &Thresholds::default())
    }

    #[test]
    fn epithet_predicates() {
        let t = Thresholds::default();
        assert!(is_plausible_epithet("genutia", &t));
        assert!(!is_plausible_epithet("ab", &t));
        assert!(!is_plausible_epithet("Genutia", &t));
        assert!(!is_plausible_epithet("gen2tia", &t));
        assert!(!is_plausible_epithet("", &t));
    }

    #[test]
    fn lowercase_predicate_needs_cased_letters() {
        assert!(is_fully_lowercase("abc"));
        assert!(!is_fully_lowercase("123"));
        assert!(!is_fully_lowercase("aBc"));
    }

    #[test]
    fn author_cleanup() {
        assert_eq!(clean_author("  C.   &\nR. Felder ,"), "C. & R. Felder");
        assert_eq!(clean_author("Cramer,"), "Cramer");
        assert_eq!(clean_author("Moore"), "Moore");
    }

    #[test]
    fn author_predicate() {
        let t = Thresholds::default();
        assert!(is_plausible_author("Cramer", &t));
        assert!(!is_plausible_author("Hb", &t));
        assert!(!is_plausible_author("from the", &t));
        assert!(!is_plausible_author("123", &t));
    }

    #[test]
    fn unspecified_marker_skips_epithet_rules() {
        let v = validate(candidate("Sinthusa", "sp.", None, None)).unwrap();
        assert!(is_unspecified_marker(&v.specific_epithet));
        assert!(v.authority.is_none());
        assert_eq!(v.subspecific_epithet, "");
    }

    #[test]
    fn short_specific_epithet_is_rejected() {
        let r = validate(candidate("Papilio", "ab", None, Some("Linnaeus")));
        assert_eq!(r, Err(Rejection::SpecificEpithet("ab".to_string())));
    }

    #[test]
    fn short_subspecific_epithet_is_rejected() {
        let r = validate(candidate("Papilio", "memnon", Some("of"), Some("Linnaeus")));
        assert_eq!(r, Err(Rejection::SubspecificEpithet("of".to_string())));
    }

    #[test]
    fn author_is_cleaned_and_checked() {
        let v = validate(candidate("Papilio", "memnon", None, Some("Linnaeus  ,"))).unwrap();
        assert_eq!(v.authority.unwrap().author, "Linnaeus");

        let r = validate(candidate("Papilio", "memnon", None, Some("L.")));
        assert_eq!(r, Err(Rejection::Author("L.".to_string())));
    }

    #[test]
    fn month_and_surname_genera_are_rejected() {
        let r = validate(candidate("June", "was", None, Some("Rainy")));
        assert_eq!(r, Err(Rejection::RejectedGenus("June".to_string())));
        let r = validate(candidate("Treadaway", "and", None, Some("Nuyda")));
        assert_eq!(r, Err(Rejection::RejectedGenus("Treadaway".to_string())));
    }

    #[test]
    fn substituted_tables_change_the_rejection_set() {
        let tables = ReferenceTables::new(Vec::<(String, String)>::new(), ["Papilio"]);
        let r = validate_candidate(
            candidate("Papilio", "memnon", None, Some("Linnaeus")),
            &tables,
            &Thresholds::default(),
        );
        assert!(matches!(r, Err(Rejection::RejectedGenus(_))));
        let v = validate_candidate(
            candidate("June", "was", None, Some("Rainy")),
            &tables,
            &Thresholds::default(),
        );
        assert!(v.is_ok());
    }
}
