use crate::taxon::validator::contains_digit;

/// Sex and uncertainty marks the gallery appends to titles.
const TITLE_GLYPHS: [char; 3] = ['♀', '♂', '?'];

/// Keeps a gallery title as the common name only when it looks like one.
///
/// Titles are rendered in capitals by the site template, so anything mostly
/// lowercase is taken to be a caption fragment and dropped. Titles with
/// digits are never names.
pub fn filter_common_name(title: &str, uppercase_ratio: f64) -> String {
    let title = title.trim();
    if title.is_empty() || contains_digit(title) {
        return String::new();
    }

    let stripped: String = title.chars().filter(|c| !TITLE_GLYPHS.contains(c)).collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return String::new();
    }

    if is_fully_uppercase(stripped) || uppercase_share(stripped) > uppercase_ratio {
        stripped.to_string()
    } else {
        String::new()
    }
}

fn is_fully_uppercase(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

fn uppercase_share(text: &str) -> f64 {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters.max(1) as f64
}
