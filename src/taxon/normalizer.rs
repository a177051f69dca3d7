use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}))(;?)")
        .expect("valid HTML entity regex")
});

// Named entities that HTML also accepts without the closing semicolon.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr",
    "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm",
    "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy",
    "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml",
    "uuml", "yacute", "yen", "yuml",
];

/// Decodes HTML character entities into the characters they stand for.
///
/// Covers the whole HTML5 named table, decimal and hex references, and the
/// legacy names that may omit their semicolon (`&amp`, `&eacute`). Unknown
/// names and numeric references that do not name a valid scalar value are
/// left as they are.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY_REGEX.replace_all(text, |caps: &Captures| {
        let semicolon = &caps[4];
        let decoded = if let Some(dec) = caps.get(1) {
            dec.as_str().parse().ok().and_then(decode_code_point).map(String::from)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(decode_code_point)
                .map(String::from)
        } else {
            decode_named(&caps[3], semicolon)
        };
        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

fn decode_code_point(code: u32) -> Option<char> {
    if code == 0 {
        return None;
    }
    char::from_u32(code)
}

fn decode_named(name: &str, semicolon: &str) -> Option<String> {
    if !semicolon.is_empty() {
        if let Some(decoded) = lookup_named(name) {
            return Some(decoded);
        }
    }
    // Longest legacy name the reference starts with; the rest stays as text.
    let prefix = (2..=name.len())
        .rev()
        .map(|end| &name[..end])
        .find(|prefix| LEGACY_ENTITIES.contains(prefix))?;
    let decoded = lookup_named(prefix)?;
    Some(format!("{}{}{}", decoded, &name[prefix.len()..], semicolon))
}

fn lookup_named(name: &str) -> Option<String> {
    let entity = format!("&{};", name);
    let decoded = html_escape::decode_html_entities(&entity);
    if decoded.as_ref() == entity.as_str() {
        None
    } else {
        Some(decoded.into_owned())
    }
}
