use crate::error::{CrateError, Result};
use crate::taxon::extractor::TextUnit;
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::Path;

pub const DEFAULT_ITEM_SELECTOR: &str = "div._L2WwE.eiMHrn.wixui-gallery__item";
pub const DEFAULT_TITLE_SELECTOR: &str = "div.nDAgIZ";
pub const DEFAULT_DESCRIPTION_SELECTOR: &str = "p.ksU5zX";

/// CSS selectors locating gallery items and the parts of each item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySelectors {
    pub item: String,
    pub title: String,
    pub description: String,
}

impl Default for GallerySelectors {
    fn default() -> Self {
        Self {
            item: DEFAULT_ITEM_SELECTOR.to_string(),
            title: DEFAULT_TITLE_SELECTOR.to_string(),
            description: DEFAULT_DESCRIPTION_SELECTOR.to_string(),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| CrateError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

// Trimmed, non-empty text nodes under `element`.
fn text_pieces<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.text().map(str::trim).filter(|t| !t.is_empty())
}

/// Collects one `TextUnit` per gallery item, in document order.
///
/// The description keeps one line per text node so that the name line and the
/// rank line stay apart. Items with no description element are skipped.
pub fn parse_gallery(html: &str, selectors: &GallerySelectors) -> Result<Vec<TextUnit>> {
    let item_sel = parse_selector(&selectors.item)?;
    let title_sel = parse_selector(&selectors.title)?;
    let desc_sel = parse_selector(&selectors.description)?;

    let document = Html::parse_document(html);
    let mut units = Vec::new();
    let mut skipped = 0;

    for item in document.select(&item_sel) {
        let Some(desc) = item.select(&desc_sel).next() else {
            skipped += 1;
            continue;
        };
        let title = item
            .select(&title_sel)
            .next()
            .map(|t| text_pieces(t).collect::<String>())
            .unwrap_or_default();
        let description = text_pieces(desc).collect::<Vec<_>>().join("\n");
        units.push(TextUnit::new(title, description));
    }

    if skipped > 0 {
        debug!("{} gallery items had no description", skipped);
    }
    Ok(units)
}

/// Reads an HTML file and collects its gallery items.
pub fn read_gallery(path: &Path, selectors: &GallerySelectors) -> Result<Vec<TextUnit>> {
    let bytes = fs::read(path)?;
    let html = String::from_utf8_lossy(&bytes);
    let units = parse_gallery(&html, selectors)?;
    info!("Found {} gallery items in {:?}", units.len(), path);
    Ok(units)
}
