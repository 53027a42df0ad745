//! Extraction of raw listing records from an Avito search page.
//!
//! Each result card is an element marked `data-marker="item"` carrying
//! schema.org microdata (`itemprop`) for its name, price, description,
//! detail link and preview image.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::domain::RawListing;
use crate::error::SourceError;

struct ItemSelectors {
    item: Selector,
    name: Selector,
    price: Selector,
    description: Selector,
    url: Selector,
    image: Selector,
}

impl ItemSelectors {
    fn new() -> Result<Self, SourceError> {
        Ok(Self {
            item: selector(r#"[data-marker="item"]"#)?,
            name: selector(r#"h3[itemprop="name"]"#)?,
            price: selector(r#"meta[itemprop="price"]"#)?,
            description: selector(r#"meta[itemprop="description"]"#)?,
            url: selector(r#"a[itemprop="url"]"#)?,
            image: selector(r#"img[itemprop="image"]"#)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("selector {css}: {e}")))
}

/// Extract every result card from the page, in page order.
///
/// Cards without a name or detail link cannot be identified and are
/// skipped. Missing optional parts (price, description, image) are left
/// for the filter to judge.
pub fn parse_listings(html: &str) -> Result<Vec<RawListing>, SourceError> {
    let selectors = ItemSelectors::new()?;
    let document = Html::parse_document(html);

    let mut listings = Vec::new();
    let mut skipped = 0usize;

    for item in document.select(&selectors.item) {
        match parse_item(&item, &selectors) {
            Some(raw) => listings.push(raw),
            None => skipped += 1,
        }
    }

    if listings.is_empty() && skipped == 0 {
        warn!("No listing cards found on page");
    }
    debug!(count = listings.len(), skipped, "Parsed listing cards");

    Ok(listings)
}

fn parse_item(item: &ElementRef<'_>, selectors: &ItemSelectors) -> Option<RawListing> {
    let name = item
        .select(&selectors.name)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty());
    let detail_path = first_attr(item, &selectors.url, "href");

    let (Some(name), Some(detail_path)) = (name, detail_path) else {
        debug!("Skipping listing card without name or link");
        return None;
    };

    Some(RawListing {
        name,
        price: first_attr(item, &selectors.price, "content"),
        description: first_attr(item, &selectors.description, "content").unwrap_or_default(),
        image: first_attr(item, &selectors.image, "src"),
        detail_path,
    })
}

fn first_attr(item: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    item.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}
