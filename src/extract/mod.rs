//! Multi-strategy listing normalization.
//!
//! Each strategy is a pure function from the parsed document to a partial
//! record; one merge function applies the precedence rule: structured data
//! beats platform containers beats meta tags, the currency scan only fills
//! a price nothing structured produced, and the cleaned body text is the
//! complete fallback for thin feature text.

use scraper::Html;
use url::Url;

use crate::models::ListingRecord;
use crate::parsers::{scan_price, truncate_chars};

pub mod body;
pub mod containers;
pub mod meta;
pub mod structured;

/// Partial record produced by a single extraction strategy.
#[derive(Debug, Default, Clone)]
pub struct Extraction {
    pub title: Option<String>,
    pub price: Option<u64>,
    pub mileage: Option<u64>,
    pub first_registration: Option<String>,
    pub image_url: Option<String>,
    pub feature_text: Option<String>,
}

/// Below this the accumulated feature text is considered too thin to feed
/// the assessor and the body-text fallback kicks in.
pub const FEATURE_TEXT_MIN: usize = 200;
/// Hard cap on the feature text handed downstream.
pub const FEATURE_TEXT_MAX: usize = 4_000;

/// Convert raw listing HTML into a [`ListingRecord`]. Total: malformed or
/// empty markup degrades to the documented defaults, never an error.
pub fn normalize(html: &str, listing_url: Option<&str>) -> ListingRecord {
    let document = Html::parse_document(html);

    let structured = structured::extract(&document);
    let containers = containers::extract(&document);
    let meta = meta::extract(&document);

    merge(&document, listing_url, &structured, &containers, &meta)
}

fn merge(
    document: &Html,
    listing_url: Option<&str>,
    structured: &Extraction,
    containers: &Extraction,
    meta: &Extraction,
) -> ListingRecord {
    let ordered = [structured, containers, meta];
    let mut record = ListingRecord::default();

    if let Some(title) = first_field(&ordered, |e| e.title.clone()) {
        record.title = title;
    }
    if let Some(price) = first_field(&ordered, |e| e.price) {
        record.price = price;
    }
    if let Some(mileage) = first_field(&ordered, |e| e.mileage) {
        record.mileage = mileage;
    }
    if let Some(registration) = first_field(&ordered, |e| e.first_registration.clone()) {
        record.first_registration = registration;
    }

    record.feature_text = assemble_feature_text(document, containers, meta);

    // Last-resort price recovery, explicitly lower precedence than any
    // structured source.
    if record.price == 0 {
        let haystack = format!("{} {}", record.title, record.feature_text);
        if let Some(price) = scan_price(&haystack) {
            record.price = price;
        }
    }
    record.price_known = record.price > 0;

    if let Some(raw) = first_field(&ordered, |e| e.image_url.clone()) {
        record.image_url = absolutize(&raw, listing_url);
    }

    record
}

fn first_field<T>(ordered: &[&Extraction], field: impl Fn(&Extraction) -> Option<T>) -> Option<T> {
    ordered.iter().find_map(|extraction| field(extraction))
}

/// Container text is the primary source; the meta description tops it up
/// when thin, and the noise-stripped body text replaces the lot when even
/// that stays under the threshold.
fn assemble_feature_text(document: &Html, containers: &Extraction, meta: &Extraction) -> String {
    let mut feature = containers.feature_text.clone().unwrap_or_default();

    if feature.chars().count() < FEATURE_TEXT_MIN {
        if let Some(description) = &meta.feature_text {
            if !feature.contains(description.as_str()) {
                if !feature.is_empty() {
                    feature.push_str(" | ");
                }
                feature.push_str(description);
            }
        }
    }

    if feature.chars().count() < FEATURE_TEXT_MIN {
        let body_text = body::visible_body_text(document);
        if body_text.chars().count() > feature.chars().count() {
            feature = body_text;
        }
    }

    truncate_chars(&feature, FEATURE_TEXT_MAX)
}

/// Downstream consumers require absolute, scheme-qualified image URLs;
/// relative candidates are resolved against the listing URL or dropped.
fn absolutize(candidate: &str, listing_url: Option<&str>) -> Option<String> {
    if let Ok(url) = Url::parse(candidate) {
        return match url.scheme() {
            "http" | "https" => Some(url.to_string()),
            _ => None,
        };
    }
    let base = Url::parse(listing_url?).ok()?;
    base.join(candidate).ok().map(|url| url.to_string())
}
