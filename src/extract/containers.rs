//! Platform-container extraction: description/equipment blocks located by
//! test-id or class-name vocabulary, plus label/value technical specs from
//! definition lists and spec tables.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use super::Extraction;
use crate::parsers::{clean_text, extract_mileage, extract_registration, parse_amount};

const CONTAINER_TOKENS: &[&str] = &[
    "description",
    "beschreibung",
    "equipment",
    "ausstattung",
    "feature",
    "merkmale",
    "details",
    "data",
];

/// Length gates on a single matched block: shorter is navigation noise,
/// longer is a whole-page container.
const BLOCK_MIN_CHARS: usize = 40;
const BLOCK_MAX_CHARS: usize = 4_000;

pub fn extract(document: &Html) -> Extraction {
    let mut result = Extraction::default();
    let mut blocks = Vec::new();
    let mut seen = HashSet::new();

    for token in CONTAINER_TOKENS {
        for attribute in ["data-testid", "class"] {
            let selector = match Selector::parse(&format!("[{attribute}*=\"{token}\"]")) {
                Ok(selector) => selector,
                Err(_) => continue,
            };
            for element in document.select(&selector) {
                let text = clean_text(&element.text().collect::<String>());
                let length = text.chars().count();
                if length < BLOCK_MIN_CHARS || length > BLOCK_MAX_CHARS {
                    continue;
                }
                if seen.insert(text.clone()) {
                    blocks.push(text);
                }
            }
        }
    }

    blocks.extend(collect_spec_pairs(document, &mut result));

    if !blocks.is_empty() {
        result.feature_text = Some(blocks.join(" | "));
    }

    result
}

/// Collect label/value pairs from definition lists and th/td spec tables
/// into "label: value" lines; known labels additionally feed the numeric
/// fields of the record.
fn collect_spec_pairs(document: &Html, result: &mut Extraction) -> Vec<String> {
    let mut lines = Vec::new();

    if let Ok(dl_selector) = Selector::parse("dl") {
        for dl in document.select(&dl_selector) {
            let mut label: Option<String> = None;
            for child in dl.children() {
                let element = match ElementRef::wrap(child) {
                    Some(element) => element,
                    None => continue,
                };
                match element.value().name() {
                    "dt" => label = Some(clean_text(&element.text().collect::<String>())),
                    "dd" => {
                        if let Some(key) = label.take() {
                            let value = clean_text(&element.text().collect::<String>());
                            push_pair(&key, &value, result, &mut lines);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    if let Ok(row_selector) = Selector::parse("tr") {
        let th_selector = Selector::parse("th").unwrap();
        let td_selector = Selector::parse("td").unwrap();
        for row in document.select(&row_selector) {
            if let Some(th) = row.select(&th_selector).next() {
                if let Some(td) = row.select(&td_selector).next() {
                    let key = clean_text(&th.text().collect::<String>());
                    let value = clean_text(&td.text().collect::<String>());
                    push_pair(&key, &value, result, &mut lines);
                }
            }
        }
    }

    lines
}

fn push_pair(label: &str, value: &str, result: &mut Extraction, lines: &mut Vec<String>) {
    if label.is_empty() || value.is_empty() {
        return;
    }
    apply_known_label(label, value, result);
    lines.push(format!("{}: {}", label, value));
}

fn apply_known_label(label: &str, value: &str, result: &mut Extraction) {
    let label_lower = label.to_lowercase();

    if label_lower.contains("kilometerstand")
        || label_lower.contains("laufleistung")
        || label_lower.contains("mileage")
    {
        if result.mileage.is_none() {
            result.mileage = extract_mileage(value)
                .or_else(|| parse_amount(value))
                .filter(|mileage| *mileage > 0);
        }
    } else if label_lower.contains("erstzulassung")
        || label_lower.contains("first registration")
        || label_lower == "ez"
    {
        if result.first_registration.is_none() {
            let token = extract_registration(value).unwrap_or_else(|| value.to_string());
            result.first_registration = Some(token);
        }
    }
}
