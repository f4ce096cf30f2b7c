//! Social-preview meta tags: the low-confidence fallback used when neither
//! linked data nor platform containers yielded a field. Listing portals
//! pack mileage / registration / power into `og:description`, separated
//! by bullet characters, so that string is mined for details too.

use scraper::{Html, Selector};

use super::Extraction;
use crate::parsers::{clean_text, extract_mileage, extract_registration, parse_amount, parse_money};

const PRICE_META_KEYS: &[&str] = &["product:price:amount", "og:price:amount"];

pub fn extract(document: &Html) -> Extraction {
    let mut result = Extraction::default();

    if let Some(title) = meta_content(document, "og:title") {
        result.title = Some(title);
    }

    if let Some(description) = meta_content(document, "og:description") {
        mine_description(&description, &mut result);
        result.feature_text = Some(description);
    }

    if let Some(image) = meta_content(document, "og:image") {
        result.image_url = Some(image);
    }

    for key in PRICE_META_KEYS {
        if result.price.is_some() {
            break;
        }
        result.price = meta_content(document, key)
            .and_then(|value| parse_money(&value))
            .filter(|price| *price > 0);
    }

    result
}

fn meta_content(document: &Html, key: &str) -> Option<String> {
    for attribute in ["property", "name"] {
        if let Ok(selector) = Selector::parse(&format!("meta[{}=\"{}\"]", attribute, key)) {
            if let Some(element) = document.select(&selector).next() {
                if let Some(content) = element.value().attr("content") {
                    let content = clean_text(content);
                    if !content.is_empty() {
                        return Some(content);
                    }
                }
            }
        }
    }
    None
}

/// Portal descriptions look like "150.000 km • 06/2015 • 118 kW (160 PS)".
fn mine_description(description: &str, result: &mut Extraction) {
    for part in description.split('•') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if result.mileage.is_none() && part.contains("km") {
            result.mileage = extract_mileage(part)
                .or_else(|| parse_amount(part))
                .filter(|mileage| *mileage > 0);
        } else if result.first_registration.is_none() {
            if let Some(token) = extract_registration(part) {
                result.first_registration = Some(token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract_from(html: &str) -> Extraction {
        extract(&Html::parse_document(html))
    }

    #[test]
    fn preview_tags_are_read() {
        let html = r#"
            <head>
            <meta property="og:title" content="Audi A6 Avant 45 TDI">
            <meta property="og:description" content="98.500 km • 09/2019 • 170 kW (231 PS)">
            <meta property="og:image" content="https://img.example.com/a6.jpg">
            </head>
        "#;
        let result = extract_from(html);
        assert_eq!(result.title.as_deref(), Some("Audi A6 Avant 45 TDI"));
        assert_eq!(result.mileage, Some(98_500));
        assert_eq!(result.first_registration.as_deref(), Some("09/2019"));
        assert_eq!(
            result.image_url.as_deref(),
            Some("https://img.example.com/a6.jpg")
        );
    }

    #[test]
    fn name_attribute_is_a_fallback_for_property() {
        let html = r#"<meta name="og:title" content="Renault Clio">"#;
        assert_eq!(extract_from(html).title.as_deref(), Some("Renault Clio"));
    }

    #[test]
    fn price_meta_is_parsed() {
        let html = r#"<meta property="product:price:amount" content="15990.00">"#;
        assert_eq!(extract_from(html).price, Some(15_990));
    }

    #[test]
    fn empty_content_is_ignored() {
        let html = r#"<meta property="og:title" content="   ">"#;
        assert_eq!(extract_from(html).title, None);
    }

    #[test]
    fn description_without_details_yields_only_feature_text() {
        let html = r#"<meta property="og:description" content="Jetzt Probefahrt vereinbaren!">"#;
        let result = extract_from(html);
        assert_eq!(result.mileage, None);
        assert_eq!(result.first_registration, None);
        assert_eq!(
            result.feature_text.as_deref(),
            Some("Jetzt Probefahrt vereinbaren!")
        );
    }
}
