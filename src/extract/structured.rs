//! Linked-data extraction: `script[type="application/ld+json"]` blocks
//! describing the offer in the schema.org vehicle/product vocabulary.

use scraper::{Html, Selector};
use serde_json::Value;

use super::Extraction;
use crate::parsers::{clean_text, parse_amount, parse_money};

/// Declared types accepted as "this node describes the listing".
const VEHICLE_TYPES: &[&str] = &["Car", "Vehicle", "Product", "Offer"];

pub fn extract(document: &Html) -> Extraction {
    let mut result = Extraction::default();

    let script_selector = match Selector::parse(r#"script[type="application/ld+json"]"#) {
        Ok(selector) => selector,
        Err(_) => return result,
    };

    // A malformed block is skipped and the next one tried; the first block
    // to yield a field wins that field.
    for script in document.select(&script_selector) {
        let payload: String = script.text().collect();
        let json: Value = match serde_json::from_str(&payload) {
            Ok(json) => json,
            Err(_) => continue,
        };

        if let Some(entry) = resolve_entry(&json) {
            apply_entry(entry, &mut result);
        }

        if result.title.is_some()
            && result.price.is_some()
            && result.mileage.is_some()
            && result.image_url.is_some()
        {
            break;
        }
    }

    result
}

/// List payloads resolve to their first element; `@graph` collections are
/// searched for the first entry with an accepted declared type.
fn resolve_entry(json: &Value) -> Option<&Value> {
    let json = match json {
        Value::Array(items) => items.first()?,
        other => other,
    };

    if let Some(graph) = json.get("@graph").and_then(Value::as_array) {
        return graph.iter().find(|entry| is_vehicle_entry(entry));
    }

    if is_vehicle_entry(json) {
        Some(json)
    } else {
        None
    }
}

fn is_vehicle_entry(entry: &Value) -> bool {
    match entry.get("@type") {
        Some(Value::String(declared)) => type_matches(declared),
        Some(Value::Array(declared)) => declared
            .iter()
            .filter_map(Value::as_str)
            .any(type_matches),
        _ => false,
    }
}

fn type_matches(declared: &str) -> bool {
    // Strip namespace prefixes: "schema:Car", "https://schema.org/Car".
    let bare = declared.rsplit(['/', ':']).next().unwrap_or(declared);
    VEHICLE_TYPES
        .iter()
        .any(|accepted| bare.eq_ignore_ascii_case(accepted))
}

fn apply_entry(entry: &Value, result: &mut Extraction) {
    if result.title.is_none() {
        if let Some(name) = entry.get("name").and_then(Value::as_str) {
            let name = clean_text(name);
            if !name.is_empty() {
                result.title = Some(name);
            }
        }
    }
    if result.price.is_none() {
        result.price = offer_price(entry).filter(|price| *price > 0);
    }
    if result.mileage.is_none() {
        result.mileage = odometer_reading(entry).filter(|mileage| *mileage > 0);
    }
    if result.image_url.is_none() {
        result.image_url = entry.get("image").and_then(image_candidate);
    }
}

/// Offer nodes carry the price directly; Product/Car nodes nest it in
/// `offers`, either a single object or an array.
fn offer_price(entry: &Value) -> Option<u64> {
    if let Some(direct) = entry.get("price").and_then(money_value) {
        return Some(direct);
    }
    let offers = entry.get("offers")?;
    let offer = match offers {
        Value::Array(items) => items.first()?,
        other => other,
    };
    offer
        .get("price")
        .and_then(money_value)
        .or_else(|| offer.get("lowPrice").and_then(money_value))
}

fn money_value(value: &Value) -> Option<u64> {
    match value {
        Value::String(text) => parse_money(text),
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        _ => None,
    }
}

fn odometer_reading(entry: &Value) -> Option<u64> {
    let odometer = entry.get("mileageFromOdometer")?;
    let value = match odometer {
        Value::Object(_) => odometer.get("value")?,
        other => other,
    };
    match value {
        Value::String(text) => parse_amount(text),
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        _ => None,
    }
}

/// Image may be a plain string, an array (first element wins), or an
/// object with a `url` field.
fn image_candidate(value: &Value) -> Option<String> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
        Value::Array(items) => items.first().and_then(image_candidate),
        Value::Object(_) => value
            .get("url")
            .and_then(Value::as_str)
            .map(|url| url.trim().to_string()),
        _ => None,
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
    fn graph_collection_is_searched_for_vehicle_entry() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@graph": [
                    {"@type": "BreadcrumbList", "name": "Navigation"},
                    {"@type": "Car", "name": "Skoda Octavia", "offers": {"price": 15200}}
                ]
            }
            </script>
        "#;
        let result = extract_from(html);
        assert_eq!(result.title.as_deref(), Some("Skoda Octavia"));
        assert_eq!(result.price, Some(15_200));
    }

    #[test]
    fn list_payload_resolves_to_first_element() {
        let html = r#"
            <script type="application/ld+json">
            [
                {"@type": "Vehicle", "name": "Opel Corsa"},
                {"@type": "Vehicle", "name": "Zweitwagen"}
            ]
            </script>
        "#;
        assert_eq!(extract_from(html).title.as_deref(), Some("Opel Corsa"));
    }

    #[test]
    fn malformed_block_is_skipped_and_next_tried() {
        let html = r#"
            <script type="application/ld+json">{not json at all</script>
            <script type="application/ld+json">
            {"@type": "Product", "name": "Ford Focus"}
            </script>
        "#;
        assert_eq!(extract_from(html).title.as_deref(), Some("Ford Focus"));
    }

    #[test]
    fn unrelated_types_are_ignored() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Organization", "name": "AutoPortal GmbH"}
            </script>
        "#;
        assert_eq!(extract_from(html).title, None);
    }

    #[test]
    fn namespaced_type_is_accepted() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "schema:Car", "name": "Fiat 500"}
            </script>
        "#;
        assert_eq!(extract_from(html).title.as_deref(), Some("Fiat 500"));
    }

    #[test]
    fn offer_array_and_decimal_price_are_handled() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@type": "Product",
                "name": "Seat Leon",
                "offers": [{"price": "18990.00", "priceCurrency": "EUR"}]
            }
            </script>
        "#;
        assert_eq!(extract_from(html).price, Some(18_990));
    }

    #[test]
    fn offer_node_price_is_read_directly() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Offer", "price": 9999, "name": "Dacia Sandero"}
            </script>
        "#;
        assert_eq!(extract_from(html).price, Some(9_999));
    }

    #[test]
    fn odometer_variants_parse() {
        let object_form = r#"
            <script type="application/ld+json">
            {"@type": "Car", "name": "A", "mileageFromOdometer": {"value": "45.000"}}
            </script>
        "#;
        assert_eq!(extract_from(object_form).mileage, Some(45_000));

        let bare_form = r#"
            <script type="application/ld+json">
            {"@type": "Car", "name": "B", "mileageFromOdometer": 45000}
            </script>
        "#;
        assert_eq!(extract_from(bare_form).mileage, Some(45_000));
    }

    #[test]
    fn image_object_url_is_used() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Car", "name": "C", "image": {"url": "https://img.example.com/c.jpg"}}
            </script>
        "#;
        assert_eq!(
            extract_from(html).image_url.as_deref(),
            Some("https://img.example.com/c.jpg")
        );
    }
}
