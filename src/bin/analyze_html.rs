use anyhow::Result;
use scraper::{Html, Selector};
use std::fs;

/// Offline probe for a saved listing page: reports which extraction
/// signals (linked data, preview metas, container candidates, spec lists)
/// are present so selector vocabularies can be tuned against real dumps.
fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "listing_sample.html".to_string());

    println!("Analyzing {}...", path);
    let html = fs::read_to_string(&path)?;
    let document = Html::parse_document(&html);

    let jsonld_selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let jsonld_count = document.select(&jsonld_selector).count();
    println!("Found {} ld+json blocks", jsonld_count);
    for script in document.select(&jsonld_selector) {
        let payload: String = script.text().collect();
        match serde_json::from_str::<serde_json::Value>(&payload) {
            Ok(json) => println!(
                "  block: @type = {}",
                json.get("@type").map(|t| t.to_string()).unwrap_or_else(|| "<none>".to_string())
            ),
            Err(e) => println!("  block: unparseable ({})", e),
        }
    }

    for key in ["og:title", "og:description", "og:image", "product:price:amount"] {
        let selector = Selector::parse(&format!("meta[property=\"{}\"]", key)).unwrap();
        match document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("content"))
        {
            Some(content) => println!("{}: {}", key, content),
            None => println!("{}: <missing>", key),
        }
    }

    let candidates = vec![
        "[data-testid*=\"description\"]",
        "[class*=\"description\"]",
        "[class*=\"beschreibung\"]",
        "[class*=\"ausstattung\"]",
        "[class*=\"equipment\"]",
        "dl",
        "table tr th",
    ];
    for selector_str in candidates {
        if let Ok(selector) = Selector::parse(selector_str) {
            let count = document.select(&selector).count();
            if count > 0 {
                println!("Selector '{}' matched {} elements", selector_str, count);
            }
        }
    }

    Ok(())
}
