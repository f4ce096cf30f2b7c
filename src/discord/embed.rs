use chrono::Local;
use serde_json::{json, Value};

use crate::analyzer::AnalysisReport;
use crate::models::{DealRating, REGISTRATION_UNKNOWN};

const EMOJI_PRICE: &str = "💰";
const EMOJI_ESTIMATE: &str = "📊";
const EMOJI_POTENTIAL: &str = "🎯";
const EMOJI_RATING: &str = "⭐";
const EMOJI_MILEAGE: &str = "🛣️";
const EMOJI_YEAR: &str = "🗓️";
const EMOJI_ARGUMENTS: &str = "🗣️";
const EMOJI_SCRIPT: &str = "💬";
const EMOJI_QUESTION: &str = "❓";

fn rating_color(rating: DealRating) -> u32 {
    match rating {
        DealRating::GoodDeal => 0x2E8B57,
        DealRating::Fair => 0xDAA520,
        DealRating::Overpriced => 0xB22222,
    }
}

fn rating_label(rating: DealRating) -> &'static str {
    match rating {
        DealRating::GoodDeal => "Gutes Angebot",
        DealRating::Fair => "Fairer Preis",
        DealRating::Overpriced => "Überteuert",
    }
}

pub fn create_embed(report: &AnalysisReport) -> Value {
    let record = &report.record;
    let assessment = &report.assessment;

    let price_display = if record.price_known {
        format!("{} €", record.price)
    } else {
        EMOJI_QUESTION.to_string()
    };

    let mut fields = vec![
        json!({
            "name": format!("{} Preis:", EMOJI_PRICE),
            "value": format!("**{}**", price_display),
            "inline": true
        }),
        json!({
            "name": format!("{} Marktschätzung:", EMOJI_ESTIMATE),
            "value": format!("**{} €**", assessment.market_price_estimate),
            "inline": true
        }),
        json!({
            "name": format!("{} Potenzial:", EMOJI_POTENTIAL),
            "value": format!("**{} €**", report.negotiation_potential()),
            "inline": true
        }),
        json!({
            "name": format!("{} Bewertung:", EMOJI_RATING),
            "value": format!("**{}**", rating_label(assessment.rating)),
            "inline": false
        }),
    ];

    if record.mileage > 0 {
        fields.push(json!({
            "name": format!("{} Laufleistung:", EMOJI_MILEAGE),
            "value": format!("**{} km**", record.mileage),
            "inline": true
        }));
    }

    if record.first_registration != REGISTRATION_UNKNOWN {
        fields.push(json!({
            "name": format!("{} Erstzulassung:", EMOJI_YEAR),
            "value": format!("**{}**", record.first_registration),
            "inline": true
        }));
    }

    let arguments = assessment
        .arguments
        .iter()
        .enumerate()
        .map(|(index, argument)| format!("{}. {}", index + 1, argument))
        .collect::<Vec<_>>()
        .join("\n");
    fields.push(json!({
        "name": format!("{} Argumente:", EMOJI_ARGUMENTS),
        "value": arguments,
        "inline": false
    }));

    fields.push(json!({
        "name": format!("{} Verhandlungssatz:", EMOJI_SCRIPT),
        "value": format!("_{}_", assessment.script),
        "inline": false
    }));

    let mut embed = json!({
        "title": record.title,
        "url": report.url,
        "color": rating_color(assessment.rating),
        "fields": fields,
        "footer": {
            "text": format!(
                "Deal Advisor - Analyzed: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            )
        }
    });

    if let Some(image_url) = &record.image_url {
        embed["image"] = json!({ "url": image_url });
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assessment, ListingRecord, VehicleFacts};

    fn report() -> AnalysisReport {
        let record = ListingRecord {
            title: "VW Golf VII".to_string(),
            price: 24_990,
            price_known: true,
            mileage: 60_000,
            first_registration: "06/2019".to_string(),
            image_url: Some("https://img.example.com/golf.jpg".to_string()),
            feature_text: "Klimaautomatik".to_string(),
        };
        let facts = VehicleFacts::derive(&record, 2025);
        AnalysisReport {
            url: "https://listing.example/1".to_string(),
            record,
            facts,
            assessment: Assessment {
                rating: DealRating::Overpriced,
                arguments: vec!["a".into(), "b".into(), "c".into()],
                script: "Ich biete 22.000 Euro.".into(),
                market_price_estimate: 22_000,
            },
        }
    }

    #[test]
    fn embed_carries_the_brief() {
        let embed = create_embed(&report());
        assert_eq!(embed["title"], "VW Golf VII");
        assert_eq!(embed["color"], 0xB22222);
        assert_eq!(embed["image"]["url"], "https://img.example.com/golf.jpg");
        let rendered = embed.to_string();
        assert!(rendered.contains("24990 €"));
        assert!(rendered.contains("22000 €"));
        assert!(rendered.contains("Überteuert"));
        assert!(rendered.contains("Ich biete 22.000 Euro."));
    }

    #[test]
    fn unknown_fields_are_omitted_or_masked() {
        let mut sample = report();
        sample.record = ListingRecord::default();
        sample.assessment = Assessment::fallback(0);
        let embed = create_embed(&sample);
        let rendered = embed.to_string();
        assert!(rendered.contains(EMOJI_QUESTION));
        assert!(!rendered.contains("Erstzulassung"));
        assert!(!rendered.contains("Laufleistung"));
        assert!(embed.get("image").is_none());
    }
}
