//! Prompt assembly for the Deal Assessor.

use crate::models::{ListingRecord, VehicleFacts};

pub const SYSTEM_PROMPT: &str = "Du bist ein professioneller KFZ-Einkäufer. \
Dein Ziel: Den Preis drücken. Analysiere die harten Fakten knallhart und logisch. \
Vermeide Floskeln wie 'Gutes Auto'. Suche das Haar in der Suppe.";

/// The asking price is presented as fact only when it was actually
/// extracted; otherwise the model is asked to infer one from context.
pub fn build_user_prompt(record: &ListingRecord, facts: &VehicleFacts, language: &str) -> String {
    let price_line = if record.price_known {
        format!("- Preis: {} EUR", record.price)
    } else {
        "- Preis: unbekannt (schätze den marktüblichen Preis aus dem Kontext)".to_string()
    };

    let image_line = record
        .image_url
        .as_deref()
        .map(|url| format!("- Bild: {}\n", url))
        .unwrap_or_default();

    format!(
        "Fahrzeugdaten:
- Modell: {title}
{price_line}
- Laufleistung: {mileage} km
- Erstzulassung: {registration} (Alter: {age} Jahre)
- Durchschnitt pro Jahr: {per_year} km/Jahr
- Antrieb: {fuel}
{image_line}- Beschreibungstext: {features}

Wende diese Logik an, um Argumente zu finden:
1. WENN km/Jahr unter 5000: Argumentiere mit Standuhr, Standschäden, verhärteten Reifen und Gummis.
2. WENN km/Jahr über 25000: Argumentiere mit Langstreckenbomber, Steinschläge prüfen, Fahrwerk verschlissen.
3. WENN Diesel UND km/Jahr unter 10000: Argumentiere mit Verkokungsgefahr, AGR-Ventil-Risiko, Partikelfilter zu.
4. WENN Elektro oder Hybrid UND Alter über 5 Jahre: Argumentiere mit Batterie-Degradation und Garantieverlust.
5. WENN Beschreibung sehr kurz: Argumentiere mit Katze im Sack und fehlender Historie.

Aufgabe:
Erstelle ein JSON mit 3 harten, spezifischen Argumenten basierend auf diesen Daten.
Schätze einen aggressiven aber nicht unverschämten Zielpreis (ca. 8-12% Rabatt).
Antworte in dieser Sprache: {language}.

Antworte NUR JSON:
{{
    \"market_price_estimate\": 12345,
    \"rating\": \"teuer/fair/gut\",
    \"arguments\": [\"Argument 1\", \"Argument 2\", \"Argument 3\"],
    \"script\": \"Ein direkter Satz an den Verkäufer...\"
}}",
        title = record.title,
        price_line = price_line,
        mileage = record.mileage,
        registration = record.first_registration,
        age = facts.age_years,
        per_year = facts.mileage_per_year,
        fuel = facts.fuel,
        image_line = image_line,
        features = record.feature_text,
        language = language,
    )
}
