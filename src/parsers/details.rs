use once_cell::sync::Lazy;
use regex::Regex;

use super::price::parse_amount;

static YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(19[5-9]\d|20\d{2})").expect("Invalid year regex"));

static REGISTRATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2}/\d{4})\b").expect("Invalid registration regex"));

static LABELED_REGISTRATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:EZ|Erstzulassung)\s*:?\s*(\d{2}/\d{4})")
        .expect("Invalid registration regex")
});

static MILEAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:[.,]\d{3})+|\d+)\s*km\b").expect("Invalid mileage regex")
});

/// Extract a first-registration token ("MM/YYYY") from free text.
/// A labeled occurrence (EZ / Erstzulassung) wins over a bare token.
pub fn extract_registration(text: &str) -> Option<String> {
    if let Some(captures) = LABELED_REGISTRATION_REGEX.captures(text) {
        return Some(captures[1].to_string());
    }
    REGISTRATION_REGEX
        .captures(text)
        .map(|captures| captures[1].to_string())
}

/// Parse the year out of a registration token or any date-bearing string.
pub fn registration_year(text: &str) -> Option<i32> {
    YEAR_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract an odometer reading from free text ("150.000 km", "89000km").
pub fn extract_mileage(text: &str) -> Option<u64> {
    MILEAGE_REGEX
        .captures(text)
        .and_then(|captures| parse_amount(&captures[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labeled_registration_wins_over_bare_token() {
        let text = "gebaut 01/2010, EZ: 06/2015";
        assert_eq!(extract_registration(text), Some("06/2015".to_string()));
    }

    #[test]
    fn bare_registration_token_is_found() {
        assert_eq!(extract_registration("• 03/2019 •"), Some("03/2019".to_string()));
        assert_eq!(extract_registration("keine Angabe"), None);
    }

    #[test]
    fn year_is_parsed_from_token() {
        assert_eq!(registration_year("06/2024"), Some(2024));
        assert_eq!(registration_year("Baujahr 1998"), Some(1998));
        assert_eq!(registration_year("N/A"), None);
    }

    #[test]
    fn mileage_handles_separators() {
        assert_eq!(extract_mileage("Kilometerstand: 150.000 km"), Some(150_000));
        assert_eq!(extract_mileage("89000km, unfallfrei"), Some(89_000));
        assert_eq!(extract_mileage("viel gefahren"), None);
    }
}
