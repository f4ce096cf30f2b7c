use once_cell::sync::Lazy;
use regex::Regex;

/// Candidates below this are dates, engine codes or trim numbers, not car
/// prices; candidates above the ceiling are phone numbers or VINs.
pub const PRICE_FLOOR: u64 = 500;
pub const PRICE_CEILING: u64 = 5_000_000;

static PRICE_BEFORE_CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,3}(?:[.,]\d{3})+|\d{3,7})(?:[.,]\d{2})?\s*(?:€|EUR\b|Euro\b)")
        .expect("Invalid price regex")
});

static PRICE_AFTER_CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:€|EUR)\s*(\d{1,3}(?:[.,]\d{3})+|\d{3,7})").expect("Invalid price regex")
});

/// Strip everything but digits and parse. Shared by every strategy that
/// emits a price or mileage, so "24.990" and "24990" parse identically.
pub fn parse_amount(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Like [`parse_amount`], but recognizes a two-digit decimal tail so
/// machine-readable money strings ("24990.00") don't inflate a hundredfold.
/// A three-digit tail is a thousands group, never cents.
pub fn parse_money(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if let Some((integer_part, fraction)) = trimmed.split_once(['.', ',']) {
        if fraction.len() <= 2
            && !fraction.is_empty()
            && integer_part.chars().all(|c| c.is_ascii_digit())
            && fraction.chars().all(|c| c.is_ascii_digit())
        {
            return parse_amount(integer_part);
        }
    }
    parse_amount(trimmed)
}

/// Last-resort price recovery: only numbers directly adjacent to a currency
/// marker count, and only within the plausible range. Returns the largest
/// surviving candidate so a down payment or monthly rate never beats the
/// full asking price.
pub fn scan_price(text: &str) -> Option<u64> {
    let mut candidates = Vec::new();

    for captures in PRICE_BEFORE_CURRENCY.captures_iter(text) {
        if let Some(value) = parse_amount(&captures[1]) {
            candidates.push(value);
        }
    }
    for captures in PRICE_AFTER_CURRENCY.captures_iter(text) {
        if let Some(value) = parse_amount(&captures[1]) {
            candidates.push(value);
        }
    }

    candidates
        .into_iter()
        .filter(|value| (PRICE_FLOOR..=PRICE_CEILING).contains(value))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_amount_is_separator_agnostic() {
        assert_eq!(parse_amount("24.990"), Some(24_990));
        assert_eq!(parse_amount("24990"), Some(24_990));
        assert_eq!(parse_amount("24,990 km"), Some(24_990));
        assert_eq!(parse_amount("keine Angabe"), None);
    }

    #[test]
    fn parse_money_distinguishes_cents_from_thousands() {
        assert_eq!(parse_money("24990.00"), Some(24_990));
        assert_eq!(parse_money("24990,00"), Some(24_990));
        assert_eq!(parse_money("24.990"), Some(24_990));
        assert_eq!(parse_money("1.234.567"), Some(1_234_567));
        assert_eq!(parse_money("24990"), Some(24_990));
    }

    #[test]
    fn scan_accepts_currency_adjacent_prices() {
        assert_eq!(scan_price("Preis: 18.500 €"), Some(18_500));
        assert_eq!(scan_price("nur 24990 EUR inkl. Überführung"), Some(24_990));
        assert_eq!(scan_price("€ 12.450 VB"), Some(12_450));
    }

    #[test]
    fn scan_rejects_bare_numbers() {
        // A year with no currency marker is not a price.
        assert_eq!(scan_price("Modelljahr 2024, top Zustand"), None);
    }

    #[test]
    fn scan_rejects_out_of_range_candidates() {
        assert_eq!(scan_price("Zubehörpaket für 450 €"), None);
        assert_eq!(scan_price("Sammlerstück, Liebhaberpreis 9.999.999 €"), None);
    }

    #[test]
    fn scan_prefers_the_largest_plausible_candidate() {
        let text = "Anzahlung 5.000 €, Gesamtpreis 24.990 €";
        assert_eq!(scan_price(text), Some(24_990));
    }
}
