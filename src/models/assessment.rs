use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed rating vocabulary; wire tokens are the German words the model
/// is instructed to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealRating {
    #[serde(rename = "teuer")]
    Overpriced,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "gut")]
    GoodDeal,
}

impl DealRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealRating::Overpriced => "teuer",
            DealRating::Fair => "fair",
            DealRating::GoodDeal => "gut",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "teuer" => Some(DealRating::Overpriced),
            "fair" => Some(DealRating::Fair),
            "gut" => Some(DealRating::GoodDeal),
            _ => None,
        }
    }
}

impl fmt::Display for DealRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Negotiation brief returned by the Deal Assessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub rating: DealRating,
    /// Exactly three after repair.
    pub arguments: Vec<String>,
    pub script: String,
    pub market_price_estimate: u64,
}

pub const FALLBACK_SCRIPT: &str = "Was ist letzte Preis?";

pub const FALLBACK_ARGUMENTS: [&str; 3] = [
    "Vergleichbare Angebote liegen im Preis niedriger.",
    "Ohne belegte Historie bleibt ein Restrisiko beim Kauf.",
    "Anstehende Verschleissreparaturen sollten eingepreist werden.",
];

impl Assessment {
    /// Documented substitute when the Assessor fails or returns a
    /// non-conforming payload: neutral rating, generic arguments, target
    /// price equal to the asking price.
    pub fn fallback(asking_price: u64) -> Self {
        Self {
            rating: DealRating::Fair,
            arguments: FALLBACK_ARGUMENTS.iter().map(|s| s.to_string()).collect(),
            script: FALLBACK_SCRIPT.to_string(),
            market_price_estimate: asking_price,
        }
    }

    /// Asking price minus estimate; negative when the estimate is above ask.
    pub fn negotiation_potential(&self, asking_price: u64) -> i64 {
        asking_price as i64 - self.market_price_estimate as i64
    }
}
