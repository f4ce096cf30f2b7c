use serde::{Deserialize, Serialize};
use std::fmt;

use super::{REGISTRATION_UNKNOWN, TITLE_PLACEHOLDER};
use crate::parsers::registration_year;

/// Normalized view of a single listing page.
///
/// Construction is total: every field degrades to its documented default
/// when the page yields nothing, so downstream callers never see an error
/// for bad markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    /// Asking price in whole EUR; 0 means "not determined".
    pub price: u64,
    /// True iff `price` was actually extracted. Never overload `price == 0`.
    pub price_known: bool,
    /// Odometer reading in km; 0 means "not determined".
    pub mileage: u64,
    /// Free-form registration token, usually "MM/YYYY", or "N/A".
    pub first_registration: String,
    /// Absolute, scheme-qualified URL or absent.
    pub image_url: Option<String>,
    /// Description + spec-table text, body-text fallback, length-capped.
    pub feature_text: String,
}

impl Default for ListingRecord {
    fn default() -> Self {
        Self {
            title: TITLE_PLACEHOLDER.to_string(),
            price: 0,
            price_known: false,
            mileage: 0,
            first_registration: REGISTRATION_UNKNOWN.to_string(),
            image_url: None,
            feature_text: String::new(),
        }
    }
}

impl ListingRecord {
    /// Vehicle age in full years, never below 1 so per-year rates stay
    /// divisible. Unknown or future registration counts as 1.
    pub fn age_years(&self, current_year: i32) -> u64 {
        match registration_year(&self.first_registration) {
            Some(year) if year < current_year => (current_year - year) as u64,
            _ => 1,
        }
    }

    pub fn mileage_per_year(&self, current_year: i32) -> u64 {
        self.mileage / self.age_years(current_year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Diesel,
    Petrol,
    Hybrid,
    Electric,
    Unknown,
}

impl FuelType {
    /// Coarse classification from free text, first match wins.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("diesel") {
            FuelType::Diesel
        } else if lower.contains("benzin") || lower.contains("petrol") || lower.contains("gasoline")
        {
            FuelType::Petrol
        } else if lower.contains("hybrid") {
            FuelType::Hybrid
        } else if lower.contains("elektro") || lower.contains("electric") {
            FuelType::Electric
        } else {
            FuelType::Unknown
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Diesel => write!(f, "Diesel"),
            FuelType::Petrol => write!(f, "Benzin"),
            FuelType::Hybrid => write!(f, "Hybrid"),
            FuelType::Electric => write!(f, "Elektro"),
            FuelType::Unknown => write!(f, "Unbekannt"),
        }
    }
}

/// Quantities derived from the record, evaluated against a caller-supplied
/// year so they stay deterministic under test.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleFacts {
    pub age_years: u64,
    pub mileage_per_year: u64,
    pub fuel: FuelType,
}

impl VehicleFacts {
    pub fn derive(record: &ListingRecord, current_year: i32) -> Self {
        Self {
            age_years: record.age_years(current_year),
            mileage_per_year: record.mileage_per_year(current_year),
            fuel: FuelType::classify(&record.feature_text),
        }
    }
}
