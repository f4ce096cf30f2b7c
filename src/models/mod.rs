pub mod assessment;
pub mod listing;

pub use assessment::*;
pub use listing::*;

// Sentinel values shared across the pipeline
pub const TITLE_PLACEHOLDER: &str = "Unbekanntes Fahrzeug";
pub const REGISTRATION_UNKNOWN: &str = "N/A";
