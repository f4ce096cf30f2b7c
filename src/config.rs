use anyhow::Result;
use config::Environment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub assessor: AssessorConfig,
    pub database_path: String,
    /// Output language for assessments when a user has no stored preference.
    pub default_language: String,
    /// Optional Discord webhook for delivering finished briefs.
    pub webhook_url: Option<String>,
}

/// Fixed configuration bundle sent with every rendering-API request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    pub api_url: String,
    pub api_key: String,
    pub render_js: bool,
    pub premium_proxy: bool,
    pub stealth_proxy: bool,
    pub country_code: String,
    pub wait_browser: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl Config {
    /// Built-in defaults, overridable through DEAL__* environment
    /// variables (e.g. DEAL__FETCHER__API_KEY, DEAL__ASSESSOR__MODEL).
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("fetcher.api_url", "https://app.scrapingbee.com/api/v1/")?
            .set_default("fetcher.api_key", "")?
            .set_default("fetcher.render_js", true)?
            .set_default("fetcher.premium_proxy", true)?
            .set_default("fetcher.stealth_proxy", true)?
            .set_default("fetcher.country_code", "de")?
            .set_default("fetcher.wait_browser", "networkidle2")?
            .set_default("assessor.api_url", "https://api.openai.com/v1")?
            .set_default("assessor.api_key", "")?
            .set_default("assessor.model", "gpt-4o-mini")?
            .set_default("database_path", "deal_advisor.db")?
            .set_default("default_language", "de")?
            .add_source(
                Environment::with_prefix("DEAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize() {
        let config = Config::load().unwrap();
        assert_eq!(config.default_language, "de");
        assert!(config.fetcher.render_js);
        assert_eq!(config.fetcher.country_code, "de");
        assert_eq!(config.webhook_url, None);
    }
}
