//! The analysis pipeline: fetch → normalize → derive → assess → persist →
//! notify, strictly sequential for one listing. Only a fetch failure
//! aborts; every later fault degrades to a best-effort result.

use std::sync::Arc;

use chrono::{Datelike, Local};
use serde::Serialize;
use tracing::{error, info};

use crate::assessor::DealAssessor;
use crate::config::Config;
use crate::discord;
use crate::error::FetchError;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::models::{Assessment, ListingRecord, VehicleFacts};
use crate::storage::{PreferenceStore, ScanRecord, Storage};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub url: String,
    pub record: ListingRecord,
    pub facts: VehicleFacts,
    pub assessment: Assessment,
}

impl AnalysisReport {
    pub fn negotiation_potential(&self) -> i64 {
        self.assessment.negotiation_potential(self.record.price)
    }
}

pub struct DealAnalyzer {
    fetcher: PageFetcher,
    assessor: DealAssessor,
    storage: Arc<dyn Storage>,
    preferences: Arc<dyn PreferenceStore>,
    config: Arc<Config>,
}

impl DealAnalyzer {
    pub fn new(
        config: Arc<Config>,
        client: reqwest::Client,
        storage: Arc<dyn Storage>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            fetcher: PageFetcher::new(client.clone(), config.fetcher.clone()),
            assessor: DealAssessor::new(client, config.assessor.clone()),
            storage,
            preferences,
            config,
        }
    }

    pub async fn analyze(&self, url: &str, user_key: &str) -> Result<AnalysisReport, FetchError> {
        let html = self.fetcher.fetch(url).await?;

        let record = extract::normalize(&html, Some(url));
        let facts = VehicleFacts::derive(&record, Local::now().year());
        info!(
            "Normalized listing '{}' (price: {} EUR, mileage: {} km, EZ: {})",
            record.title, record.price, record.mileage, record.first_registration
        );

        let language = match self.preferences.language(user_key).await {
            Ok(Some(language)) => language,
            Ok(None) => self.config.default_language.clone(),
            Err(e) => {
                error!("Could not read language preference for {}: {}", user_key, e);
                self.config.default_language.clone()
            }
        };

        let assessment = self.assessor.assess(&record, &facts, &language).await;

        let report = AnalysisReport {
            url: url.to_string(),
            record,
            facts,
            assessment,
        };

        let scan = ScanRecord {
            url: report.url.clone(),
            title: report.record.title.clone(),
            price: report.record.price,
            mileage: report.record.mileage,
            first_registration: report.record.first_registration.clone(),
            rating: report.assessment.rating.to_string(),
            ai_market_estimate: report.assessment.market_price_estimate,
            ai_potential: report.negotiation_potential(),
        };
        if let Err(e) = self.storage.save_scan(&scan).await {
            error!("Failed to store scan for {}: {}", report.url, e);
        }

        if let Some(webhook_url) = &self.config.webhook_url {
            if let Err(e) = discord::send_notification(webhook_url, &report).await {
                error!("Failed to send Discord notification: {}", e);
            }
        }

        Ok(report)
    }
}
