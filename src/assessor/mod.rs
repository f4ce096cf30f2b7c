//! Deal Assessor client: an OpenAI-compatible chat-completions endpoint
//! that turns the normalized record into a negotiation brief. Faults are
//! recovered locally with the documented fallback assessment.

pub mod prompt;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::AssessorConfig;
use crate::error::AssessorError;
use crate::models::{Assessment, DealRating, ListingRecord, VehicleFacts, FALLBACK_ARGUMENTS};
use crate::parsers::parse_money;

pub struct DealAssessor {
    client: Client,
    config: AssessorConfig,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Payload as the model actually returns it, before validation.
#[derive(Debug, Deserialize)]
struct RawAssessment {
    rating: String,
    arguments: Vec<String>,
    script: String,
    market_price_estimate: Value,
}

impl DealAssessor {
    pub fn new(client: Client, config: AssessorConfig) -> Self {
        Self { client, config }
    }

    /// Never fails: a transport fault, non-success status or
    /// schema-violating payload degrades to [`Assessment::fallback`].
    pub async fn assess(
        &self,
        record: &ListingRecord,
        facts: &VehicleFacts,
        language: &str,
    ) -> Assessment {
        match self.request(record, facts, language).await {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!("Assessor unavailable, substituting fallback assessment: {}", e);
                Assessment::fallback(record.price)
            }
        }
    }

    async fn request(
        &self,
        record: &ListingRecord,
        facts: &VehicleFacts,
        language: &str,
    ) -> Result<Assessment, AssessorError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": prompt::SYSTEM_PROMPT},
                {"role": "user", "content": prompt::build_user_prompt(record, facts, language)},
            ],
            "response_format": {"type": "json_object"},
        });

        let endpoint = format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssessorError::Status(status.as_u16()));
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AssessorError::Schema("response carried no choices".to_string()))?;

        parse_assessment(&content)
    }
}

/// Validate the model payload into an [`Assessment`]. Unknown rating
/// tokens and non-numeric estimates are schema violations; a wrong
/// argument count is repaired to exactly three.
pub(crate) fn parse_assessment(content: &str) -> Result<Assessment, AssessorError> {
    let raw: RawAssessment =
        serde_json::from_str(content).map_err(|e| AssessorError::Schema(e.to_string()))?;

    let rating = DealRating::from_token(&raw.rating)
        .ok_or_else(|| AssessorError::Schema(format!("unknown rating token '{}'", raw.rating)))?;

    let market_price_estimate = estimate_value(&raw.market_price_estimate).ok_or_else(|| {
        AssessorError::Schema("market_price_estimate is not a non-negative number".to_string())
    })?;

    let mut arguments: Vec<String> = raw
        .arguments
        .into_iter()
        .map(|argument| argument.trim().to_string())
        .filter(|argument| !argument.is_empty())
        .collect();
    arguments.truncate(3);
    for generic in FALLBACK_ARGUMENTS.iter() {
        if arguments.len() >= 3 {
            break;
        }
        arguments.push(generic.to_string());
    }

    let script = raw.script.trim().to_string();
    let script = if script.is_empty() {
        crate::models::FALLBACK_SCRIPT.to_string()
    } else {
        script
    };

    Ok(Assessment {
        rating,
        arguments,
        script,
        market_price_estimate,
    })
}

fn estimate_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => parse_money(text),
        _ => None,
    }
}
