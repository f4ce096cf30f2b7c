//! Page Fetcher client: the external rendering API that executes
//! JavaScript and returns raw HTML for a listing URL.

use reqwest::Client;
use tracing::info;

use crate::config::FetcherConfig;
use crate::error::FetchError;

pub struct PageFetcher {
    client: Client,
    config: FetcherConfig,
}

impl PageFetcher {
    pub fn new(client: Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    /// Fetch rendered HTML for a listing URL. Any non-success status or
    /// transport fault is a hard failure for the whole analysis; this is
    /// the only collaborator allowed to abort a request.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching rendered page for {}", url);

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("url", url),
                ("render_js", bool_param(self.config.render_js)),
                ("premium_proxy", bool_param(self.config.premium_proxy)),
                ("stealth_proxy", bool_param(self.config.stealth_proxy)),
                ("country_code", self.config.country_code.as_str()),
                ("wait_browser", self.config.wait_browser.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
