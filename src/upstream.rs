use actix_web::http::StatusCode;
use log::{error, info, warn};
use reqwest::Client;

use crate::error::ApiError;

/// Fixed query for the coin listing endpoint. The inbound `/coins` route
/// accepts no parameters, so these never vary.
const MARKETS_QUERY: [(&str, &str); 6] = [
    ("vs_currency", "usd"),
    ("order", "market_cap_desc"),
    ("per_page", "50"),
    ("page", "1"),
    ("sparkline", "false"),
    ("price_change_percentage", "24h"),
];

/// Fixed query for the market chart endpoint: 7 days of USD prices.
const CHART_QUERY: [(&str, &str); 2] = [("vs_currency", "usd"), ("days", "7")];

/// Client for the third-party market-data API. Each call is a single
/// pass-through GET; the response body is relayed verbatim after checking
/// that the upstream answered 2xx with a JSON body.
#[derive(Clone)]
pub struct MarketClient {
    client: Client,
    base_url: String,
}

impl MarketClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        MarketClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET `coins/markets` — top 50 coins by market cap in USD.
    pub async fn markets(&self) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let url = format!("{}/coins/markets", self.base_url);
        self.fetch_json(&url, &MARKETS_QUERY).await
    }

    /// GET `coins/{id}/market_chart` — 7-day price history for one coin.
    /// The identifier is upstream-defined and treated as an opaque path
    /// segment.
    pub async fn market_chart(&self, coin_id: &str) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        self.fetch_json(&url, &CHART_QUERY).await
    }

    async fn fetch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        info!("Proxying request to {}", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach upstream {}: {}", url, e);
                if e.is_timeout() {
                    ApiError::UpstreamUnavailable("request timed out".to_string())
                } else {
                    ApiError::UpstreamUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} returned status {}", url, status);
            return Err(ApiError::UpstreamBadResponse(format!(
                "upstream status {}",
                status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read upstream body from {}: {}", url, e);
            ApiError::UpstreamUnavailable(e.to_string())
        })?;

        // The upstream contract is JSON; a body that does not parse is a bad
        // response, not something to relay blindly.
        if let Err(e) = serde_json::from_slice::<serde_json::Value>(&body) {
            error!("Upstream {} returned a non-JSON body: {}", url, e);
            return Err(ApiError::UpstreamBadResponse("non-JSON body".to_string()));
        }

        // reqwest and actix-web may pin different `http` versions, so the
        // status crosses over as a plain u16.
        let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK);
        Ok((status, body.to_vec()))
    }
}
