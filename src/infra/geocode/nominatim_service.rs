use crate::domain::models::location::GeoPoint;
use crate::domain::ports::GeocodingService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{error, instrument, warn};
use std::time::Duration;
use tokio::time::sleep;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

pub struct NominatimService {
    client: Client,
    base_url: String,
}

impl NominatimService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .user_agent("clinic-directory-backend/0.1")
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
        }
    }

    async fn query_with_retry(&self, address: &str) -> Result<Value, AppError> {
        let mut retries = 0;
        let mut backoff = INITIAL_BACKOFF_MS;

        loop {
            let res = self.client.get(&self.base_url)
                .query(&[
                    ("q", address),
                    ("format", "json"),
                    ("limit", "1"),
                    ("countrycodes", "my"),
                ])
                .send()
                .await;

            match res {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json().await.map_err(|e| {
                            error!("Failed to parse geocoder response JSON: {:?}", e);
                            AppError::Geocoding("Malformed geocoder response".to_string())
                        });
                    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if retries >= MAX_RETRIES {
                            error!("Geocoder failed after {} retries. Status: {}", retries, status);
                            return Err(AppError::Geocoding(format!("Geocoder error: {}", status)));
                        }
                        warn!("Geocoder transient error {}. Retrying in {}ms...", status, backoff);
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        error!("Geocoder terminal error {}: {}", status, text);
                        return Err(AppError::Geocoding(format!("Geocoder rejected request: {}", status)));
                    }
                }
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        error!("Geocoder network error after {} retries: {:?}", retries, e);
                        return Err(AppError::Geocoding(format!("Geocoder network error: {}", e)));
                    }
                    warn!("Geocoder network error. Retrying in {}ms... {:?}", backoff, e);
                }
            }

            sleep(Duration::from_millis(backoff)).await;
            retries += 1;
            backoff *= 2;
        }
    }

    fn extract_point(&self, body: &Value) -> Option<GeoPoint> {
        // Nominatim returns coordinates as decimal strings.
        let first = body.as_array()?.first()?;
        let latitude = first.get("lat")?.as_str()?.parse().ok()?;
        let longitude = first.get("lon")?.as_str()?.parse().ok()?;
        Some(GeoPoint { latitude, longitude })
    }
}

#[async_trait]
impl GeocodingService for NominatimService {
    #[instrument(skip(self), fields(address_len = address.len()))]
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, AppError> {
        let body = self.query_with_retry(address).await?;
        Ok(self.extract_point(&body))
    }
}
