//! Coarse location from an IP-geolocation HTTP endpoint.
//!
//! Expects an `ip-api.com`-style body: `{"status": "success", "lat": .., "lon": ..}`
//! or `{"status": "fail", "message": ".."}`.

use std::time::Duration;

use cafe_core::Coordinate;
use reqwest::Client;
use serde::Deserialize;

use crate::error::LocationError;
use crate::provider::{LocationProvider, PositionOptions};

#[derive(Debug, Deserialize)]
struct IpLookup {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

pub struct IpLocationProvider {
    client: Client,
    url: String,
}

impl IpLocationProvider {
    /// # Errors
    ///
    /// Returns [`LocationError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, LocationError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    async fn lookup(&self, options: &PositionOptions) -> Result<Coordinate, LocationError> {
        if options.high_accuracy {
            tracing::debug!("high accuracy requested; IP lookup is city-level at best");
        }

        let response = self
            .client
            .get(&self.url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout {
                        timeout_ms: options.timeout.as_millis(),
                    }
                } else {
                    LocationError::Http(e)
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Provider(format!(
                "unexpected HTTP status {} from {}",
                status.as_u16(),
                self.url
            )));
        }

        let body: IpLookup = response.json().await?;
        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| body.status.clone());
            return Err(LocationError::Provider(reason));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(LocationError::Provider(
                "lookup succeeded without coordinates".to_owned(),
            ));
        };
        Coordinate::new(lat, lon).map_err(|e| LocationError::Provider(e.to_string()))
    }
}

impl LocationProvider for IpLocationProvider {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinate, LocationError> {
        self.lookup(options).await
    }
}
