//! HTTP client for the OpenStreetMap Overpass API.
//!
//! Sends an Overpass QL `around:` query as the `data` parameter of a GET
//! request and deserializes the JSON `elements` array into [`PlaceRecord`]s.
//! Runtime errors that Overpass reports inside a 200 response (`remark`) are
//! surfaced as [`PlacesError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::source::PlacesSource;
use crate::types::{OverpassResponse, PlaceRecord, PlacesQuery};

/// Server-side query budget passed as `[timeout:N]`.
const QUERY_TIMEOUT_SECS: u64 = 25;

pub struct OverpassClient {
    client: Client,
    base_url: Url,
}

impl OverpassClient {
    /// Creates a client for the interpreter at `base_url` (the public
    /// instance, a mirror, or a wiremock server).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches every place matching `query`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::UnexpectedStatus`] on any non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not an Overpass envelope.
    /// - [`PlacesError::Api`] if Overpass reports a runtime error.
    pub async fn fetch(&self, query: &PlacesQuery) -> Result<Vec<PlaceRecord>, PlacesError> {
        let url = self.build_url(query);
        tracing::debug!(
            radius_m = query.radius_m,
            center = %query.center,
            "querying overpass"
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("overpass(radius={})", query.radius_m),
                source: e,
            })?;

        if let Some(remark) = envelope.remark.as_deref() {
            if remark.contains("error") {
                return Err(PlacesError::Api(remark.to_owned()));
            }
            tracing::debug!(remark, "overpass remark");
        }

        tracing::debug!(
            radius_m = query.radius_m,
            count = envelope.elements.len(),
            "overpass returned elements"
        );
        Ok(envelope.elements)
    }

    fn build_url(&self, query: &PlacesQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("data", &build_overpass_query(query));
        url
    }
}

impl PlacesSource for OverpassClient {
    async fn fetch_places(&self, query: &PlacesQuery) -> Result<Vec<PlaceRecord>, PlacesError> {
        self.fetch(query).await
    }
}

/// Renders `query` as Overpass QL covering nodes and ways, with way centers.
#[must_use]
pub fn build_overpass_query(query: &PlacesQuery) -> String {
    let filter = format!(
        "[\"{}\"=\"{}\"](around:{},{},{})",
        escape_ql(&query.category.key),
        escape_ql(&query.category.value),
        query.radius_m,
        query.center.latitude,
        query.center.longitude,
    );
    format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}];(node{filter};way{filter};);out center;")
}

fn escape_ql(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use cafe_core::Coordinate;

    use super::*;
    use crate::types::Category;

    fn query(radius_m: u32) -> PlacesQuery {
        PlacesQuery {
            center: Coordinate::new(51.5, -0.12).unwrap(),
            radius_m,
            category: Category::cafe(),
        }
    }

    #[test]
    fn overpass_query_targets_nodes_and_ways() {
        assert_eq!(
            build_overpass_query(&query(1000)),
            "[out:json][timeout:25];(node[\"amenity\"=\"cafe\"](around:1000,51.5,-0.12);\
             way[\"amenity\"=\"cafe\"](around:1000,51.5,-0.12););out center;"
        );
    }

    #[test]
    fn overpass_query_escapes_quotes_in_category() {
        let mut q = query(10);
        q.category.value = "ca\"fe".to_owned();
        assert!(build_overpass_query(&q).contains("=\"ca\\\"fe\""));
    }

    #[test]
    fn build_url_encodes_query_as_data_param() {
        let client = OverpassClient::with_base_url(
            5,
            "cafe-test/0.1",
            "https://example.test/api/interpreter",
        )
        .expect("client construction should not fail");
        let url = client.build_url(&query(500));
        let data = url
            .query_pairs()
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned());
        assert_eq!(data, Some(build_overpass_query(&query(500))));
        assert_eq!(url.path(), "/api/interpreter");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = OverpassClient::with_base_url(5, "cafe-test/0.1", "not a url");
        assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
    }
}
