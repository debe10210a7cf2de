//! HTTP client for the SpaceFleet ship registry.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use spacefleet_core::{PageRequest, Ship, ShipCriteria, ShipDraft, ShipOrder, ShipPatch};

use crate::CliResult;

/// Default SpaceFleet server location.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    order: ShipOrder,
    page_number: u32,
    page_size: u32,
}

/// Thin wrapper over the `/rest/ships` endpoints.
#[derive(Debug, Clone)]
pub struct ShipClient {
    base_url: String,
    http: Client,
}

impl ShipClient {
    /// Create a client for the given server URL.
    pub fn new(server_url: &str) -> CliResult<Self> {
        let trimmed = server_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(format!("server url must start with http:// or https://: {server_url}").into());
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            http: Client::builder()
                .user_agent(concat!("spacefleet-cli/", env!("CARGO_PKG_VERSION")))
                .build()?,
        })
    }

    fn ships_url(&self) -> String {
        format!("{}/rest/ships", self.base_url)
    }

    fn ship_url(&self, id: i64) -> String {
        format!("{}/rest/ships/{id}", self.base_url)
    }

    /// Fetch a filtered, sorted page of ships.
    pub async fn list(
        &self,
        criteria: &ShipCriteria,
        order: ShipOrder,
        page: PageRequest,
    ) -> CliResult<Vec<Ship>> {
        let params = ListParams {
            order,
            page_number: page.page_number,
            page_size: page.page_size,
        };
        let request = self.http.get(self.ships_url()).query(criteria).query(&params);
        read_json(request).await
    }

    /// Count ships matching the filters.
    pub async fn count(&self, criteria: &ShipCriteria) -> CliResult<usize> {
        let request = self
            .http
            .get(format!("{}/count", self.ships_url()))
            .query(criteria);
        read_json(request).await
    }

    /// Fetch a single ship.
    pub async fn get(&self, id: i64) -> CliResult<Ship> {
        read_json(self.http.get(self.ship_url(id))).await
    }

    /// Create a ship.
    pub async fn create(&self, draft: &ShipDraft) -> CliResult<Ship> {
        read_json(self.http.post(self.ships_url()).json(draft)).await
    }

    /// Apply a partial update to a ship.
    pub async fn update(&self, id: i64, patch: &ShipPatch) -> CliResult<Ship> {
        read_json(self.http.post(self.ship_url(id)).json(patch)).await
    }

    /// Delete a ship.
    pub async fn delete(&self, id: i64) -> CliResult<()> {
        send(self.http.delete(self.ship_url(id))).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> CliResult<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    Err(format!("server returned {status}: {message}").into())
}

async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> CliResult<T> {
    Ok(send(request).await?.json::<T>().await?)
}
