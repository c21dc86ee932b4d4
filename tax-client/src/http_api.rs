use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tax_core::{EstimateRequest, EstimateResponse, NetIncomeEntry, RequestError, TaxApi};

use crate::json::JsonClient;

pub const ESTIMATE_PATH: &str = "/api/estimate";
pub const NET_INCOME_PATH: &str = "/api/net_income";
pub const LATEST_NET_INCOME_PATH: &str = "/api/net_income/latest";

/// [`TaxApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaxApi {
    client: JsonClient,
}

impl HttpTaxApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(JsonClient::new(base_url))
    }

    pub fn with_client(client: JsonClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &JsonClient {
        &self.client
    }
}

#[async_trait]
impl TaxApi for HttpTaxApi {
    async fn estimate(
        &self,
        request: &EstimateRequest,
    ) -> Result<EstimateResponse, RequestError> {
        let response = self
            .client
            .exchange(ESTIMATE_PATH, request, Method::POST)
            .await?;

        serde_json::from_value(response.body).map_err(|e| RequestError::MalformedResponse {
            status: response.status,
            detail: e.to_string(),
        })
    }

    async fn create_net_income(
        &self,
        entry: &NetIncomeEntry,
    ) -> Result<Value, RequestError> {
        self.client.post(NET_INCOME_PATH, entry).await
    }

    async fn update_latest_net_income(
        &self,
        entry: &NetIncomeEntry,
    ) -> Result<Value, RequestError> {
        self.client
            .send(LATEST_NET_INCOME_PATH, entry, Method::PUT)
            .await
    }
}
