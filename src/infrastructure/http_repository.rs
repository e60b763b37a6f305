// HTTP repository for the admin backend
use crate::application::fleet_repository::FleetRepository;
use crate::domain::device::{Device, DeviceDetail, DeviceId};
use crate::infrastructure::backend_models::{
    error_message, ApiEnvelope, DeviceDetailDto, DeviceDto, LoginRequest, LoginResponse,
};
use crate::infrastructure::device_mapper::{detail_from_dto, device_from_dto};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

const LOGIN_PATH: &str = "/Admin/User/Login";
const ALL_DEVICES_PATH: &str = "/Admin/Device/BOGetAllDevices";
const DEVICE_HISTORY_PATH: &str = "/Admin/BucketInfo/BOGetBucketInfosById";
const DELETE_DEVICE_PATH: &str = "/Admin/Device/BODeleteDevice";

#[derive(Debug, Clone)]
pub struct HttpFleetRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFleetRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // paging parameters travel as request headers, not query parameters
    fn history_request(
        &self,
        device_id: DeviceId,
        token: &str,
        page_size: u32,
        page_number: u32,
    ) -> RequestBuilder {
        self.client
            .get(self.url(DEVICE_HISTORY_PATH))
            .bearer_auth(token)
            .header("id", device_id.to_string())
            .header("pageSize", page_size.to_string())
            .header("pageNumber", page_number.to_string())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<ApiEnvelope<T>> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send {} to backend", operation))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("{} error body: {}", operation, body);
            anyhow::bail!(
                "{} failed with status {}: {}",
                operation,
                status,
                error_message(&body)
            );
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .with_context(|| format!("Failed to parse {} response", operation))
    }
}

#[async_trait]
impl FleetRepository for HttpFleetRepository {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let request = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&LoginRequest { username, password });

        let envelope: ApiEnvelope<LoginResponse> = self.send(request, "Login").await?;
        let login = envelope.into_response("Login")?;
        if login.token.is_empty() {
            anyhow::bail!("Login returned an empty token");
        }
        Ok(login.token)
    }

    async fn fetch_fleet(&self, token: &str) -> Result<Vec<Device>> {
        let request = self.client.get(self.url(ALL_DEVICES_PATH)).bearer_auth(token);

        let envelope: ApiEnvelope<Vec<DeviceDto>> = self.send(request, "Fleet request").await?;
        let devices: Vec<Device> = envelope
            .into_response("Fleet request")?
            .into_iter()
            .map(device_from_dto)
            .collect();

        tracing::debug!("Backend returned {} devices", devices.len());
        Ok(devices)
    }

    async fn fetch_device_history(
        &self,
        device_id: DeviceId,
        token: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<Vec<DeviceDetail>> {
        let request = self.history_request(device_id, token, page_size, page_number);

        let envelope: ApiEnvelope<Vec<DeviceDetailDto>> =
            self.send(request, "History request").await?;
        let details: Vec<DeviceDetail> = envelope
            .into_response("History request")?
            .into_iter()
            .map(detail_from_dto)
            .collect();

        tracing::debug!(
            "Backend returned {} history records for device {} (size {}, page {})",
            details.len(),
            device_id,
            page_size,
            page_number
        );
        Ok(details)
    }

    async fn delete_device(&self, device_id: DeviceId, token: &str) -> Result<()> {
        let request = self
            .client
            .post(self.url(DELETE_DEVICE_PATH))
            .bearer_auth(token)
            .header("id", device_id.to_string());

        let envelope: ApiEnvelope<Option<serde_json::Value>> =
            self.send(request, "Delete request").await?;
        envelope.ensure_success("Delete request")
    }
}
