// Wire models of the admin backend
use serde::{Deserialize, Serialize};

pub const SUCCESS_CODE: i32 = 200;
const GENERIC_ERROR: &str = "An error occurred";

/// Every backend response is wrapped in this envelope; the payload sits under
/// `value.response`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub response_code: i32,
    #[serde(default)]
    pub message: Option<String>,
    pub value: Option<EnvelopeValue<T>>,
}

#[derive(Debug, Deserialize)]
pub struct EnvelopeValue<T> {
    pub response: T,
}

impl<T> ApiEnvelope<T> {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn ensure_success(&self, operation: &str) -> anyhow::Result<()> {
        if self.response_code != SUCCESS_CODE {
            anyhow::bail!(
                "{} failed with response code {}: {}",
                operation,
                self.response_code,
                self.message_or(GENERIC_ERROR)
            );
        }
        Ok(())
    }

    /// Unwrap the payload, failing on a non-200 response code.
    pub fn into_response(self, operation: &str) -> anyhow::Result<T> {
        self.ensure_success(operation)?;

        match self.value {
            Some(value) => Ok(value.response),
            None => anyhow::bail!("{} returned no payload", operation),
        }
    }
}

/// Operator-facing message for a non-2xx response body. Only the envelope's
/// `message` is surfaced; anything else in the body is dropped.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiEnvelope<Option<serde_json::Value>>>(body)
        .map(|envelope| envelope.message_or(GENERIC_ERROR))
        .unwrap_or_else(|_| GENERIC_ERROR.to_string())
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub id: i64,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub device_status: i32,
    #[serde(default)]
    pub battery_amount: Option<f64>,
    #[serde(default)]
    pub tank_volume: i32,
    #[serde(default)]
    pub creation_datetime: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sense: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetailDto {
    pub id: i64,
    #[serde(default)]
    pub battery_amount: Option<f64>,
    pub device_status: i32,
    #[serde(default)]
    pub tank_volume: i32,
    #[serde(default)]
    pub creation_datetime: String,
}
