// Repository trait for the fleet backend
use crate::domain::device::{Device, DeviceDetail, DeviceId};
use async_trait::async_trait;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// Exchange operator credentials for a bearer token
    async fn login(&self, username: &str, password: &str) -> anyhow::Result<String>;

    /// Fetch the whole fleet snapshot
    async fn fetch_fleet(&self, token: &str) -> anyhow::Result<Vec<Device>>;

    /// Fetch one page of history samples for a device
    async fn fetch_device_history(
        &self,
        device_id: DeviceId,
        token: &str,
        page_size: u32,
        page_number: u32,
    ) -> anyhow::Result<Vec<DeviceDetail>>;

    /// Delete a device record
    async fn delete_device(&self, device_id: DeviceId, token: &str) -> anyhow::Result<()>;
}
