// In-memory fleet backend for service tests
use crate::application::fleet_repository::FleetRepository;
use crate::domain::device::{Device, DeviceDetail, DeviceId, DeviceStatus};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const MOCK_PASSWORD: &str = "secret";
pub const MOCK_TOKEN: &str = "mock-token";

pub fn device(id: DeviceId, status_code: i32, tank_volume: i32) -> Device {
    Device::new(
        id,
        format!("SN-{id:04}"),
        format!("0912000{id:04}"),
        DeviceStatus::from_code(status_code),
        4.0,
        tank_volume,
        format!("2024-05-{:02}T08:00:00", (id % 28) + 1),
    )
}

pub fn detail(id: i64) -> DeviceDetail {
    DeviceDetail::new(
        id,
        3.9,
        DeviceStatus::Connected,
        60,
        "2024-05-01T10:00:00".to_string(),
    )
}

/// Scriptable backend: per-call failure flags and optional gates that hold a
/// history or fleet fetch until the test releases it.
#[derive(Default)]
pub struct MockFleetRepository {
    fleet: Mutex<Vec<Device>>,
    history: Mutex<HashMap<DeviceId, Vec<DeviceDetail>>>,
    gates: Mutex<HashMap<DeviceId, Arc<Notify>>>,
    fleet_gate: Mutex<Option<Arc<Notify>>>,
    deleted: Mutex<Vec<DeviceId>>,
    history_calls: Mutex<Vec<(DeviceId, u32, u32)>>,
    tokens_seen: Mutex<Vec<String>>,
    fleet_fetches: AtomicUsize,
    fail_fleet: AtomicBool,
    fail_history: AtomicBool,
    fail_delete: AtomicBool,
}

impl MockFleetRepository {
    pub fn with_fleet(devices: Vec<Device>) -> Self {
        let mock = Self::default();
        *mock.fleet.lock().unwrap() = devices;
        mock
    }

    pub fn set_fleet(&self, devices: Vec<Device>) {
        *self.fleet.lock().unwrap() = devices;
    }

    pub fn set_history(&self, device_id: DeviceId, records: Vec<DeviceDetail>) {
        self.history.lock().unwrap().insert(device_id, records);
    }

    /// Hold history fetches for `device_id` until the returned handle is notified.
    pub fn gate_history(&self, device_id: DeviceId) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(device_id, gate.clone());
        gate
    }

    /// Hold the next fleet fetch until the returned handle is notified. The
    /// fetch answers with the fleet as it was when the call arrived.
    pub fn gate_next_fleet_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.fleet_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn fail_fleet(&self, fail: bool) {
        self.fail_fleet.store(fail, Ordering::SeqCst);
    }

    pub fn fail_history(&self, fail: bool) {
        self.fail_history.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn deleted(&self) -> Vec<DeviceId> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn history_calls(&self) -> Vec<(DeviceId, u32, u32)> {
        self.history_calls.lock().unwrap().clone()
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        self.tokens_seen.lock().unwrap().clone()
    }

    pub fn fleet_fetches(&self) -> usize {
        self.fleet_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FleetRepository for MockFleetRepository {
    async fn login(&self, _username: &str, password: &str) -> anyhow::Result<String> {
        if password != MOCK_PASSWORD {
            anyhow::bail!("Login failed with status: 401 Unauthorized");
        }
        Ok(MOCK_TOKEN.to_string())
    }

    async fn fetch_fleet(&self, token: &str) -> anyhow::Result<Vec<Device>> {
        self.fleet_fetches.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(token.to_string());
        let fleet = self.fleet.lock().unwrap().clone();

        let gate = self.fleet_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_fleet.load(Ordering::SeqCst) {
            anyhow::bail!("Fleet request failed with status: 500 Internal Server Error");
        }
        Ok(fleet)
    }

    async fn fetch_device_history(
        &self,
        device_id: DeviceId,
        _token: &str,
        page_size: u32,
        page_number: u32,
    ) -> anyhow::Result<Vec<DeviceDetail>> {
        self.history_calls
            .lock()
            .unwrap()
            .push((device_id, page_size, page_number));

        let gate = self.gates.lock().unwrap().get(&device_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_history.load(Ordering::SeqCst) {
            anyhow::bail!("History request failed with status: 502 Bad Gateway");
        }

        let skip = (page_number.saturating_sub(1) * page_size) as usize;
        let records = self
            .history
            .lock()
            .unwrap()
            .get(&device_id)
            .map(|all| all.iter().skip(skip).take(page_size as usize).cloned().collect())
            .unwrap_or_default();
        Ok(records)
    }

    async fn delete_device(&self, device_id: DeviceId, _token: &str) -> anyhow::Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            anyhow::bail!("Delete request failed with status: 500 Internal Server Error");
        }
        self.deleted.lock().unwrap().push(device_id);
        self.fleet.lock().unwrap().retain(|d| d.id != device_id);
        Ok(())
    }
}
