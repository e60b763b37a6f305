// Application state for HTTP handlers
use crate::application::console_service::ConsoleService;
use crate::domain::percentage::Calibration;

#[derive(Clone)]
pub struct AppState {
    pub console: ConsoleService,
}

impl AppState {
    pub fn calibration(&self) -> Calibration {
        self.console.settings().calibration
    }
}
