// Console input errors
use super::device::DeviceId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    #[error("page size {size} is not one of {allowed:?}")]
    InvalidPageSize { size: u32, allowed: Vec<u32> },

    #[error("page number must be at least 1")]
    InvalidPageNumber,

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("unknown status filter: {0}")]
    UnknownStatusFilter(String),

    #[error("no session token available")]
    NotAuthenticated,

    #[error("device {0} is not in the current fleet snapshot")]
    UnknownDevice(DeviceId),
}
