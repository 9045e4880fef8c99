use thiserror::Error;

use crate::relay::WireError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("recording I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("undecodable snapshot: {0}")]
    Wire(#[from] WireError),
}
