#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}
