#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Controller rejected command with status {status}")]
    Rejected { status: u16 },

    #[error("{0}")]
    Unavailable(String),
}
