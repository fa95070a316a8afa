#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Record is not a JSON object: {0}")]
    NotAnObject(String),

    #[error("Unknown log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to install subscriber: {0}")]
    SubscriberError(String),
}
