use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InvalidOptions(#[from] mender_cmdline::Error),
    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{0}' is not a recognized log level")]
    InvalidLogLevel(String),
    #[error("Error processing io: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error parsing configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
