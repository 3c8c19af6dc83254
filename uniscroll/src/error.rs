use thiserror::Error;

/// Errors from the fallible edges of the crate: option parsing, colors and
/// logger setup. Widget operation itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("invalid scrollbar options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
