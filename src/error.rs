use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, CliError>;
