use thiserror::Error;

/// Errors raised by the document store, editing operations and the shell.
///
/// The billing core itself never fails; everything here comes from file
/// handling or from user input that names something that does not exist.
#[derive(Debug, Error)]
pub enum MeterbookError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Unit name must not be empty")]
    EmptyName,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Unit {0} has no records")]
    NoRecords(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MeterbookError>;
