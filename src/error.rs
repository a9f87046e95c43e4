use thiserror::Error;

use crate::form::ValidationError;

#[derive(Error, Debug)]
pub enum SproutError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] refinery::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Plant not found: {0}")]
    PlantNotFound(String),

    #[error("More than one plant is named '{0}'")]
    AmbiguousPlant(String),

    #[error("Stored plant data is unreadable: {0}")]
    CorruptData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Prompt cancelled")]
    PromptCancelled,
}

impl SproutError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SproutError::PlantNotFound(_) => Some(
                "Run `sprout list` to see your plants"
            ),
            SproutError::AmbiguousPlant(_) => Some(
                "Use the plant id instead of its name:\n  sprout list --json"
            ),
            SproutError::CorruptData(_) => Some(
                "Inspect the raw data with `sprout export`, or set\n  on_corrupt_data = \"reset\" in the config file to start over"
            ),
            SproutError::Validation(ValidationError::MissingField) => Some(
                "Both a name and an interval are required:\n  sprout add \"Snake Plant\" --every 7"
            ),
            SproutError::Validation(_) => Some(
                "The interval is a whole number of days, e.g. --every 7"
            ),
            SproutError::DatabaseError(_) | SproutError::MigrationError(_) => Some(
                "Check that the data directory is writable, or point SPROUT_DB at another file"
            ),
            SproutError::TomlError(_) => Some(
                "Fix or remove the config file shown by `sprout config --path`"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SproutError>;
