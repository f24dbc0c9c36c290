use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibretaError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("A {entity} named '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },

    #[error("Cannot delete {entity} '{name}': it is referenced by existing sales")]
    ReferentialIntegrity { entity: &'static str, name: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid backup file: {0}")]
    InvalidBackupFormat(String),

    #[error("Summary service error: {0}")]
    Summary(String),

    #[error("Unknown client: {0}")]
    UnknownClient(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown salesperson: {0}")]
    UnknownSalesperson(String),

    #[error("No {entity} with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LibretaError>;
