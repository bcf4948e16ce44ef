#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Missing required identifier: {0}")]
    MissingIdentifier(String),

    #[error("Entity has no api metadata block: {0}")]
    MissingMeta(String),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error("No such board: {0}")]
    BoardNotExist(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("Password must be at least 12 characters")]
    PasswordTooShort,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
