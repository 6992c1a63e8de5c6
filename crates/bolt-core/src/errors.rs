use crate::schema::{ModelError, SchemaError};

/// Core error type.
///
/// Adapter crates map their own failures into this type so the bot can decide
/// uniformly whether to drop an event or stop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("schema table error: {0}")]
    Schema(#[from] SchemaError),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
