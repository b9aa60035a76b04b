/// Core error type.
///
/// The dialogue engine never produces one of these. Configuration loading,
/// user-supplied date patterns and front-end I/O can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid date pattern `{0}`")]
    DatePattern(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
