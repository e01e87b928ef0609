use thiserror::Error;

pub type GitoResult<T> = Result<T, GitoError>;

#[derive(Debug, Error)]
pub enum GitoError {
    #[error("api error: {0}")]
    Api(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GitoError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        GitoError::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        GitoError::Config(msg.into())
    }

    pub fn auth_error(msg: impl Into<String>) -> Self {
        GitoError::Auth(msg.into())
    }

    pub fn store_error(msg: impl Into<String>) -> Self {
        GitoError::Store(msg.into())
    }

    /// Message suitable for showing inside the UI (forms, status line).
    pub fn user_message(&self) -> String {
        match self {
            GitoError::Auth(msg) | GitoError::Store(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
