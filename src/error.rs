pub type ActionResult<T> = Result<T, ActionError>;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("api token is empty; set the api-token input")]
    MissingCredential,

    #[error("command failed: {command} (exit code {code})")]
    CommandFailed { command: String, code: i32 },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("no Worker Version ID found in upload output; cannot deploy")]
    VersionIdNotFound,

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
