use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    PolicyViolation(String),

    #[error("Jira request failed: {0}")]
    Jira(#[from] reqwest::Error),

    #[error("Unexpected Jira response: {0}")]
    JiraResponse(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GitHub CLI error: {0}")]
    GitHubCli(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
