use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("API key is missing. Set it via --api-key or the ZUMBI_API_KEY environment variable")]
    MissingCredential,

    #[error("API error: {0}")]
    Api(String),

    #[error("AI returned an empty response")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid scene format: {0}")]
    InvalidSceneFormat(String),

    #[error("Topic must not be blank")]
    EmptyTopic,

    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StudioError>;
