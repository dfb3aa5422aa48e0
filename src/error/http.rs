use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build request: {source}")]
    BuildRequest {
        #[source]
        source: reqwest::Error,
    },
    #[error("{source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
}
