use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The API key or channel id is absent. Fatal: no request may be
    /// attempted, and this is distinct from any network failure.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A network call failed or the upstream answered with a non-success
    /// status. Transient; eligible for retry.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream answered successfully but the expected JSON fields
    /// were absent or unparseable. Content error; not retried.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// All attempts for one request failed. Carries the most recent error.
    #[error("Retries exhausted after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Only transport-class failures qualify; a malformed payload will not
    /// fix itself by asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::UpstreamUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
