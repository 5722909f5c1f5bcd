use thiserror::Error;

/// Errors that can escape the probe crate.
///
/// The check flow itself never fails; every step records its problems in
/// [`crate::IntegrationResult::errors`]. Only building the HTTP stack can.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure to get any HTTP response out of a request.
///
/// The two kinds are kept apart because a host that does not resolve means
/// "wrong domain guess", while anything else is worth reporting verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("domain resolution error for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("request error for {url}: {message}")]
    Request { url: String, message: String },
}

impl TransportError {
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }

    pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let url = url.to_owned();
        let message = err.to_string();
        if err.is_connect() {
            Self::Connect { url, message }
        } else {
            Self::Request { url, message }
        }
    }
}
