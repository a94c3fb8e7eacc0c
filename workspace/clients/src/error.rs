use thiserror::Error;

/// Errors raised while talking to the forecasting or text-generation services.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure, timeout, or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{service} responded with {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The text-generation service returned no text
    #[error("Empty reply from {0}")]
    EmptyReply(&'static str),

    /// No API key configured for the text-generation service
    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),
}

pub type Result<T> = std::result::Result<T, ClientError>;
