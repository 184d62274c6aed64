//! QuickBooks client errors.

use thiserror::Error;

/// Errors talking to the QuickBooks OAuth or accounting endpoints.
#[derive(Debug, Error)]
pub enum QuickBooksError {
    /// Transport failure or an undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// A 2xx body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configured endpoint is not a valid URL.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

impl QuickBooksError {
    /// Reads a failed response into an [`QuickBooksError::Upstream`] error.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Self::Upstream { status, body }
    }
}
