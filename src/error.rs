/// All errors that can occur while harvesting, reshaping or serving statistics.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response body from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The document store rejected an operation or became unreachable.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A stored document did not match the expected shape.
    #[error("failed to decode document: {0}")]
    DocumentDecode(#[from] mongodb::bson::de::Error),

    /// A value could not be turned into a document.
    #[error("failed to encode document: {0}")]
    DocumentEncode(#[from] mongodb::bson::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
