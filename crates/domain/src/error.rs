/// Shared error type used across all leadwire crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure (DNS, connect, TLS, aborted body).
    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    /// Non-2xx response. The body is truncated for logging but kept
    /// verbatim enough to diagnose without re-running the request.
    #[error("api {status} {url}: {body}")]
    Api { status: u16, url: String, body: String },

    /// 2xx response whose body did not decode into the expected shape.
    #[error("backend: {0}")]
    Backend(String),

    /// Missing, expired, or malformed session credentials. User-facing.
    #[error("auth: {0}")]
    Auth(String),

    /// The caller supplied no usable identity. Programmer error; checked
    /// before any scope resolution or network call.
    #[error("invalid user: {0}")]
    InvalidUser(String),

    #[error("config: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
