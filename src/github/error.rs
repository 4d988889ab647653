use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Header(#[from] http::header::InvalidHeaderValue),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Cache(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Base URL can not have path segments appended to it.
    #[error("Expecting a hierarchical base URL, but was `{0}`.")]
    BaseUrl(String),

    /// GitHub answered with an error document, e.g. `{"message": "Not Found"}`.
    #[error("{message}")]
    Api { message: String },

    #[error("Unexpected response body from `{url}`: {body}")]
    UnexpectedBody { url: String, body: String },
}
