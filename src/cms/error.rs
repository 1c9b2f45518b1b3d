use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("CMS answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}

impl From<reqwest::Error> for CmsError {
    fn from(e: reqwest::Error) -> Self {
        CmsError::Network(e.to_string())
    }
}
