use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, validation, marketplace rules) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(String),
    #[error("Insufficient credits: balance {balance}, lead costs {cost}")]
    InsufficientCredit { balance: i64, cost: i64 },
    #[error("Lead {0} already purchased")]
    AlreadyPurchased(i64),
    #[error("{0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) | ServerError::Validation(_) => 400,
            ServerError::InsufficientCredit { .. } => 402,
            ServerError::AlreadyPurchased(_) | ServerError::Conflict(_) => 409,
            ServerError::Unauthorized(_) => 401,
            ServerError::Forbidden(_) => 403,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Message safe to show in a toast. Backend details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ServerError::NotFound => "Not found.".to_string(),
            ServerError::BadRequest(msg) | ServerError::Validation(msg) => msg.clone(),
            ServerError::InsufficientCredit { balance, cost } => {
                format!("You have insufficient credits ({balance} available, {cost} needed).")
            }
            ServerError::AlreadyPurchased(_) => "You have already purchased this lead.".to_string(),
            ServerError::Conflict(msg) => msg.clone(),
            ServerError::Unauthorized(_) => "Please sign in first.".to_string(),
            ServerError::Forbidden(msg) => msg.clone(),
            ServerError::DbError(_) | ServerError::InternalError => "Error! Try again".to_string(),
        }
    }

    /// Rejections caused by the user's own input or state, as opposed to backend failures.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ServerError::DbError(_) | ServerError::InternalError)
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(value: rusqlite::Error) -> Self {
        Self::DbError(value.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
