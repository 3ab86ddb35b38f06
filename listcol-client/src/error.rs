use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot read an object id from trigger '{0}'")]
    InvalidTrigger(String),

    #[error("trigger does not refer to a saved object")]
    NoObject,

    #[error("row container '{0}' not found")]
    RowNotFound(String),

    #[error("edit form '{found}' does not belong to row (expected '{expected}')")]
    WrongEditRow { expected: String, found: String },

    #[error("invalid fragment pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
