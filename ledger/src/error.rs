use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("voter {0} already voted on this request")]
    DuplicateVote(String),

    #[error("request is already resolved")]
    RequestAlreadyResolved,

    #[error("no such request is open")]
    UnknownRequest,
}
