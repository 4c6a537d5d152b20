use surety_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("oracle {oracle} does not hold index {index}")]
    WrongIndex { oracle: String, index: u8 },

    #[error("oracle {0} already has an index assignment")]
    AlreadyAssigned(String),

    #[error("airline {0} is not a funded participant")]
    NotEligibleToVote(String),

    #[error("flight {0} is already registered")]
    FlightAlreadyRegistered(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
