use surety_ledger::LedgerError;
use surety_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("caller {0} is not an eligible voter (unregistered or unfunded)")]
    NotEligibleToVote(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
