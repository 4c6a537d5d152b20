use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("voter {0} is already registered")]
    AlreadyRegistered(String),

    #[error("voter {0} is not registered")]
    UnknownVoter(String),
}
