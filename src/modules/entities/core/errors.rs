use crate::shared::infrastructure::gateway::TransportError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{operation} requires id")]
    Precondition { operation: &'static str },

    #[error("{model} has no attribute `{key}`")]
    UnknownAttribute { model: &'static str, key: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}
