//! Parse errors for the domain value types.
//! The scoring pipeline itself never fails; these only surface when the
//! shell turns user input or stored strings into typed values.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Unknown intensity: {0}")]
    UnknownIntensity(String),

    #[error("Invalid quiz answer: {0}")]
    InvalidAnswer(String),
}
