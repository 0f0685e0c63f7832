//! Binder errors

use std::fmt;
use thiserror::Error;

use super::hook::TargetKind;

/// Error raised while binding the value tree onto a typed record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// The requested path does not exist in the tree.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// A decode hook rejected a scalar.
    #[error("cannot convert {value:?} to {target}: {reason}")]
    Coercion {
        value: String,
        target: TargetKind,
        reason: String,
    },

    /// Message raised by a `Deserialize` impl.
    #[error("{0}")]
    Custom(String),
}

impl serde::de::Error for BindError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        BindError::Custom(msg.to_string())
    }
}
