//! Configuration error model.

use thiserror::Error;

/// Result type used by the fallible (`try_*`) registry operations.
pub type FaultResult<T> = Result<T, FaultError>;

/// Misconfiguration of the fault channel.
///
/// These are programming errors, not runtime conditions: the default API turns
/// them into panics. The `try_*` operations hand them back as values so that
/// startup code can report them its own way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FaultError {
    /// A propagation operation ran before any factory was registered.
    #[error("fault factory not bootstrapped; call bootstrap() during startup")]
    NotBootstrapped,

    /// `bootstrap` was called on a registry that already holds a factory.
    #[error("fault factory already bootstrapped")]
    AlreadyBootstrapped,

    /// The registered factory builds a different fault type than requested.
    #[error("fault factory type mismatch (expected: {expected}, registered: {registered})")]
    TypeMismatch {
        expected: &'static str,
        registered: &'static str,
    },
}

impl FaultError {
    pub fn type_mismatch(expected: &'static str, registered: &'static str) -> Self {
        Self::TypeMismatch {
            expected,
            registered,
        }
    }
}
