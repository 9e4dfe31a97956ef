//! Fault values: "processing must stop here".
//!
//! A fault is embedded in a response message instead of being returned as an
//! error, so every hop of a call chain observes the same state. Faults are
//! immutable once built and travel behind an `Arc`: relaying a fault from one
//! response to another shares the value rather than copying it.

use serde::{Deserialize, Serialize};

/// Read-only carrier of a human-readable hint.
///
/// ## Empty hint
///
/// A fault whose hint is empty means "no fault". Schema-generated messages
/// frequently carry an allocated but blank fault field, so emptiness of the
/// hint, not presence of the value, is what signals a halt.
///
/// `dyn Fault` implements `Fault` as well, which lets a holder expose either a
/// concrete message type or the abstract capability.
pub trait Fault: Send + Sync {
    fn hint(&self) -> &str;
}

/// Hint of a possibly absent fault; `""` when there is none.
pub fn hint_of<F>(fault: Option<&F>) -> &str
where
    F: Fault + ?Sized,
{
    fault.map(|f| f.hint()).unwrap_or_default()
}

/// A fault that can serve as a prototype for new faults.
///
/// A factory built with [`FaultFactory::from_prototype`](crate::FaultFactory::from_prototype)
/// clones the prototype and sets the hint on the copy, which removes the need
/// for a hand-written constructor function.
pub trait PrototypeFault: Fault + Clone {
    fn set_hint(&mut self, hint: String);
}

/// Ready-made fault message.
///
/// Serializes as `{"hint": "..."}`. A missing `hint` deserializes to an empty
/// (not halted) fault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultMessage {
    hint: String,
}

impl FaultMessage {
    pub fn new(hint: impl Into<String>) -> Self {
        Self { hint: hint.into() }
    }

    /// A blank fault, for pre-allocating a message's fault field.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hint.is_empty()
    }
}

impl Fault for FaultMessage {
    fn hint(&self) -> &str {
        &self.hint
    }
}

impl PrototypeFault for FaultMessage {
    fn set_hint(&mut self, hint: String) {
        self.hint = hint;
    }
}

impl core::fmt::Display for FaultMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.hint)
    }
}
