//! `faultline-core` — fault propagation through response messages.
//!
//! A call chain signals "stop processing" by attaching a [`Fault`] to its
//! response message instead of returning an error. Any later hop can check the
//! response with [`is_halted`] and relay the very same fault into its own
//! response with [`forward`].
//!
//! How a fault is built from a hint is decided once, at startup, by
//! registering a [`FaultFactory`] (see [`registry`]). Components that prefer an
//! explicit dependency take a `FaultFactory` and call [`halt_with`].
//!
//! This crate has no wire format of its own and does not map faults to
//! transport errors; that is left to the surrounding RPC layer.

pub mod error;
pub mod factory;
pub mod fault;
pub mod holder;
pub mod propagation;
pub mod registry;

pub use error::{FaultError, FaultResult};
pub use factory::FaultFactory;
pub use fault::{Fault, FaultMessage, PrototypeFault, hint_of};
pub use holder::Holder;
pub use propagation::{
    ensure_fault, ensure_fault_with, forward, halt, halt_with, halted_hint, is_halted, transfer,
};
pub use registry::Registry;
