//! Holder contract: response-like messages with one fault slot.

use std::sync::Arc;

use crate::fault::Fault;

/// A message that can carry one fault.
///
/// Implement this once per response type (by hand, or with [`impl_holder!`]
/// for the usual `Option<Arc<_>>` field). The associated `Fault` type is
/// either a concrete message type, so callers get it back without a downcast,
/// or `dyn Fault` when the holder only needs the capability.
///
/// A holder belongs to one in-flight call. `set_fault` takes `&mut self`, so
/// there is exactly one writer per holder.
pub trait Holder {
    type Fault: Fault + ?Sized;

    /// The attached fault, or `None` if none was ever set.
    fn fault(&self) -> Option<&Arc<Self::Fault>>;

    /// Attach `fault`, replacing any previous one.
    fn set_fault(&mut self, fault: Arc<Self::Fault>);

    /// See [`is_halted`](crate::propagation::is_halted).
    fn is_halted(&self) -> bool {
        crate::propagation::is_halted(Some(self))
    }
}

/// Implement [`Holder`] for a struct whose fault lives in an
/// `Option<Arc<F>>` field.
///
/// ```ignore
/// #[derive(Default)]
/// struct GetUserResponse {
///     user: Option<User>,
///     fault: Option<Arc<FaultMessage>>,
/// }
///
/// impl_holder!(GetUserResponse, fault, FaultMessage);
/// ```
#[macro_export]
macro_rules! impl_holder {
    ($t:ty, $field:ident, $fault:ty) => {
        impl $crate::Holder for $t {
            type Fault = $fault;

            fn fault(&self) -> ::core::option::Option<&::std::sync::Arc<Self::Fault>> {
                self.$field.as_ref()
            }

            fn set_fault(&mut self, fault: ::std::sync::Arc<Self::Fault>) {
                self.$field = ::core::option::Option::Some(fault);
            }
        }
    };
}
