//! Fault construction: turning a hint into a fault value.

use std::sync::Arc;

use crate::fault::{Fault, FaultMessage, PrototypeFault};

/// Builds faults of type `T` from hints.
///
/// This is the single point that knows how a concrete message schema spells a
/// fault. Propagation code only ever sees the factory, so it stays independent
/// of the schema. A factory is cheap to clone and can be injected into the
/// components that halt, or registered once in a [`Registry`](crate::Registry).
///
/// `T` may be a concrete message type or `dyn Fault`.
pub struct FaultFactory<T: ?Sized> {
    build: Arc<dyn Fn(&str) -> Arc<T> + Send + Sync>,
}

impl<T> FaultFactory<T>
where
    T: Fault + ?Sized,
{
    /// Wrap a constructor function.
    ///
    /// ```ignore
    /// let factory = FaultFactory::new(|hint: &str| Arc::new(FaultMessage::new(hint)));
    /// ```
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&str) -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
        }
    }

    /// Build a fault carrying `hint`.
    pub fn build(&self, hint: &str) -> Arc<T> {
        (self.build)(hint)
    }
}

impl<T> FaultFactory<T>
where
    T: PrototypeFault + 'static,
{
    /// Build faults by cloning `prototype` and setting the hint on the copy.
    pub fn from_prototype(prototype: T) -> Self {
        Self::new(move |hint| {
            let mut fault = prototype.clone();
            fault.set_hint(hint.to_owned());
            Arc::new(fault)
        })
    }
}

impl Default for FaultFactory<FaultMessage> {
    fn default() -> Self {
        Self::from_prototype(FaultMessage::empty())
    }
}

impl<T: ?Sized> Clone for FaultFactory<T> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
        }
    }
}

impl<T: ?Sized> core::fmt::Debug for FaultFactory<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FaultFactory")
            .field("fault_type", &core::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
