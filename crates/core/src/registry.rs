//! Once-only fault factory registry.
//!
//! The process-wide registry is written exactly once during startup and read
//! from any thread afterwards. Writes go through `OnceLock`, so readers never
//! take a lock. There is no reset: a second `bootstrap` is a fatal
//! configuration error. Tests that need isolation create their own
//! [`Registry`] instead of touching the global one.
//!
//! ## Startup
//!
//! ```ignore
//! faultline_core::registry::bootstrap(FaultFactory::<FaultMessage>::default());
//! ```

use std::any::{Any, type_name};
use std::sync::OnceLock;

use crate::error::{FaultError, FaultResult};
use crate::factory::FaultFactory;
use crate::fault::Fault;

struct Registered {
    factory: Box<dyn Any + Send + Sync>,
    fault_type: &'static str,
}

/// Holds at most one [`FaultFactory`], set once.
///
/// The factory is stored type-erased. Asking for a factory of a different
/// fault type than the one registered is the only downcast in the crate and
/// fails with [`FaultError::TypeMismatch`].
pub struct Registry {
    slot: OnceLock<Registered>,
}

impl Registry {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Register `factory`, or report that one is already registered.
    pub fn try_bootstrap<T>(&self, factory: FaultFactory<T>) -> FaultResult<()>
    where
        T: Fault + ?Sized + 'static,
    {
        let registered = Registered {
            factory: Box::new(factory),
            fault_type: type_name::<T>(),
        };
        self.slot
            .set(registered)
            .map_err(|_| FaultError::AlreadyBootstrapped)?;

        tracing::info!(fault_type = type_name::<T>(), "fault factory bootstrapped");
        Ok(())
    }

    /// Register `factory`.
    ///
    /// # Panics
    ///
    /// If a factory was already registered.
    pub fn bootstrap<T>(&self, factory: FaultFactory<T>)
    where
        T: Fault + ?Sized + 'static,
    {
        if let Err(err) = self.try_bootstrap(factory) {
            fatal(err);
        }
    }

    /// The registered factory for faults of type `T`.
    pub fn try_factory<T>(&self) -> FaultResult<&FaultFactory<T>>
    where
        T: Fault + ?Sized + 'static,
    {
        let registered = self.slot.get().ok_or(FaultError::NotBootstrapped)?;
        registered
            .factory
            .downcast_ref::<FaultFactory<T>>()
            .ok_or_else(|| FaultError::type_mismatch(type_name::<T>(), registered.fault_type))
    }

    /// The registered factory for faults of type `T`.
    ///
    /// # Panics
    ///
    /// If nothing was registered, or the registered factory builds another type.
    pub fn factory<T>(&self) -> &FaultFactory<T>
    where
        T: Fault + ?Sized + 'static,
    {
        match self.try_factory() {
            Ok(factory) => factory,
            Err(err) => fatal(err),
        }
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Type name of the registered fault, if any.
    pub fn fault_type(&self) -> Option<&'static str> {
        self.slot.get().map(|r| r.fault_type)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("fault_type", &self.fault_type())
            .finish()
    }
}

// Configuration errors never return to the caller.
fn fatal(err: FaultError) -> ! {
    tracing::error!(error = %err, "fault protocol misconfigured");
    panic!("faultline: {err}");
}

static GLOBAL: Registry = Registry::new();

/// The process-wide registry.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Register the process-wide factory. Call once, at startup.
///
/// # Panics
///
/// If called a second time.
pub fn bootstrap<T>(factory: FaultFactory<T>)
where
    T: Fault + ?Sized + 'static,
{
    GLOBAL.bootstrap(factory);
}

/// Register the process-wide factory, reporting a repeated call as an error.
pub fn try_bootstrap<T>(factory: FaultFactory<T>) -> FaultResult<()>
where
    T: Fault + ?Sized + 'static,
{
    GLOBAL.try_bootstrap(factory)
}

/// The process-wide factory for faults of type `T`.
///
/// # Panics
///
/// If [`bootstrap`] has not run, or registered another fault type.
pub fn factory<T>() -> &'static FaultFactory<T>
where
    T: Fault + ?Sized + 'static,
{
    GLOBAL.factory()
}
