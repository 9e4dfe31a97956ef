//! Propagation operations: detect, signal and relay faults across holders.
//!
//! ```text
//! inner call ── halt(resp, "hint") ──► inner response
//!                                          │ forward(Some(&inner), &mut outer)
//!                                          ▼
//!                                     outer response ── is_halted? ──► caller maps to transport error
//! ```
//!
//! Everything here is synchronous and allocation-free apart from building the
//! fault itself. `is_halted` and `forward` tolerate an absent holder.
//! `halt` requires one, which `&mut H` guarantees.

use std::sync::Arc;

use crate::factory::FaultFactory;
use crate::fault::Fault;
use crate::holder::Holder;
use crate::registry;

/// Whether processing stopped at `holder`.
///
/// `false` for an absent holder, for an empty fault slot, and for a fault with
/// an empty hint.
pub fn is_halted<H>(holder: Option<&H>) -> bool
where
    H: Holder + ?Sized,
{
    halted_hint(holder).is_some()
}

/// The hint of `holder`'s fault if it is halted.
pub fn halted_hint<H>(holder: Option<&H>) -> Option<&str>
where
    H: Holder + ?Sized,
{
    let hint = holder?.fault()?.hint();
    (!hint.is_empty()).then_some(hint)
}

/// Halt processing: attach a fresh fault built by the process-wide factory.
///
/// # Panics
///
/// If the global registry was never bootstrapped, or was bootstrapped for a
/// different fault type than `H::Fault`.
pub fn halt<H>(holder: &mut H, hint: &str)
where
    H: Holder + ?Sized,
    H::Fault: 'static,
{
    halt_with(registry::factory::<H::Fault>(), holder, hint);
}

/// Halt processing with an injected factory.
///
/// An empty `hint` leaves the holder indistinguishable from "no fault".
pub fn halt_with<H>(factory: &FaultFactory<H::Fault>, holder: &mut H, hint: &str)
where
    H: Holder + ?Sized,
{
    if hint.is_empty() {
        tracing::debug!("halt called with an empty hint; holder stays unhalted");
    } else {
        tracing::debug!(hint, "processing halted");
    }
    holder.set_fault(factory.build(hint));
}

/// Relay `from`'s fault into `to` if `from` is halted.
///
/// Returns `false` and leaves `to` untouched when `from` is absent, has no
/// fault, or its hint is empty. Otherwise `to` receives the same `Arc` (not a
/// copy) and `true` is returned. Calling it again with the same pair re-attaches
/// the same fault.
pub fn forward<F, T>(from: Option<&F>, to: &mut T) -> bool
where
    F: Holder + ?Sized,
    T: Holder<Fault = F::Fault> + ?Sized,
{
    let Some(fault) = from.and_then(|h| h.fault()) else {
        return false;
    };
    if fault.hint().is_empty() {
        return false;
    }

    tracing::debug!(hint = fault.hint(), "fault forwarded");
    to.set_fault(Arc::clone(fault));
    true
}

/// Same as [`forward`].
#[inline]
pub fn transfer<F, T>(from: Option<&F>, to: &mut T) -> bool
where
    F: Holder + ?Sized,
    T: Holder<Fault = F::Fault> + ?Sized,
{
    forward(from, to)
}

/// Make sure `holder` carries a fault value, pre-allocating a blank one from
/// the process-wide factory if the slot is empty. Returns the fault in the slot.
///
/// The holder is not halted afterwards unless it already was.
///
/// # Panics
///
/// Under the same conditions as [`halt`], when the slot is empty.
pub fn ensure_fault<H>(holder: &mut H) -> Arc<H::Fault>
where
    H: Holder + ?Sized,
    H::Fault: 'static,
{
    if let Some(fault) = holder.fault() {
        return Arc::clone(fault);
    }
    ensure_fault_with(registry::factory::<H::Fault>(), holder)
}

/// [`ensure_fault`] with an injected factory.
pub fn ensure_fault_with<H>(factory: &FaultFactory<H::Fault>, holder: &mut H) -> Arc<H::Fault>
where
    H: Holder + ?Sized,
{
    if let Some(fault) = holder.fault() {
        return Arc::clone(fault);
    }
    let fault = factory.build("");
    holder.set_fault(Arc::clone(&fault));
    fault
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultMessage;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    struct ValidateResponse {
        fault: Option<Arc<FaultMessage>>,
    }

    crate::impl_holder!(ValidateResponse, fault, FaultMessage);

    #[derive(Debug, Default)]
    struct CheckoutResponse {
        receipt: Option<String>,
        fault: Option<Arc<FaultMessage>>,
    }

    crate::impl_holder!(CheckoutResponse, fault, FaultMessage);

    #[derive(Default)]
    struct ErasedResponse {
        fault: Option<Arc<dyn Fault>>,
    }

    crate::impl_holder!(ErasedResponse, fault, dyn Fault);

    fn factory() -> FaultFactory<FaultMessage> {
        FaultFactory::default()
    }

    fn slot_hint<H: Holder>(holder: &H) -> Option<&str> {
        holder.fault().map(|f| f.hint())
    }

    #[test]
    fn absent_holder_is_not_halted() {
        assert!(!is_halted::<ValidateResponse>(None));
        assert_eq!(halted_hint::<ValidateResponse>(None), None);
    }

    #[test]
    fn fresh_holder_is_not_halted() {
        let resp = ValidateResponse::default();
        assert!(!is_halted(Some(&resp)));
    }

    #[test]
    fn halt_then_forward_relays_the_same_fault() {
        let mut resp_a = ValidateResponse::default();
        halt_with(&factory(), &mut resp_a, "validation failed");
        assert!(is_halted(Some(&resp_a)));

        let mut resp_b = CheckoutResponse::default();
        assert!(forward(Some(&resp_a), &mut resp_b));
        assert_eq!(slot_hint(&resp_b), Some("validation failed"));
        assert!(resp_b.receipt.is_none());

        let (a, b) = (resp_a.fault().unwrap(), resp_b.fault().unwrap());
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn forward_from_unhalted_holder_leaves_target_untouched() {
        let resp_c = ValidateResponse::default();
        let mut resp_d = CheckoutResponse::default();

        assert!(!forward(Some(&resp_c), &mut resp_d));
        assert!(resp_d.fault().is_none());
    }

    #[test]
    fn forward_from_absent_holder_returns_false() {
        let mut to = CheckoutResponse::default();
        assert!(!forward::<ValidateResponse, _>(None, &mut to));
        assert!(to.fault().is_none());
    }

    #[test]
    fn forward_skips_blank_fault_and_keeps_existing_target_fault() {
        let from = ValidateResponse {
            fault: Some(Arc::new(FaultMessage::empty())),
        };
        let mut to = CheckoutResponse::default();
        halt_with(&factory(), &mut to, "already failed");

        assert!(!forward(Some(&from), &mut to));
        assert_eq!(slot_hint(&to), Some("already failed"));
    }

    #[test]
    fn forward_twice_is_idempotent() {
        let mut from = ValidateResponse::default();
        halt_with(&factory(), &mut from, "denied");
        let mut to = CheckoutResponse::default();

        assert!(forward(Some(&from), &mut to));
        assert!(transfer(Some(&from), &mut to));
        assert_eq!(slot_hint(&to), Some("denied"));
        assert!(Arc::ptr_eq(from.fault().unwrap(), to.fault().unwrap()));
    }

    #[test]
    fn empty_hint_does_not_halt() {
        let mut resp = ValidateResponse::default();
        halt_with(&factory(), &mut resp, "");

        assert!(resp.fault().is_some());
        assert!(!is_halted(Some(&resp)));
    }

    #[test]
    fn last_halt_wins() {
        let mut resp = ValidateResponse::default();
        halt_with(&factory(), &mut resp, "a");
        halt_with(&factory(), &mut resp, "b");

        assert_eq!(halted_hint(Some(&resp)), Some("b"));
    }

    #[test]
    fn erased_holders_relay_between_each_other() {
        let factory = FaultFactory::<dyn Fault>::new(|hint: &str| -> Arc<dyn Fault> {
            Arc::new(FaultMessage::new(hint))
        });
        let mut from = ErasedResponse::default();
        halt_with(&factory, &mut from, "erased");

        let mut to = ErasedResponse::default();
        assert!(forward(Some(&from), &mut to));
        assert_eq!(halted_hint(Some(&to)), Some("erased"));
    }

    #[test]
    fn ensure_fault_preallocates_a_blank_fault() {
        let mut resp = ValidateResponse::default();
        let fault = ensure_fault_with(&factory(), &mut resp);

        assert!(fault.is_empty());
        assert!(resp.fault().is_some());
        assert!(!is_halted(Some(&resp)));
    }

    #[test]
    fn ensure_fault_keeps_an_existing_fault() {
        let mut resp = ValidateResponse::default();
        halt_with(&factory(), &mut resp, "kept");

        let fault = ensure_fault_with(&factory(), &mut resp);
        assert_eq!(fault.hint(), "kept");
        assert!(is_halted(Some(&resp)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a non-empty hint always halts and is preserved verbatim,
        /// including through a forward.
        #[test]
        fn non_empty_hint_halts_and_survives_forward(hint in ".{1,64}") {
            let mut from = ValidateResponse::default();
            halt_with(&factory(), &mut from, &hint);
            prop_assert!(is_halted(Some(&from)));
            prop_assert_eq!(halted_hint(Some(&from)), Some(hint.as_str()));

            let mut to = CheckoutResponse::default();
            prop_assert!(forward(Some(&from), &mut to));
            prop_assert_eq!(halted_hint(Some(&to)), Some(hint.as_str()));
        }

        /// Property: after a sequence of halts the holder reflects the last one,
        /// and is halted exactly when that last hint is non-empty.
        #[test]
        fn last_write_wins(hints in prop::collection::vec("[a-z]{0,8}", 1..10)) {
            let mut resp = ValidateResponse::default();
            for hint in &hints {
                halt_with(&factory(), &mut resp, hint);
            }

            let last = hints.last().unwrap();
            prop_assert_eq!(slot_hint(&resp), Some(last.as_str()));
            prop_assert_eq!(is_halted(Some(&resp)), !last.is_empty());
        }
    }
}
