//! Emission shapes: how a signal runs its slots and what `emit` returns.

use super::slot::{Slot, SlotId};

/// Strategy used by [`Signal::emit`](super::Signal::emit).
pub trait Emission<A, R> {
    /// Value returned from `emit`.
    type Output;

    /// Runs `slots` in order with a clone of `args` each.
    fn emit(slots: &[Slot<A, R>], args: A) -> Self::Output;
}

/// Invokes every slot and discards the return values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Broadcast;

/// Veto chain: stops at the first slot returning `false`.
///
/// `emit` yields `true` when every invoked slot returned `true`, including the
/// case of no slots at all. A slot skipped because its tracked target is gone
/// or because it closes a forwarding cycle neither approves nor vetoes. A slot
/// skipped while its object is alive but already borrowed vetoes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Veto;

impl<A: Clone, R> Emission<A, R> for Broadcast {
    type Output = ();

    fn emit(slots: &[Slot<A, R>], args: A) {
        for slot in slots {
            let _ = slot.call(args.clone());
        }
    }
}

impl<A: Clone> Emission<A, bool> for Veto {
    type Output = bool;

    fn emit(slots: &[Slot<A, bool>], args: A) -> bool {
        slots
            .iter()
            .all(|slot| slot.call(args.clone()).unwrap_or_else(|| abstains(slot)))
    }
}

fn abstains<A>(slot: &Slot<A, bool>) -> bool {
    !slot.is_live() || matches!(slot.id(), SlotId::Forward(_))
}
