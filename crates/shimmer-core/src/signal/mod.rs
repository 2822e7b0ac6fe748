//! Signal/slot dispatch.
//!
//! A [`Signal`] is an ordered list of [`Slot`]s sharing one call signature.
//! Arity is expressed through the argument type: `()` for no arguments, a
//! plain type for one, and a tuple for several.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use shimmer_core::signal::{Signal, VetoSignal};
//!
//! struct Score(u32);
//!
//! impl Score {
//!     fn add(&mut self, (points, bonus): (u32, bool)) {
//!         self.0 += if bonus { points * 2 } else { points };
//!     }
//! }
//!
//! let score = Rc::new(RefCell::new(Score(0)));
//! let mut scored: Signal<(u32, bool)> = Signal::new();
//! scored.connect_method(&score, Score::add);
//! scored.emit((10, true));
//! assert_eq!(score.borrow().0, 20);
//!
//! let mut can_quit: VetoSignal<()> = VetoSignal::new();
//! assert!(can_quit.emit(()));
//! can_quit.connect_fn(|()| false);
//! assert!(!can_quit.emit(()));
//! ```
//!
//! Strongly bound slots keep their object alive; owners disconnect them in
//! their teardown path. Slots connected with [`Signal::connect_tracked`] hold
//! their object weakly instead and are skipped once it is dropped.

mod emission;
mod slot;

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

pub use emission::{Broadcast, Emission, Veto};
pub use slot::{Slot, SlotId};

/// A signal whose `emit` stops at the first handler returning `false`.
pub type VetoSignal<A> = Signal<A, bool, Veto>;

/// An ordered collection of slots invoked by [`Signal::emit`].
///
/// `A` is the argument type, `R` the slot return type and `E` the
/// [`Emission`] shape. Insertion order is emission order.
pub struct Signal<A, R = (), E = Broadcast> {
    slots: Vec<Slot<A, R>>,
    _emission: PhantomData<fn() -> E>,
}

impl<A, R, E> Signal<A, R, E> {
    /// Creates a signal with no slots.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            _emission: PhantomData,
        }
    }

    /// Appends `slot`. Duplicates are allowed.
    ///
    /// A forward into this very signal is refused, wherever it came from.
    pub fn connect(&mut self, slot: Slot<A, R>) {
        if self.forwards_into_self(&slot) {
            log::warn!("refusing to forward a signal into itself");
            return;
        }
        self.slots.push(slot);
    }

    fn forwards_into_self(&self, slot: &Slot<A, R>) -> bool {
        slot.id() == SlotId::forward_from(self)
    }

    /// Removes the first slot matching `id`.
    ///
    /// Returns whether a slot was removed; a missing slot is not an error.
    pub fn disconnect(&mut self, id: impl Into<SlotId>) -> bool {
        let id = id.into();
        match self.slots.iter().position(|slot| slot.id() == id) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => {
                log::debug!("disconnect: no slot matching {id:?}");
                false
            }
        }
    }

    /// Returns true if a slot matching `id` is connected.
    pub fn contains(&self, id: impl Into<SlotId>) -> bool {
        let id = id.into();
        self.slots.iter().any(|slot| slot.id() == id)
    }

    /// Removes all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Returns true if no slots are connected.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of connected slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the connected slots in emission order.
    pub fn slots(&self) -> &[Slot<A, R>] {
        &self.slots
    }

    /// Appends all of `other`'s slots after this signal's own.
    ///
    /// `other` is left unchanged and nothing is deduplicated. A forward from
    /// `other` into this signal is dropped rather than becoming a self-forward.
    pub fn merge(&mut self, other: &Self) {
        for slot in &other.slots {
            if self.forwards_into_self(slot) {
                log::warn!("merge: dropping a forward into the merging signal");
                continue;
            }
            self.slots.push(slot.clone());
        }
    }

    /// Removes tracked slots whose object has been dropped.
    ///
    /// Returns the number of slots removed.
    pub fn prune(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(Slot::is_live);
        before - self.slots.len()
    }

    /// Invokes every slot in order and appends each returned value to `out`.
    ///
    /// Never stops early, whatever the emission shape. Skipped slots push
    /// nothing.
    pub fn aggregate(&self, args: A, out: &mut Vec<R>)
    where
        A: Clone,
    {
        out.extend(self.slots.iter().filter_map(|slot| slot.call(args.clone())));
    }

    /// Invokes the slots according to the emission shape `E`.
    pub fn emit(&self, args: A) -> E::Output
    where
        E: Emission<A, R>,
    {
        E::emit(&self.slots, args)
    }

    /// Emits a signal shared through a `RefCell`.
    ///
    /// The slot list is snapshotted and the borrow released before any slot
    /// runs, so handlers may connect or disconnect on `signal`; such changes
    /// apply from the next emission on.
    ///
    /// # Panics
    ///
    /// Panics if `signal` is currently mutably borrowed.
    pub fn emit_shared(signal: &RefCell<Self>, args: A) -> E::Output
    where
        E: Emission<A, R>,
    {
        let snapshot = signal.borrow().clone();
        snapshot.emit(args)
    }
}

impl<A: 'static, R: 'static, E: 'static> Signal<A, R, E> {
    /// Connects a free function.
    pub fn connect_fn(&mut self, function: fn(A) -> R) {
        self.connect(Slot::function(function));
    }

    /// Connects `method` bound to `target`.
    pub fn connect_method<T: 'static>(
        &mut self,
        target: &Rc<RefCell<T>>,
        method: fn(&mut T, A) -> R,
    ) {
        self.connect(Slot::method(target, method));
    }

    /// Connects a shared (`&self`) `method` bound to `target`.
    pub fn connect_const_method<T: 'static>(&mut self, target: &Rc<T>, method: fn(&T, A) -> R) {
        self.connect(Slot::const_method(target, method));
    }

    /// Connects `method` on a weakly held `target`.
    ///
    /// A dead or empty `target` (such as `Weak::new()`) is silently ignored.
    pub fn connect_tracked<T: 'static>(
        &mut self,
        target: &Weak<RefCell<T>>,
        method: fn(&mut T, A) -> R,
    ) {
        match Slot::tracked(target, method) {
            Some(slot) => self.connect(slot),
            None => log::debug!("connect_tracked: target already dropped, ignoring"),
        }
    }

    /// Forwards every emission of this signal into `target`.
    ///
    /// The target is held weakly and emitted through a snapshot, like
    /// [`Signal::emit_shared`]. Forwarding a signal into itself is ignored. If
    /// an emission re-enters a forward that is already running (`A -> B -> A`),
    /// that forward is skipped, so forwarding cycles terminate.
    pub fn forward_to(&mut self, target: &Rc<RefCell<Self>>)
    where
        A: Clone,
        E: Emission<A, R, Output = R>,
    {
        let id = SlotId::forward(target);
        if id == SlotId::forward_from(self) {
            log::warn!("refusing to forward a signal into itself");
            return;
        }

        let signal = Rc::downgrade(target);
        let liveness: Weak<dyn Any> = signal.clone();
        let active = Cell::new(false);

        let thunk = move |args: A| -> Option<R> {
            let signal = signal.upgrade()?;
            if active.get() {
                log::warn!("signal forwarding cycle detected; skipping re-entrant forward");
                return None;
            }
            let Ok(snapshot) = signal.try_borrow().map(|signal| signal.clone()) else {
                log::warn!("forward target is mutably borrowed; skipping");
                return None;
            };

            active.set(true);
            let output = snapshot.emit(args);
            active.set(false);
            Some(output)
        };

        self.connect(Slot::from_parts(
            id,
            Some(liveness),
            Rc::new(thunk),
        ));
    }
}

impl<A, R, E> Default for Signal<A, R, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R, E> Clone for Signal<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            _emission: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.slots.clone_from(&source.slots);
    }
}

impl<A, R, E> PartialEq for Signal<A, R, E> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<A, R, E> Eq for Signal<A, R, E> {}

impl<A, R, E> fmt::Debug for Signal<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal").field("slots", &self.slots).finish()
    }
}
