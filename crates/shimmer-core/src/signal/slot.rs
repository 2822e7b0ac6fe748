//! Type-erased slots and the identities used to compare them.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identity of a connected callable.
///
/// Two slots are equal iff they would invoke the same function on the same
/// target, so a descriptor built from `(object, method)` matches structurally
/// rather than by effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    /// A free function, identified by its address.
    ///
    /// The compiler may merge functions with identical bodies, in which case
    /// two distinct functions share an address and compare equal.
    Function(usize),
    /// A method bound to an object, identified by method and object address.
    Method { method: usize, target: usize },
    /// Forwarding into another signal, identified by that signal's address.
    Forward(usize),
}

fn address<T: ?Sized>(ptr: *const T) -> usize {
    ptr.cast::<()>() as usize
}

impl SlotId {
    /// Identity of a free function slot.
    ///
    /// Distinct functions with identical bodies may compare equal; see
    /// [`SlotId::Function`].
    pub fn function<A, R>(function: fn(A) -> R) -> Self {
        Self::Function(function as usize)
    }

    /// Identity of a mutable method bound to `target`.
    pub fn method<T, A, R>(target: &Rc<RefCell<T>>, method: fn(&mut T, A) -> R) -> Self {
        Self::Method {
            method: method as usize,
            target: address(Rc::as_ptr(target)),
        }
    }

    /// Identity of a shared (`&self`) method bound to `target`.
    pub fn const_method<T, A, R>(target: &Rc<T>, method: fn(&T, A) -> R) -> Self {
        Self::Method {
            method: method as usize,
            target: address(Rc::as_ptr(target)),
        }
    }

    /// Identity of a tracked method slot.
    ///
    /// Equal to [`SlotId::method`] for the same object, so a strongly held
    /// handle can be used to disconnect a tracked slot and vice versa.
    pub fn tracked<T, A, R>(target: &Weak<RefCell<T>>, method: fn(&mut T, A) -> R) -> Self {
        Self::Method {
            method: method as usize,
            target: address(Weak::as_ptr(target)),
        }
    }

    /// Identity of a forward into the signal stored in `target`.
    ///
    /// Built from the address of the signal itself, so it matches
    /// [`SlotId::forward_from`] called on the same signal.
    pub fn forward<S>(target: &Rc<RefCell<S>>) -> Self {
        Self::Forward(address(target.as_ptr().cast_const()))
    }

    /// Identity of a forward into `signal`.
    pub fn forward_from<S>(signal: &S) -> Self {
        Self::Forward(address(signal as *const S))
    }
}

/// A single connected callable of a signal.
///
/// Slots are cheap to clone: clones share the same invocation thunk. The thunk
/// returns `None` when the slot was skipped (its tracked target is gone, its
/// object is already borrowed, or a forwarding cycle was cut).
pub struct Slot<A, R> {
    id: SlotId,
    tracked: Option<Weak<dyn Any>>,
    thunk: Rc<dyn Fn(A) -> Option<R>>,
}

impl<A: 'static, R: 'static> Slot<A, R> {
    /// A slot calling a free function.
    pub fn function(function: fn(A) -> R) -> Self {
        Self {
            id: SlotId::function(function),
            tracked: None,
            thunk: Rc::new(move |args| Some(function(args))),
        }
    }

    /// A slot calling `method` on `target`.
    ///
    /// The slot keeps `target` alive until it is disconnected.
    pub fn method<T: 'static>(target: &Rc<RefCell<T>>, method: fn(&mut T, A) -> R) -> Self {
        let object = Rc::clone(target);
        Self {
            id: SlotId::method(target, method),
            tracked: None,
            thunk: Rc::new(move |args| {
                let Ok(mut object) = object.try_borrow_mut() else {
                    log::warn!("slot target is already borrowed; skipping re-entrant call");
                    return None;
                };
                Some(method(&mut object, args))
            }),
        }
    }

    /// A slot calling a shared (`&self`) method on `target`.
    pub fn const_method<T: 'static>(target: &Rc<T>, method: fn(&T, A) -> R) -> Self {
        let object = Rc::clone(target);
        Self {
            id: SlotId::const_method(target, method),
            tracked: None,
            thunk: Rc::new(move |args| Some(method(&object, args))),
        }
    }

    /// A slot calling `method` on a weakly held `target`.
    ///
    /// Returns `None` when `target` is already dead (including `Weak::new()`),
    /// which is how a connection to a null object is expressed. Once the
    /// target is dropped the slot is skipped on emission.
    pub fn tracked<T: 'static>(
        target: &Weak<RefCell<T>>,
        method: fn(&mut T, A) -> R,
    ) -> Option<Self> {
        if target.strong_count() == 0 {
            return None;
        }

        let liveness: Weak<dyn Any> = target.clone();
        let object = Weak::clone(target);
        Some(Self {
            id: SlotId::tracked(target, method),
            tracked: Some(liveness),
            thunk: Rc::new(move |args| {
                let object = object.upgrade()?;
                let Ok(mut object) = object.try_borrow_mut() else {
                    log::warn!("slot target is already borrowed; skipping re-entrant call");
                    return None;
                };
                Some(method(&mut object, args))
            }),
        })
    }
}

impl<A, R> Slot<A, R> {
    pub(crate) fn from_parts(
        id: SlotId,
        tracked: Option<Weak<dyn Any>>,
        thunk: Rc<dyn Fn(A) -> Option<R>>,
    ) -> Self {
        Self { id, tracked, thunk }
    }

    /// Returns this slot's identity.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Returns false once a tracked target has been dropped.
    pub fn is_live(&self) -> bool {
        self.tracked
            .as_ref()
            .map_or(true, |target| target.strong_count() > 0)
    }

    /// Invokes the slot, returning `None` if it was skipped.
    pub fn call(&self, args: A) -> Option<R> {
        (self.thunk)(args)
    }
}

impl<A, R> Clone for Slot<A, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tracked: self.tracked.clone(),
            thunk: Rc::clone(&self.thunk),
        }
    }
}

impl<A, R> PartialEq for Slot<A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A, R> Eq for Slot<A, R> {}

impl<A, R> fmt::Debug for Slot<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish_non_exhaustive()
    }
}

impl<A, R> From<&Slot<A, R>> for SlotId {
    fn from(slot: &Slot<A, R>) -> Self {
        slot.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        hits: u32,
    }

    impl Counter {
        fn bump(&mut self, by: u32) -> u32 {
            self.hits += by;
            self.hits
        }

        fn reset(&mut self, _: u32) -> u32 {
            self.hits = 0;
            0
        }

        fn peek(&self, _: u32) -> u32 {
            self.hits
        }
    }

    fn double(x: u32) -> u32 {
        x * 2
    }

    fn triple(x: u32) -> u32 {
        x * 3
    }

    #[test]
    fn test_function_identity() {
        assert_eq!(
            Slot::function(double).id(),
            SlotId::function(double as fn(u32) -> u32)
        );
        assert_ne!(Slot::function(double), Slot::function(triple));
        assert_eq!(Slot::function(double).call(4), Some(8));
    }

    #[test]
    fn test_method_identity_depends_on_target_and_method() {
        let a = Rc::new(RefCell::new(Counter { hits: 0 }));
        let b = Rc::new(RefCell::new(Counter { hits: 0 }));

        assert_eq!(Slot::method(&a, Counter::bump), Slot::method(&a, Counter::bump));
        assert_ne!(Slot::method(&a, Counter::bump), Slot::method(&b, Counter::bump));
        assert_ne!(Slot::method(&a, Counter::bump), Slot::method(&a, Counter::reset));
    }

    #[test]
    fn test_method_call_mutates_target() {
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
        let slot = Slot::method(&counter, Counter::bump);

        assert_eq!(slot.call(2), Some(2));
        assert_eq!(slot.call(3), Some(5));
        assert_eq!(counter.borrow().hits, 5);
    }

    #[test]
    fn test_const_method() {
        let counter = Rc::new(Counter { hits: 7 });
        let slot = Slot::const_method(&counter, Counter::peek);
        assert_eq!(slot.call(0), Some(7));
    }

    #[test]
    fn test_borrowed_target_is_skipped() {
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
        let slot = Slot::method(&counter, Counter::bump);

        let _guard = counter.borrow_mut();
        assert_eq!(slot.call(1), None);
    }

    #[test]
    fn test_tracked_slot_dies_with_target() {
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
        let slot = Slot::tracked(&Rc::downgrade(&counter), Counter::bump).expect("live target");

        assert!(slot.is_live());
        assert_eq!(slot.call(1), Some(1));
        assert_eq!(slot.id(), SlotId::method(&counter, Counter::bump));

        drop(counter);
        assert!(!slot.is_live());
        assert_eq!(slot.call(1), None);
    }

    #[test]
    fn test_tracked_slot_rejects_dead_target() {
        let empty: Weak<RefCell<Counter>> = Weak::new();
        assert!(Slot::tracked(&empty, Counter::bump).is_none());
    }

    #[test]
    fn test_clone_shares_thunk() {
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
        let slot = Slot::method(&counter, Counter::bump);
        let copy = slot.clone();

        slot.call(1);
        copy.call(1);
        assert_eq!(counter.borrow().hits, 2);
        assert_eq!(slot, copy);
    }
}
