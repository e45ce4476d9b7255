//! Append-only registries for frame hooks and input callbacks.
//!
//! Both lists hand out the slot index on `add`. Removing a slot never shifts
//! the others: the entry is emptied in place and behaves as a no-op from then
//! on, so every index handed out earlier stays valid for the list's lifetime.

type Hook = Box<dyn FnMut()>;
type Callback<E> = Box<dyn FnMut(&E) -> bool>;

/// Zero-argument actions run at a fixed point of the frame.
pub struct HookList {
    slots: Vec<Option<Hook>>,
}

impl HookList {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn add(&mut self, hook: impl FnMut() + 'static) -> usize {
        let index = self.slots.len();
        self.slots.push(Some(Box::new(hook)));
        index
    }

    /// Turns the hook at `index` into a no-op. Returns false when `index` was
    /// never handed out by this list.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Runs every live hook in registration order.
    pub fn run_all(&mut self) {
        for hook in self.slots.iter_mut().flatten() {
            hook();
        }
    }

    /// Number of slots ever handed out, removed ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for HookList {
    fn default() -> Self {
        Self::new()
    }
}

/// Input predicates that report whether they consumed an event of type `E`.
pub struct CallbackList<E> {
    slots: Vec<Option<Callback<E>>>,
}

impl<E> CallbackList<E> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn add(&mut self, callback: impl FnMut(&E) -> bool + 'static) -> usize {
        let index = self.slots.len();
        self.slots.push(Some(Box::new(callback)));
        index
    }

    /// A removed callback never consumes anything.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Offers `event` to each callback in registration order and stops at the
    /// first one that consumes it, returning that callback's index.
    pub fn offer(&mut self, event: &E) -> Option<usize> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(callback) = slot {
                if callback(event) {
                    return Some(index);
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<E> Default for CallbackList<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn add_returns_strictly_increasing_indices() {
        let mut hooks = HookList::new();
        assert!(hooks.is_empty());
        let a = hooks.add(|| {});
        let b = hooks.add(|| {});
        let c = hooks.add(|| {});
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(hooks.len(), 3);
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookList::new();
        for tag in ["first", "second", "third"] {
            let order = order.clone();
            hooks.add(move || order.borrow_mut().push(tag));
        }
        hooks.run_all();
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn removed_hook_becomes_no_op() {
        let hits = Rc::new(Cell::new(0));
        let mut hooks = HookList::new();
        let counter = hits.clone();
        let index = hooks.add(move || counter.set(counter.get() + 1));

        hooks.run_all();
        assert!(hooks.remove(index));
        hooks.run_all();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn remove_keeps_later_indices_stable() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookList::new();
        let mut indices = Vec::new();
        for tag in 0..3 {
            let order = order.clone();
            indices.push(hooks.add(move || order.borrow_mut().push(tag)));
        }
        assert!(hooks.remove(indices[0]));
        assert_eq!(hooks.len(), 3);

        // A new hook still gets a fresh index past the removed slot.
        let order_late = order.clone();
        assert_eq!(hooks.add(move || order_late.borrow_mut().push(3)), 3);

        assert!(hooks.remove(indices[2]));
        hooks.run_all();
        assert_eq!(*order.borrow(), vec![1, 3]);
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut hooks = HookList::new();
        assert!(!hooks.remove(0));
        hooks.add(|| {});
        assert!(!hooks.remove(1));
        assert!(!hooks.remove(usize::MAX));
    }

    #[test]
    fn removing_twice_still_succeeds() {
        let mut hooks = HookList::new();
        let index = hooks.add(|| {});
        assert!(hooks.remove(index));
        assert!(hooks.remove(index));
    }

    #[test]
    fn offer_stops_at_first_consumer() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks: CallbackList<u32> = CallbackList::new();
        for (tag, consumes) in [("a", false), ("b", true), ("c", true)] {
            let seen = seen.clone();
            callbacks.add(move |_: &u32| {
                seen.borrow_mut().push(tag);
                consumes
            });
        }
        assert_eq!(callbacks.offer(&7), Some(1));
        assert_eq!(*seen.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn offer_passes_event_through() {
        let mut callbacks: CallbackList<u32> = CallbackList::new();
        callbacks.add(|value: &u32| *value == 42);
        assert_eq!(callbacks.offer(&41), None);
        assert_eq!(callbacks.offer(&42), Some(0));
    }

    #[test]
    fn removed_callback_never_consumes() {
        let mut callbacks: CallbackList<()> = CallbackList::new();
        let greedy = callbacks.add(|_| true);
        let fallback = callbacks.add(|_| true);
        assert_eq!(callbacks.offer(&()), Some(greedy));

        assert!(callbacks.remove(greedy));
        assert_eq!(callbacks.offer(&()), Some(fallback));

        assert!(callbacks.remove(fallback));
        assert_eq!(callbacks.offer(&()), None);
        assert_eq!(callbacks.len(), 2);
    }

    #[test]
    fn callback_remove_out_of_range_fails() {
        let mut callbacks: CallbackList<()> = CallbackList::default();
        assert!(callbacks.is_empty());
        assert!(!callbacks.remove(0));
    }
}
