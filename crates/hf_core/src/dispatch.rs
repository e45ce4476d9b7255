//! Routes translated input events to registered callbacks.
//!
//! The GUI layer always sees the raw event first (the caller forwards it
//! before calling `dispatch`). The dispatcher then honours the GUI's capture
//! flags: a captured category never reaches the registered callbacks.

use crate::hooks::CallbackList;
use crate::input::{
    CharEvent, InputCategory, InputEvent, KeyEvent, MouseButtonEvent, ScrollEvent,
};

/// Capture intent reported by the GUI layer for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capture {
    pub pointer: bool,
    pub keyboard: bool,
}

impl Capture {
    pub fn claims(self, category: InputCategory) -> bool {
        match category {
            InputCategory::Pointer => self.pointer,
            InputCategory::Keyboard => self.keyboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The GUI claimed the category; no callback ran.
    Captured,
    /// The callback at `index` consumed the event.
    Consumed { index: usize },
    /// Every callback ran and none consumed the event.
    Unhandled,
}

#[derive(Default)]
pub struct InputDispatcher {
    pub mouse_button: CallbackList<MouseButtonEvent>,
    pub scroll: CallbackList<ScrollEvent>,
    pub key: CallbackList<KeyEvent>,
    pub character: CallbackList<CharEvent>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, event: &InputEvent, capture: Capture) -> DispatchOutcome {
        if capture.claims(event.category()) {
            log::trace!("{:?} captured by GUI", event);
            return DispatchOutcome::Captured;
        }

        let consumed_by = match event {
            InputEvent::MouseButton(e) => self.mouse_button.offer(e),
            InputEvent::Scroll(e) => self.scroll.offer(e),
            InputEvent::Key(e) => self.key.offer(e),
            InputEvent::Char(e) => self.character.offer(e),
        };

        match consumed_by {
            Some(index) => {
                log::trace!("{:?} consumed by callback {}", event, index);
                DispatchOutcome::Consumed { index }
            }
            None => DispatchOutcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonAction, Key, KeyAction, Modifiers, MouseButton, ScrollUnit};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn click() -> InputEvent {
        InputEvent::MouseButton(MouseButtonEvent {
            button: MouseButton::Left,
            action: ButtonAction::Press,
            modifiers: Modifiers::default(),
        })
    }

    fn scroll() -> InputEvent {
        InputEvent::Scroll(ScrollEvent {
            x: 0.0,
            y: 1.0,
            unit: ScrollUnit::Lines,
        })
    }

    fn key_press(key: Key) -> InputEvent {
        InputEvent::Key(KeyEvent {
            key,
            scancode: None,
            action: KeyAction::Press,
            modifiers: Modifiers::default(),
        })
    }

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        (hits.clone(), hits)
    }

    #[test]
    fn pointer_capture_blocks_mouse_and_scroll_callbacks() {
        let mut dispatcher = InputDispatcher::new();
        let (hits, seen) = counter();
        dispatcher.mouse_button.add(move |_| {
            hits.set(hits.get() + 1);
            true
        });
        let (scroll_hits, scroll_seen) = counter();
        dispatcher.scroll.add(move |_| {
            scroll_hits.set(scroll_hits.get() + 1);
            true
        });

        let capture = Capture {
            pointer: true,
            keyboard: false,
        };
        assert_eq!(dispatcher.dispatch(&click(), capture), DispatchOutcome::Captured);
        assert_eq!(dispatcher.dispatch(&scroll(), capture), DispatchOutcome::Captured);
        assert_eq!(seen.get(), 0);
        assert_eq!(scroll_seen.get(), 0);
    }

    #[test]
    fn keyboard_capture_blocks_key_and_char_callbacks() {
        let mut dispatcher = InputDispatcher::new();
        let (hits, seen) = counter();
        dispatcher.key.add(move |_| {
            hits.set(hits.get() + 1);
            false
        });
        let (char_hits, char_seen) = counter();
        dispatcher.character.add(move |_| {
            char_hits.set(char_hits.get() + 1);
            false
        });

        let capture = Capture {
            pointer: false,
            keyboard: true,
        };
        let typed = InputEvent::Char(CharEvent { ch: 'q' });
        assert_eq!(
            dispatcher.dispatch(&key_press(Key::Q), capture),
            DispatchOutcome::Captured
        );
        assert_eq!(dispatcher.dispatch(&typed, capture), DispatchOutcome::Captured);
        assert_eq!(seen.get(), 0);
        assert_eq!(char_seen.get(), 0);
    }

    #[test]
    fn capture_of_one_category_leaves_the_other_alone() {
        let mut dispatcher = InputDispatcher::new();
        dispatcher.key.add(|_| true);
        dispatcher.mouse_button.add(|_| true);

        let pointer_only = Capture {
            pointer: true,
            keyboard: false,
        };
        assert_eq!(
            dispatcher.dispatch(&key_press(Key::Space), pointer_only),
            DispatchOutcome::Consumed { index: 0 }
        );

        let keyboard_only = Capture {
            pointer: false,
            keyboard: true,
        };
        assert_eq!(
            dispatcher.dispatch(&click(), keyboard_only),
            DispatchOutcome::Consumed { index: 0 }
        );
    }

    #[test]
    fn first_consumer_halts_dispatch() {
        let mut dispatcher = InputDispatcher::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (tag, consumes) in [(0, false), (1, true), (2, true)] {
            let order = order.clone();
            dispatcher.mouse_button.add(move |_| {
                order.borrow_mut().push(tag);
                consumes
            });
        }

        let outcome = dispatcher.dispatch(&click(), Capture::default());
        assert_eq!(outcome, DispatchOutcome::Consumed { index: 1 });
        assert_eq!(*order.borrow(), vec![0, 1]);
    }

    #[test]
    fn unhandled_when_nobody_consumes() {
        let mut dispatcher = InputDispatcher::new();
        let (hits, seen) = counter();
        dispatcher.scroll.add(move |event| {
            hits.set(hits.get() + 1);
            event.y > 10.0
        });
        assert_eq!(
            dispatcher.dispatch(&scroll(), Capture::default()),
            DispatchOutcome::Unhandled
        );
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn events_only_reach_their_own_list() {
        let mut dispatcher = InputDispatcher::new();
        let (hits, seen) = counter();
        dispatcher.key.add(move |_| {
            hits.set(hits.get() + 1);
            true
        });
        assert_eq!(
            dispatcher.dispatch(&click(), Capture::default()),
            DispatchOutcome::Unhandled
        );
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn removing_a_key_callback_leaves_scroll_callbacks_intact() {
        let mut dispatcher = InputDispatcher::new();
        let key_index = dispatcher.key.add(|_| true);
        dispatcher.scroll.add(|_| true);

        assert!(dispatcher.key.remove(key_index));
        assert_eq!(
            dispatcher.dispatch(&key_press(Key::A), Capture::default()),
            DispatchOutcome::Unhandled
        );
        assert_eq!(
            dispatcher.dispatch(&scroll(), Capture::default()),
            DispatchOutcome::Consumed { index: 0 }
        );
    }

    #[test]
    fn capture_claims_matches_flags() {
        let none = Capture::default();
        assert!(!none.claims(InputCategory::Pointer));
        assert!(!none.claims(InputCategory::Keyboard));
        let both = Capture {
            pointer: true,
            keyboard: true,
        };
        assert!(both.claims(InputCategory::Pointer));
        assert!(both.claims(InputCategory::Keyboard));
    }
}
