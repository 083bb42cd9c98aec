//! One-shot completion callback shared between a host call and its handler.

use std::cell::RefCell;
use std::rc::Rc;

/// Holds a completion callback until exactly one party completes it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) struct CallbackSlot<F>(Rc<RefCell<Option<F>>>);

impl<F> Clone for CallbackSlot<F> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl<F> CallbackSlot<F> {
    pub(crate) fn new(callback: F) -> Self {
        Self(Rc::new(RefCell::new(Some(callback))))
    }

    /// Invoke the callback with `value` unless it already ran.
    /// Returns whether this call ran it.
    pub(crate) fn complete<T>(&self, value: Option<T>) -> bool
    where
        F: FnOnce(Option<T>),
    {
        let callback = self.0.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_slot() -> (CallbackSlot<impl FnOnce(Option<u8>)>, Rc<RefCell<Vec<Option<u8>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (CallbackSlot::new(move |value| sink.borrow_mut().push(value)), seen)
    }

    #[test]
    fn handler_result_wins_over_later_failure() {
        let (slot, seen) = recording_slot();
        let handler = slot.clone();
        assert!(handler.complete(Some(7)));
        assert!(!slot.complete(None::<u8>));
        assert_eq!(*seen.borrow(), vec![Some(7)]);
    }

    #[test]
    fn failed_call_reports_none() {
        let (slot, seen) = recording_slot();
        let handler = slot.clone();
        assert!(slot.complete(None::<u8>));
        assert!(!handler.complete(Some(1)));
        assert_eq!(*seen.borrow(), vec![None]);
    }
}
