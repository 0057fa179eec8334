//! Zero-payload completion signals.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A subscribable zero-payload signal.
///
/// Clones share the subscriber list, so the engine can hand a clone to a
/// host callback and emit from there. Emission snapshots the subscriber
/// list first; a subscriber may re-enter the component (e.g. dispose it)
/// without invalidating the iteration.
#[derive(Clone, Default)]
pub struct CompletionSignal {
    subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl CompletionSignal {
    /// Create a signal with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every emission.
    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Invoke all current subscribers.
    pub fn emit(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> = self.subscribers.borrow().clone();
        for subscriber in snapshot {
            subscriber();
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let signal = CompletionSignal::new();
        let count = Rc::new(RefCell::new(0));

        for _ in 0..3 {
            let count = Rc::clone(&count);
            signal.subscribe(move || *count.borrow_mut() += 1);
        }

        signal.emit();
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let signal = CompletionSignal::new();
        let fired = Rc::new(RefCell::new(false));

        let clone = signal.clone();
        let flag = Rc::clone(&fired);
        clone.subscribe(move || *flag.borrow_mut() = true);

        signal.emit();
        assert!(*fired.borrow());
    }

    #[test]
    fn test_subscriber_may_reenter() {
        let signal = CompletionSignal::new();
        let reentrant = signal.clone();
        // Subscribing from inside an emission must not panic.
        signal.subscribe(move || reentrant.subscribe(|| {}));

        signal.emit();
        assert_eq!(signal.subscriber_count(), 2);
    }
}
