//! Minimal publish/subscribe used to announce selection changes.
//!
//! Handlers are registered per event kind and run synchronously, in
//! registration order, every time that kind is triggered. Payloads can
//! also be queued with [`EventNotifier::post`] and delivered later with
//! [`EventNotifier::flush`].

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::SelectError;

/// Handle returned by [`EventNotifier::on`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler<P> = Box<dyn FnMut(&P) -> Result<(), SelectError>>;

/// Registry of event handlers keyed by event kind `K`, all receiving
/// payloads of type `P`.
pub struct EventNotifier<K, P> {
    listeners: FxHashMap<K, Vec<(ListenerId, Handler<P>)>>,
    queued: VecDeque<(K, P)>,
    next_id: u64,
}

impl<K, P> Default for EventNotifier<K, P> {
    fn default() -> Self {
        Self {
            listeners: FxHashMap::default(),
            queued: VecDeque::new(),
            next_id: 0,
        }
    }
}

impl<K, P> fmt::Debug for EventNotifier<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: usize = self.listeners.values().map(Vec::len).sum();
        f.debug_struct("EventNotifier")
            .field("listeners", &listeners)
            .field("queued", &self.queued.len())
            .finish()
    }
}

impl<K, P> EventNotifier<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    pub fn on(
        &mut self,
        kind: K,
        handler: impl FnMut(&P) -> Result<(), SelectError> + 'static,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Unregister a handler. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        for handlers in self.listeners.values_mut() {
            if let Some(pos) = handlers.iter().position(|(h, _)| *h == id) {
                let _ = handlers.remove(pos);
                return true;
            }
        }
        false
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: K) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Run every handler registered for `kind`, in registration order.
    ///
    /// A failing handler does not stop the others; the first error is
    /// returned once all of them have run.
    ///
    /// # Errors
    ///
    /// The first error returned by a handler.
    pub fn trigger(
        &mut self,
        kind: K,
        payload: &P,
    ) -> Result<(), SelectError> {
        let Some(handlers) = self.listeners.get_mut(&kind) else {
            return Ok(());
        };
        let mut first_error = None;
        for (_, handler) in handlers.iter_mut() {
            if let Err(e) = handler(payload) {
                log::warn!("{kind:?} handler failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Queue a payload for delivery on the next [`flush`](Self::flush).
    pub fn post(&mut self, kind: K, payload: P) {
        self.queued.push_back((kind, payload));
    }

    /// Number of queued payloads.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    /// Deliver every queued payload in FIFO order.
    ///
    /// # Errors
    ///
    /// The first handler error across all deliveries; the queue is always
    /// drained.
    pub fn flush(&mut self) -> Result<(), SelectError> {
        let mut first_error = None;
        while let Some((kind, payload)) = self.queued.pop_front() {
            if let Err(e) = self.trigger(kind, &payload) {
                let _ = first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Ping,
        Pong,
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = EventNotifier::<Kind, u32>::new();
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            let _ = notifier.on(Kind::Ping, move |n| {
                log.borrow_mut().push(format!("{tag}:{n}"));
                Ok(())
            });
        }

        notifier.trigger(Kind::Ping, &7).unwrap();
        assert_eq!(*log.borrow(), vec!["first:7", "second:7"]);
    }

    #[test]
    fn trigger_without_handlers_is_a_no_op() {
        let mut notifier = EventNotifier::<Kind, u32>::new();
        assert!(notifier.trigger(Kind::Pong, &1).is_ok());
    }

    #[test]
    fn failure_does_not_skip_later_handlers() {
        let calls = Rc::new(RefCell::new(0));
        let mut notifier = EventNotifier::<Kind, ()>::new();
        let _ = notifier.on(Kind::Ping, |()| {
            Err(SelectError::listener("ping", "first"))
        });
        let _ = notifier.on(Kind::Ping, |()| {
            Err(SelectError::listener("ping", "second"))
        });
        let counter = Rc::clone(&calls);
        let _ = notifier.on(Kind::Ping, move |()| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        let err = notifier.trigger(Kind::Ping, &()).unwrap_err();
        assert!(err.to_string().contains("first"));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn off_removes_only_that_handler() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = EventNotifier::<Kind, ()>::new();
        let a = Rc::clone(&calls);
        let first = notifier.on(Kind::Ping, move |()| {
            a.borrow_mut().push("a");
            Ok(())
        });
        let b = Rc::clone(&calls);
        let _ = notifier.on(Kind::Ping, move |()| {
            b.borrow_mut().push("b");
            Ok(())
        });

        assert!(notifier.off(first));
        assert!(!notifier.off(first));
        notifier.trigger(Kind::Ping, &()).unwrap();
        assert_eq!(*calls.borrow(), vec!["b"]);
        assert_eq!(notifier.listener_count(Kind::Ping), 1);
    }

    #[test]
    fn posted_payloads_wait_for_flush() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = EventNotifier::<Kind, u32>::new();
        let sink = Rc::clone(&seen);
        let _ = notifier.on(Kind::Pong, move |n| {
            sink.borrow_mut().push(*n);
            Ok(())
        });

        notifier.post(Kind::Pong, 1);
        notifier.post(Kind::Ping, 2);
        notifier.post(Kind::Pong, 3);
        assert!(seen.borrow().is_empty());
        assert_eq!(notifier.pending(), 3);

        notifier.flush().unwrap();
        assert_eq!(*seen.borrow(), vec![1, 3]);
        assert_eq!(notifier.pending(), 0);
    }
}
