use std::cell::RefCell;

use crate::event::{EditorEvent, EventHandler};

/// Fans map changes out to subscribers, in subscription order.
///
/// Lives inside the editor context, so commands emit through a shared reference.
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.subscribers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Events raised from inside a handler are dropped with a warning.
    pub fn emit(&self, event: EditorEvent) {
        let Ok(mut subscribers) = self.subscribers.try_borrow_mut() else {
            log::warn!("Dropping {:?} emitted during dispatch", event);
            return;
        };
        for subscriber in subscribers.iter_mut() {
            subscriber.handle_event(&event);
        }
    }
}

/// Subscribers stay with the original; a copied editor context starts unobserved.
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventBus({} subscribers)", self.handler_count())
    }
}
