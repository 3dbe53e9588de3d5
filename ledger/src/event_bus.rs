//! In-process fan-out of committed events.

use dims_types::SequencedEvent;

type Listener = Box<dyn Fn(&SequencedEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the submitting thread once the commit is
/// visible.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &SequencedEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
