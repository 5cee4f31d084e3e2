use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

/// Handle for one scheduled run. Only the most recently scheduled ticket is
/// allowed to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Generation counted debounce: every call to [`Debouncer::schedule`]
/// invalidates all earlier tickets, so after the quiet period only the last
/// keystroke's text comes out of [`Debouncer::fire`].
#[derive(Clone, Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
    latest: Arc<Mutex<Option<String>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self, text: impl Into<String>) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(text.into());
        }
        Ticket(generation)
    }

    pub fn is_pending(&self) -> bool {
        self.latest.lock().map(|l| l.is_some()).unwrap_or(false)
    }

    /// Drops whatever is scheduled without firing it.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut latest) = self.latest.lock() {
            *latest = None;
        }
    }

    pub fn fire(&self, ticket: Ticket) -> Option<String> {
        if self.generation.load(Ordering::SeqCst) != ticket.0 {
            return None;
        }
        self.latest.lock().ok()?.take()
    }
}
