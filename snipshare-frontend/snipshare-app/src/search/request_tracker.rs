use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

type CancelHook = Box<dyn FnOnce() + Send + Sync>;

/// Cancellation flag shared between whoever issued an operation and the
/// operation itself. Hooks registered with [`CancelToken::on_cancel`] run once,
/// when the token is cancelled.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    hooks: Arc<Mutex<Vec<CancelHook>>>,
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let hooks = self
            .hooks
            .lock()
            .map(|mut hooks| std::mem::take(&mut *hooks))
            .unwrap_or_default();
        for hook in hooks {
            hook();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Runs `hook` on cancellation, or right away if that already happened.
    pub fn on_cancel(&self, hook: impl FnOnce() + Send + Sync + 'static) {
        if self.is_cancelled() {
            hook();
            return;
        }
        match self.hooks.lock() {
            Ok(mut hooks) => hooks.push(Box::new(hook)),
            Err(_) => hook(),
        }
    }
}

/// Identity of one issued request: the exact url plus a sequence number so two
/// identical urls issued back to back are still told apart.
#[derive(Clone, Debug)]
pub struct RequestToken {
    pub url: String,
    seq: u64,
    cancel: CancelToken,
}

impl RequestToken {
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}

/// Keeps track of the single authoritative request.
#[derive(Clone, Default)]
pub struct RequestTracker {
    next_seq: Arc<AtomicU64>,
    current: Arc<Mutex<Option<RequestToken>>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new request, cancelling whatever was in flight before it.
    pub fn issue(&self, url: impl Into<String>) -> RequestToken {
        let token = RequestToken {
            url: url.into(),
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            cancel: CancelToken::new(),
        };
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(token.clone()) {
                log::debug!("superseding request {}", previous.url);
                previous.cancel.cancel();
            }
        }
        token
    }

    /// Marks `token` finished. Returns whether it was still authoritative, in
    /// which case the tracker goes back to idle.
    pub fn complete(&self, token: &RequestToken) -> bool {
        let Ok(mut current) = self.current.lock() else {
            return false;
        };
        let is_current = current
            .as_ref()
            .is_some_and(|c| c.seq == token.seq && c.url == token.url);
        if is_current {
            *current = None;
        }
        is_current
    }

    /// Drops the authoritative request, e.g. when the query was cleared.
    pub fn reset(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.cancel.cancel();
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.current.lock().map(|c| c.is_some()).unwrap_or(false)
    }
}
