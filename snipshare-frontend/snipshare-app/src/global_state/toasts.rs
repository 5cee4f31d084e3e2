#[cfg(feature = "csr")]
use leptos::leptos_dom::helpers::set_timeout;

use leptos::prelude::*;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub level: ToastLevel,
}

/// Transient notices such as "copied to clipboard".
#[derive(Clone, Copy, Debug)]
pub struct Toasts(pub RwSignal<Vec<Toast>>);

pub fn use_toast() -> Option<Toasts> {
    use_context::<Toasts>()
}

impl Toasts {
    pub fn add(&self, message: impl Into<String>, level: ToastLevel, duration: Option<u64>) {
        let id = Uuid::new_v4();
        let toast = Toast {
            id,
            message: message.into(),
            level,
        };
        self.0.update(|toasts| toasts.push(toast));

        if let Some(duration) = duration {
            cfg_if::cfg_if! {
                if #[cfg(feature = "csr")] {
                    let toasts = *self;
                    set_timeout(
                        move || toasts.remove(id),
                        std::time::Duration::from_millis(duration),
                    );
                } else {
                    log::debug!("toast {id} stays until closed ({duration}ms requested)");
                }
            }
        }
    }

    pub fn remove(&self, id: Uuid) {
        self.0.update(|toasts| {
            if let Some(index) = toasts.iter().position(|t| t.id == id) {
                toasts.remove(index);
            }
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(message, ToastLevel::Success, Some(3000));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(message, ToastLevel::Error, Some(5000));
    }
}

/// Shows `message` as a toast when a toast container exists, otherwise falls
/// back to a blocking browser alert. Spawned tasks have no owner, so the
/// context is passed in rather than looked up.
pub fn notify(toasts: Option<Toasts>, level: ToastLevel, message: impl Into<String>) {
    let message = message.into();
    match toasts {
        Some(toasts) => match level {
            ToastLevel::Success => toasts.success(message),
            ToastLevel::Error => toasts.error(message),
        },
        None => crate::browser::alert(&message),
    }
}
