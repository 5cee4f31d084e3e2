use std::{error, fmt::Display, sync::Arc};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum AppError {
    #[error("System error {0}")]
    SystemError(#[from] SystemError),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Request was superseded by a newer one")]
    Cancelled,
    #[error("Element #{0} is missing from the page")]
    MissingElement(String),
    #[error("Browser api unavailable: {0}")]
    BrowserApi(String),
}

/// Wraps the library errors that are not `Clone` so `AppError` can be shared
/// between signals.
#[derive(Clone, Debug)]
pub enum SystemError {
    GlooError(Arc<gloo_net::Error>),
    SerdeJson(Arc<serde_json::Error>),
}

impl From<gloo_net::Error> for SystemError {
    fn from(value: gloo_net::Error) -> Self {
        Self::GlooError(Arc::new(value))
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(value: gloo_net::Error) -> Self {
        Self::SystemError(value.into())
    }
}

impl From<serde_json::Error> for SystemError {
    fn from(value: serde_json::Error) -> Self {
        Self::SerdeJson(Arc::new(value))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::SystemError(value.into())
    }
}

impl From<wasm_bindgen::JsValue> for AppError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::BrowserApi(format!("{value:?}"))
    }
}

impl Display for SystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemError::GlooError(g) => write!(f, "{}", g),
            SystemError::SerdeJson(json) => write!(f, "{}", json),
        }
    }
}

impl error::Error for SystemError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            SystemError::GlooError(gloo) => Some(gloo.as_ref()),
            SystemError::SerdeJson(json) => Some(json.as_ref()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod test {
    use super::{AppError, SystemError};
    use std::error::Error;

    #[test]
    fn json_errors_become_system_errors() {
        let json_error = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let expected = json_error.to_string();
        let error = AppError::from(json_error);
        assert!(matches!(
            error,
            AppError::SystemError(SystemError::SerdeJson(_))
        ));
        assert_eq!(error.to_string(), format!("System error {expected}"));
        let AppError::SystemError(system) = &error else {
            unreachable!()
        };
        assert!(system.source().is_some());
    }

    #[test]
    fn gloo_errors_keep_their_message() {
        let error = AppError::from(gloo_net::Error::GlooError("offline".to_string()));
        assert!(matches!(
            error,
            AppError::SystemError(SystemError::GlooError(_))
        ));
        assert_eq!(error.to_string(), "System error offline");
    }
}
