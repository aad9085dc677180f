//! Stable error codes for host-facing notifications.
//!
//! Every error enum in the crate implements [`ErrorCode`] so the host can
//! show a dismissible notification with a machine-readable code next to the
//! human message, and decide whether to offer a retry.

/// Trait for errors that carry a stable code string.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Render an error the way the host's notification surface shows it.
#[must_use]
pub fn notification(err: &(impl ErrorCode + ?Sized)) -> String {
    format!("[{}] {err}", err.error_code())
}
