//! Turns every failed request into a user notification
//!
//! Registered on the HTTP client as an interceptor, so no call site has to remember
//! to report errors. The failure itself still reaches the caller.

use crate::config::AuthConfig;
use crate::toast::{ToastKind, ToastOptions, ToastPosition, ToastService};
use portal_http::{ErrorInterceptor, RequestFailure};
use tracing::error;

pub struct ErrorToastRelay {
    toasts: ToastService,
}

impl ErrorToastRelay {
    pub fn new(toasts: ToastService) -> Self {
        Self { toasts }
    }

    /// The notification every failure produces
    pub fn failure_toast() -> ToastOptions {
        ToastOptions::new(AuthConfig::ERROR_TOAST_MESSAGE)
            .kind(ToastKind::Error)
            .position(ToastPosition::Bottom)
            .duration_ms(AuthConfig::ERROR_TOAST_DURATION_MS)
    }
}

impl ErrorInterceptor for ErrorToastRelay {
    fn on_error(&self, failure: &RequestFailure<'_>) {
        error!(
            method = failure.method.map(|m| m.as_str()).unwrap_or("-"),
            path = failure.path(),
            error = %failure.error,
            "An error occurred"
        );
        self.toasts.show_toast(Self::failure_toast());
    }
}
