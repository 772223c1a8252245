//! Transient user notifications
//!
//! The service only resolves and broadcasts notifications. Rendering them is up to
//! whoever subscribes.

use crate::config::AuthConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Coarse placement requested by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalPosition {
    Start,
    Center,
    End,
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPosition {
    Top,
    #[default]
    Bottom,
}

/// What a caller asks for; unset fields take the service defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastOptions {
    pub message: String,
    pub kind: Option<ToastKind>,
    pub position: Option<ToastPosition>,
    pub duration_ms: Option<u64>,
    pub action: Option<String>,
    pub horizontal: Option<HorizontalPosition>,
    pub vertical: Option<VerticalPosition>,
}

impl ToastOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// A notification with every default applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub action: Option<String>,
    pub duration: Duration,
    pub horizontal: HorizontalPosition,
    pub vertical: VerticalPosition,
    /// Style class, `toast-<kind>`
    pub class: String,
}

impl From<ToastOptions> for Toast {
    fn from(options: ToastOptions) -> Self {
        let kind = options.kind.unwrap_or_default();
        let vertical = options.vertical.unwrap_or(match options.position {
            Some(ToastPosition::Top) => VerticalPosition::Top,
            _ => VerticalPosition::Bottom,
        });

        Self {
            message: options.message,
            kind,
            action: options.action,
            duration: Duration::from_millis(
                options
                    .duration_ms
                    .unwrap_or(AuthConfig::DEFAULT_TOAST_DURATION_MS),
            ),
            horizontal: options.horizontal.unwrap_or_default(),
            vertical,
            class: format!("toast-{}", kind.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Show(Toast),
    Dismiss,
}

/// Broadcasts notifications to any number of listeners
#[derive(Clone)]
pub struct ToastService {
    tx: broadcast::Sender<ToastEvent>,
}

impl ToastService {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(AuthConfig::TOAST_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.tx.subscribe()
    }

    /// Resolve defaults and broadcast the notification
    pub fn show_toast(&self, options: ToastOptions) -> Toast {
        let toast = Toast::from(options);
        debug!(kind = toast.kind.as_str(), message = %toast.message, "Showing toast");
        // No listener is not an error
        let _ = self.tx.send(ToastEvent::Show(toast.clone()));
        toast
    }

    /// Dismiss whatever notification is showing
    pub fn hide_toast(&self) {
        let _ = self.tx.send(ToastEvent::Dismiss);
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let toast = Toast::from(ToastOptions::new("Saved"));
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.duration, Duration::from_millis(3_000));
        assert_eq!(toast.horizontal, HorizontalPosition::Right);
        assert_eq!(toast.vertical, VerticalPosition::Bottom);
        assert_eq!(toast.class, "toast-info");
    }

    #[test]
    fn position_top_maps_to_vertical_top() {
        let toast = Toast::from(
            ToastOptions::new("Heads up")
                .kind(ToastKind::Warning)
                .position(ToastPosition::Top),
        );
        assert_eq!(toast.vertical, VerticalPosition::Top);
        assert_eq!(toast.class, "toast-warning");
    }

    #[test]
    fn explicit_vertical_wins_over_position() {
        let mut options = ToastOptions::new("x").position(ToastPosition::Top);
        options.vertical = Some(VerticalPosition::Bottom);
        assert_eq!(Toast::from(options).vertical, VerticalPosition::Bottom);
    }

    #[tokio::test]
    async fn subscribers_receive_show_and_dismiss() {
        let toasts = ToastService::new();
        let mut rx = toasts.subscribe();

        toasts.show_toast(ToastOptions::new("Done").kind(ToastKind::Success).action("Undo"));
        toasts.hide_toast();

        match rx.recv().await.unwrap() {
            ToastEvent::Show(toast) => {
                assert_eq!(toast.message, "Done");
                assert_eq!(toast.action.as_deref(), Some("Undo"));
            }
            ToastEvent::Dismiss => panic!("expected a toast first"),
        }
        assert_eq!(rx.recv().await.unwrap(), ToastEvent::Dismiss);
    }

    #[test]
    fn showing_without_listeners_is_fine() {
        let toast = ToastService::new().show_toast(ToastOptions::new("nobody home"));
        assert_eq!(toast.message, "nobody home");
    }
}
