//! Login flows, session storage and error notifications for the voucher portal

pub mod config;
pub mod context;
pub mod error;
pub mod forms;
pub mod relay;
pub mod services;
pub mod session;
pub mod toast;

pub use config::AuthConfig;
pub use context::PortalContext;
pub use error::AuthError;
pub use forms::{AdminLoginForm, CustomerLoginForm, LoginAttempt, LoginStatus};
pub use relay::ErrorToastRelay;
pub use services::{AuthService, CustomerAuthService, ProfileService};
pub use session::SessionManager;
pub use toast::{Toast, ToastEvent, ToastKind, ToastOptions, ToastPosition, ToastService};
