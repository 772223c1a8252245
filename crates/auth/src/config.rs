//! Fixed texts and limits used by the login flows

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Notification shown for any failed request
    pub const ERROR_TOAST_MESSAGE: &'static str =
        "An unexpected error occurred. Please try again later.";

    /// How long the failure notification stays up
    pub const ERROR_TOAST_DURATION_MS: u64 = 5_000;

    /// Default notification lifetime
    pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

    /// Notifications buffered per subscriber before the oldest are dropped
    pub const TOAST_CHANNEL_CAPACITY: usize = 32;

    /// Inline message after a failed admin login
    pub const ADMIN_LOGIN_FAILED: &'static str =
        "Login failed. Please check your username and password.";

    /// Inline message after a failed customer login
    pub const CUSTOMER_LOGIN_FAILED: &'static str = "Login failed. Please check your PIN.";
}
