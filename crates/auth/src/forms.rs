//! Login attempt state for the admin and customer forms
//!
//! `Idle -> Submitting -> Success | Failed`. Local validation runs first and a
//! rejected form never reaches `Submitting`. A failed form can be resubmitted.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::services::{AuthService, CustomerAuthService};
use portal_core::credentials::{
    PIN_LENGTH, filter_pin_input, pin_char_allowed, validate_admin_credentials,
};
use portal_core::{AuthResponse, CustomerAuthResponse, CustomerPin, LoginCredentials};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Status and inline message shared by both forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginAttempt {
    status: LoginStatus,
    error: Option<String>,
}

impl LoginAttempt {
    pub fn status(&self) -> LoginStatus {
        self.status
    }

    /// Inline error message to show next to the form
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoginStatus::Submitting
    }

    fn reject(&mut self, message: String) {
        self.status = LoginStatus::Idle;
        self.error = Some(message);
    }

    fn begin(&mut self) {
        self.status = LoginStatus::Submitting;
        self.error = None;
    }

    fn finish<T>(
        &mut self,
        result: Result<T, AuthError>,
        failed_message: &str,
    ) -> Result<T, AuthError> {
        match result {
            Ok(value) => {
                self.status = LoginStatus::Success;
                Ok(value)
            }
            Err(error) => {
                warn!(detail = %error.detail(), "Login failed");
                self.status = LoginStatus::Failed;
                self.error = Some(failed_message.to_string());
                Err(error)
            }
        }
    }
}

// No Debug on the forms: they hold credentials in plain text.
#[derive(Clone, Default)]
pub struct AdminLoginForm {
    pub username: String,
    pub password: String,
    attempt: LoginAttempt,
}

impl AdminLoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            attempt: LoginAttempt::default(),
        }
    }

    pub fn attempt(&self) -> &LoginAttempt {
        &self.attempt
    }

    pub async fn submit(&mut self, service: &AuthService) -> Result<AuthResponse, AuthError> {
        let credentials = LoginCredentials::new(self.username.clone(), self.password.clone());
        if let Err(e) = validate_admin_credentials(&credentials) {
            self.attempt.reject(e.to_string());
            return Err(e.into());
        }

        self.attempt.begin();
        let result = service.login(&credentials).await;
        self.attempt.finish(result, AuthConfig::ADMIN_LOGIN_FAILED)
    }
}

#[derive(Clone, Default)]
pub struct CustomerLoginForm {
    pin: String,
    attempt: LoginAttempt,
}

impl CustomerLoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the PIN with `raw`, keeping only characters the keystroke filter allows
    pub fn set_pin(&mut self, raw: &str) {
        self.pin = filter_pin_input(raw);
    }

    /// Append one typed character; returns whether it was accepted
    pub fn type_char(&mut self, c: char) -> bool {
        if pin_char_allowed(c) && self.pin.len() < PIN_LENGTH {
            self.pin.push(c);
            true
        } else {
            false
        }
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn attempt(&self) -> &LoginAttempt {
        &self.attempt
    }

    pub async fn submit(
        &mut self,
        service: &CustomerAuthService,
    ) -> Result<CustomerAuthResponse, AuthError> {
        let pin = match CustomerPin::parse(&self.pin) {
            Ok(pin) => pin,
            Err(e) => {
                self.attempt.reject(e.to_string());
                return Err(e.into());
            }
        };

        self.attempt.begin();
        let result = service.login(&pin).await;
        self.attempt.finish(result, AuthConfig::CUSTOMER_LOGIN_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_filters_and_caps_pin() {
        let mut form = CustomerLoginForm::new();
        assert!(form.type_char('1'));
        assert!(form.type_char('a'));
        assert!(!form.type_char('-'));
        assert_eq!(form.pin(), "1a");

        form.set_pin("9999 8888 7777 6666 5555");
        assert_eq!(form.pin(), "9999888877776666");
        assert!(!form.type_char('1'));
    }

    #[test]
    fn failed_attempt_keeps_message() {
        let mut attempt = LoginAttempt::default();
        attempt.begin();
        assert!(attempt.is_loading());

        let result: Result<(), AuthError> = attempt.finish(
            Err(AuthError::NotAuthenticated),
            AuthConfig::ADMIN_LOGIN_FAILED,
        );
        assert!(result.is_err());
        assert_eq!(attempt.status(), LoginStatus::Failed);
        assert_eq!(attempt.error(), Some(AuthConfig::ADMIN_LOGIN_FAILED));

        attempt.begin();
        assert_eq!(attempt.error(), None);
    }
}
