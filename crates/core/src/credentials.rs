//! Local validation of login input
//!
//! Nothing in here touches the network. A credential that fails these checks is
//! never submitted.

use crate::types::{CustomerAuthBody, LoginCredentials};
use thiserror::Error;

/// Minimum admin password length accepted before submission
pub const MIN_PASSWORD_LEN: usize = 6;

/// Customer PIN length
pub const PIN_LENGTH: usize = 16;

/// Input rejected before any request was made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username is required")]
    UsernameRequired,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("PIN must be exactly {PIN_LENGTH} digits")]
    InvalidPin,
}

/// Check admin credentials before submission
pub fn validate_admin_credentials(credentials: &LoginCredentials) -> Result<(), ValidationError> {
    if credentials.username.trim().is_empty() {
        return Err(ValidationError::UsernameRequired);
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Per-keystroke PIN filter: letters and digits are accepted while typing.
///
/// This is looser than [`CustomerPin::parse`], which only accepts digits. Both
/// checks are kept as the portal has always applied them.
pub fn pin_char_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Apply the keystroke filter to raw input, capped at [`PIN_LENGTH`] characters
pub fn filter_pin_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| pin_char_allowed(*c))
        .take(PIN_LENGTH)
        .collect()
}

/// A customer PIN that passed the submit-time check
#[derive(Clone, PartialEq, Eq)]
pub struct CustomerPin(String);

impl CustomerPin {
    /// Submit-time check: exactly 16 ASCII digits
    pub fn parse(pin: &str) -> Result<Self, ValidationError> {
        if pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(pin.to_string()))
        } else {
            Err(ValidationError::InvalidPin)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_body(&self) -> CustomerAuthBody {
        CustomerAuthBody {
            pin: self.0.clone(),
        }
    }
}

impl std::fmt::Debug for CustomerPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomerPin(<redacted>)")
    }
}
