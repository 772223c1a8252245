use serde::{Deserialize, Serialize};

/// Admin username/password pair sent to `POST /users/token`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /vouchers/customers/login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerAuthBody {
    pub pin: String,
}

/// Body of `POST /users/token/refresh`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshBody {
    pub refresh: String,
}

/// Token pair returned by the admin login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
}

/// Customer login result. Customers never receive a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerAuthResponse {
    pub access: String,
    /// Lifetime of the access token in seconds
    pub expires_in: u64,
}

/// Result of a token refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResult {
    pub access: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Internal,
    Company,
}

/// Admin profile returned by `GET /users/profile`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminProfile {
    pub user: ProfileUser,
    pub internal_user_profile: InternalUserProfile,
    pub company_user_profile: CompanyUserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUser {
    pub username: String,
    pub role: UserRole,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InternalUserProfile {
    pub is_super_admin: bool,
    pub is_scope_admin: bool,
    pub is_accountant: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyUserProfile {
    pub is_owner: bool,
}

impl AdminProfile {
    /// Full display name, falling back to the username when both parts are blank
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.user.first_name, self.user.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.user.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Tokens currently held in session storage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<String>,
}

impl StoredSession {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.expires_in.is_none()
    }
}
