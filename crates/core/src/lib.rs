//! Portal core types and utilities

pub mod config;
pub mod credentials;
pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "tests"))]
pub mod tests;

pub use crate::config::{ApiConfig, PortalConfig, SessionConfig};
pub use credentials::{CustomerPin, ValidationError};
pub use error::{CoreError, CoreResult};
pub use storage::{FileStore, MemoryStore, SessionStore};
pub use types::{
    AdminProfile, AuthResponse, CustomerAuthBody, CustomerAuthResponse, LoginCredentials,
    RefreshBody, RefreshResult, StoredSession, UserRole,
};
