//! Durable key-value session storage
//!
//! Mirrors the browser storage contract the portal was built around: string keys,
//! string values, last writer wins.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::CoreResult;

/// Key holding the current access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key holding the admin refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Key holding the customer token lifetime in seconds
pub const EXPIRES_IN_KEY: &str = "expiresIn";

/// Every key the session manager writes
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, EXPIRES_IN_KEY];

pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove_item(&self, key: &str) -> CoreResult<()>;
    fn clear(&self) -> CoreResult<()>;
}

// Mock implementation for testing
#[cfg(any(test, feature = "tests"))]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub SessionStore {}

        impl SessionStore for SessionStore {
            fn get_item(&self, key: &str) -> CoreResult<Option<String>>;
            fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;
            fn remove_item(&self, key: &str) -> CoreResult<()>;
            fn clear(&self) -> CoreResult<()>;
        }
    }
}
