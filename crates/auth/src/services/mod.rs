pub mod auth;
pub mod customer;
pub mod profile;

pub use auth::AuthService;
pub use customer::CustomerAuthService;
pub use profile::ProfileService;
