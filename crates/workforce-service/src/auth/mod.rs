//! Authentication: credential checks and token issuance/verification.

pub mod service;

pub use service::{AuthService, LoginResult};
