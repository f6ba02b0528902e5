//! # workforce-auth
//!
//! Stateless authentication primitives for Workforce.
//!
//! ## Modules
//!
//! - `jwt`: HS256 access/refresh token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `rbac`: role checks used by the authorization gate and services

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RbacEnforcer;
