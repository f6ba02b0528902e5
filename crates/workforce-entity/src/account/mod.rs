//! Login account entities.

pub mod model;
pub mod role;

pub use model::{Account, AccountIdentity, CreateAccount};
pub use role::Role;
