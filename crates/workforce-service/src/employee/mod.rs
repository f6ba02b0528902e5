//! Employee directory: profile resolution and admin management.

pub mod service;

pub use service::{EmployeeDirectory, NewEmployee};
