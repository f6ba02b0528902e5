//! Leave request lifecycle.

pub mod service;

pub use service::{LeaveQuery, LeaveService, NewLeave};
