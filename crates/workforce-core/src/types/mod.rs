//! Core type definitions shared across the Workforce workspace.

pub mod id;
pub mod pagination;

pub use id::*;
pub use pagination::{PageMeta, PageRequest, PageResponse};
