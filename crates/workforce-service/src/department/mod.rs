//! Department administration.

pub mod service;

pub use service::DepartmentService;
