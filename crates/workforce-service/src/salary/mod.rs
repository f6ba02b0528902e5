//! Salary records.

pub mod service;

pub use service::{NewSalary, SalaryService};
