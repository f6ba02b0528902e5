//! Salary record entities.

pub mod model;

pub use model::{CreateSalary, SalaryRecord, SalaryView};
