//! Employee profile entities.

pub mod model;

pub use model::{CreateEmployee, EmployeeProfile, EmployeeUpdate, EmployeeView};
