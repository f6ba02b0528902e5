//! # workforce-service
//!
//! Business logic service layer for Workforce. Each service orchestrates
//! repositories and auth primitives to implement one application use case
//! family, and receives the caller as an explicit [`RequestContext`].
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod department;
pub mod employee;
pub mod leave;
pub mod salary;
pub mod setting;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthService, LoginResult};
pub use context::RequestContext;
pub use department::DepartmentService;
pub use employee::{EmployeeDirectory, NewEmployee};
pub use leave::{LeaveQuery, LeaveService, NewLeave};
pub use salary::{NewSalary, SalaryService};
pub use setting::SettingService;
