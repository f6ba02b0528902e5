//! Repository traits and their PostgreSQL implementations.

pub mod account;
pub mod department;
pub mod employee;
pub mod leave;
pub mod salary;

use std::sync::Arc;

use sqlx::PgPool;

pub use account::{AccountRepository, PgAccountRepository};
pub use department::{DepartmentRepository, PgDepartmentRepository};
pub use employee::{EmployeeRepository, PgEmployeeRepository};
pub use leave::{LeaveRepository, PgLeaveRepository};
pub use salary::{PgSalaryRepository, SalaryRepository};

use crate::memory::MemoryStore;

/// One handle per repository, shared by every service.
#[derive(Clone)]
pub struct Repositories {
    /// Accounts (credential store).
    pub accounts: Arc<dyn AccountRepository>,
    /// Employee profiles.
    pub employees: Arc<dyn EmployeeRepository>,
    /// Departments.
    pub departments: Arc<dyn DepartmentRepository>,
    /// Leave requests.
    pub leaves: Arc<dyn LeaveRepository>,
    /// Salary records.
    pub salaries: Arc<dyn SalaryRepository>,
}

impl Repositories {
    /// Repositories backed by a PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            employees: Arc::new(PgEmployeeRepository::new(pool.clone())),
            departments: Arc::new(PgDepartmentRepository::new(pool.clone())),
            leaves: Arc::new(PgLeaveRepository::new(pool.clone())),
            salaries: Arc::new(PgSalaryRepository::new(pool)),
        }
    }

    /// Repositories sharing one process-local store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            accounts: store.clone(),
            employees: store.clone(),
            departments: store.clone(),
            leaves: store.clone(),
            salaries: store,
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
