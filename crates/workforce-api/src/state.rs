//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use workforce_auth::jwt::{JwtDecoder, JwtEncoder};
use workforce_auth::password::{PasswordHasher, PasswordValidator};
use workforce_auth::rbac::RbacEnforcer;
use workforce_core::config::AppConfig;
use workforce_core::error::AppError;
use workforce_database::repositories::Repositories;
use workforce_service::{
    AuthService, DepartmentService, EmployeeDirectory, LeaveService, SalaryService,
    SettingService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Persistence ──────────────────────────────────────────
    /// Repository handles (PostgreSQL or in-memory)
    pub repos: Repositories,

    // ── Services ─────────────────────────────────────────────
    /// Login, verification, refresh
    pub auth_service: Arc<AuthService>,
    /// Employee directory
    pub employee_directory: Arc<EmployeeDirectory>,
    /// Leave request engine
    pub leave_service: Arc<LeaveService>,
    /// Department administration
    pub department_service: Arc<DepartmentService>,
    /// Salary records
    pub salary_service: Arc<SalaryService>,
    /// Account settings
    pub setting_service: Arc<SettingService>,
}

impl AppState {
    /// Wires every service on top of the given repositories.
    pub fn new(config: AppConfig, repos: Repositories) -> Result<Self, AppError> {
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth.argon2)?);
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let rbac_enforcer = Arc::new(RbacEnforcer);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repos.accounts),
            Arc::clone(&password_hasher),
            jwt_encoder,
            jwt_decoder,
        ));
        let employee_directory = Arc::new(EmployeeDirectory::new(
            Arc::clone(&repos.employees),
            Arc::clone(&repos.departments),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            Arc::clone(&rbac_enforcer),
        ));
        let leave_service = Arc::new(LeaveService::new(
            Arc::clone(&repos.leaves),
            Arc::clone(&employee_directory),
            Arc::clone(&rbac_enforcer),
        ));
        let department_service = Arc::new(DepartmentService::new(
            Arc::clone(&repos.departments),
            Arc::clone(&rbac_enforcer),
        ));
        let salary_service = Arc::new(SalaryService::new(
            Arc::clone(&repos.salaries),
            Arc::clone(&employee_directory),
            Arc::clone(&rbac_enforcer),
        ));
        let setting_service = Arc::new(SettingService::new(
            Arc::clone(&repos.accounts),
            password_hasher,
            password_validator,
        ));

        Ok(Self {
            config: Arc::new(config),
            repos,
            auth_service,
            employee_directory,
            leave_service,
            department_service,
            salary_service,
            setting_service,
        })
    }
}
