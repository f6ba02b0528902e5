//! Shared fixture for service tests, backed by the in-memory store.

use std::sync::Arc;

use workforce_auth::jwt::{JwtDecoder, JwtEncoder};
use workforce_auth::password::{PasswordHasher, PasswordValidator};
use workforce_auth::rbac::RbacEnforcer;
use workforce_core::config::{Argon2Config, AuthConfig};
use workforce_database::memory::MemoryStore;
use workforce_database::repositories::{AccountRepository, Repositories};
use workforce_entity::account::{Account, CreateAccount, Role};
use workforce_entity::employee::EmployeeView;

use crate::auth::AuthService;
use crate::context::RequestContext;
use crate::department::DepartmentService;
use crate::employee::{EmployeeDirectory, NewEmployee};
use crate::leave::LeaveService;
use crate::salary::SalaryService;
use crate::setting::SettingService;

pub const STRONG_PASSWORD: &str = "Gx7#pLq2!vR9zW";

pub struct Fixture {
    pub repos: Repositories,
    pub hasher: Arc<PasswordHasher>,
    pub encoder: Arc<JwtEncoder>,
    pub auth: AuthService,
    pub directory: Arc<EmployeeDirectory>,
    pub leave: LeaveService,
    pub departments: DepartmentService,
    pub salaries: SalaryService,
    pub settings: SettingService,
}

impl Fixture {
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "service-test-secret".into(),
            argon2: Argon2Config {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            ..AuthConfig::default()
        };
        let repos = Repositories::memory(Arc::new(MemoryStore::new()));
        let hasher = Arc::new(PasswordHasher::new(&config.argon2).unwrap());
        let validator = Arc::new(PasswordValidator::new(&config));
        let rbac = Arc::new(RbacEnforcer);

        let encoder = Arc::new(JwtEncoder::new(&config));
        let auth = AuthService::new(
            repos.accounts.clone(),
            hasher.clone(),
            encoder.clone(),
            Arc::new(JwtDecoder::new(&config)),
        );
        let directory = Arc::new(EmployeeDirectory::new(
            repos.employees.clone(),
            repos.departments.clone(),
            hasher.clone(),
            validator.clone(),
            rbac.clone(),
        ));
        let leave = LeaveService::new(repos.leaves.clone(), directory.clone(), rbac.clone());
        let departments = DepartmentService::new(repos.departments.clone(), rbac.clone());
        let salaries = SalaryService::new(repos.salaries.clone(), directory.clone(), rbac.clone());
        let settings = SettingService::new(repos.accounts.clone(), hasher.clone(), validator);

        Self {
            repos,
            hasher,
            encoder,
            auth,
            directory,
            leave,
            departments,
            salaries,
            settings,
        }
    }

    /// A bare account with no employee profile.
    pub async fn account(&self, email: &str, role: Role) -> Account {
        let password_hash = self.hasher.hash(STRONG_PASSWORD).await.unwrap();
        self.repos
            .accounts
            .create(&CreateAccount {
                email: email.to_string(),
                password_hash,
                name: email.split('@').next().unwrap_or(email).to_string(),
                role,
                profile_image: None,
            })
            .await
            .unwrap()
    }

    pub async fn admin_ctx(&self) -> RequestContext {
        let admin = self.account("admin@example.com", Role::Admin).await;
        RequestContext::new(&admin.identity())
    }

    /// Onboard an employee through the directory and return their context.
    pub async fn employee_ctx(&self, code: &str, email: &str) -> (RequestContext, EmployeeView) {
        let onboarder = self
            .account(&format!("onboard-{code}@example.com"), Role::Admin)
            .await;
        let view = self
            .directory
            .add_employee(
                &RequestContext::new(&onboarder.identity()),
                new_employee(code, email),
            )
            .await
            .unwrap();
        let ctx = RequestContext {
            account_id: view.profile.account_id,
            role: view.role,
            name: view.name.clone(),
            email: view.email.clone(),
            profile_image: view.profile_image.clone(),
            request_time: chrono::Utc::now(),
        };
        (ctx, view)
    }
}

pub fn new_employee(code: &str, email: &str) -> NewEmployee {
    NewEmployee {
        name: format!("Employee {code}"),
        email: email.to_string(),
        password: STRONG_PASSWORD.to_string(),
        role: None,
        employee_code: code.to_string(),
        date_of_birth: None,
        gender: None,
        marital_status: None,
        designation: "Engineer".into(),
        department_id: None,
        salary: 5000.0,
        profile_image: None,
    }
}
