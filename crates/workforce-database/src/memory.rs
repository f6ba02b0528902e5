//! Process-local implementation of every repository, backed by `dashmap`.
//!
//! Used by the test-suite and by `database.provider = "memory"`. Reads go
//! straight to the maps; every write that must check-then-insert runs under
//! a single writer lock so uniqueness and overlap rules hold under
//! concurrency.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use workforce_core::error::AppError;
use workforce_core::result::AppResult;
use workforce_core::types::pagination::{PageRequest, PageResponse};
use workforce_core::types::{AccountId, DepartmentId, EmployeeId, LeaveId, SalaryId};
use workforce_entity::account::{Account, CreateAccount};
use workforce_entity::department::{Department, DepartmentInput};
use workforce_entity::employee::{CreateEmployee, EmployeeProfile, EmployeeUpdate, EmployeeView};
use workforce_entity::leave::{
    CreateLeave, LeaveDecision, LeaveFilter, LeaveRequest, LeaveStatus, LeaveView,
};
use workforce_entity::salary::{CreateSalary, SalaryRecord, SalaryView};

use crate::repositories::{
    AccountRepository, DepartmentRepository, EmployeeRepository, LeaveRepository,
    SalaryRepository,
};

/// In-memory tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: DashMap<AccountId, Account>,
    employees: DashMap<EmployeeId, EmployeeProfile>,
    departments: DashMap<DepartmentId, Department>,
    leaves: DashMap<LeaveId, LeaveRequest>,
    salaries: DashMap<SalaryId, SalaryRecord>,
    writer: Mutex<()>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_account(&self, data: &CreateAccount) -> AppResult<Account> {
        if self.accounts.iter().any(|a| a.email == data.email) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }
        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            role: data.role,
            profile_image: data.profile_image.clone(),
            created_at: now,
            updated_at: now,
        };
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    fn department_exists(&self, id: Option<DepartmentId>) -> bool {
        id.is_none_or(|id| self.departments.contains_key(&id))
    }

    fn employee_view(&self, profile: EmployeeProfile) -> AppResult<EmployeeView> {
        let account = self
            .accounts
            .get(&profile.account_id)
            .map(|a| a.clone())
            .ok_or_else(|| {
                AppError::internal(format!("Employee {} has no account", profile.id))
            })?;
        let department_name = profile
            .department_id
            .and_then(|id| self.departments.get(&id).map(|d| d.name.clone()));
        Ok(EmployeeView {
            profile,
            name: account.name,
            email: account.email,
            role: account.role,
            profile_image: account.profile_image,
            department_name,
        })
    }

    fn leave_view(&self, leave: LeaveRequest) -> AppResult<LeaveView> {
        let profile = self
            .employees
            .get(&leave.employee_id)
            .map(|e| e.clone())
            .ok_or_else(|| AppError::internal(format!("Leave {} has no employee", leave.id)))?;
        let employee = self.employee_view(profile)?;
        Ok(LeaveView {
            leave,
            account_id: employee.profile.account_id,
            employee_code: employee.profile.employee_code,
            employee_name: employee.name,
            employee_email: employee.email,
            designation: employee.profile.designation,
            profile_image: employee.profile_image,
            department_name: employee.department_name,
        })
    }

    fn sorted_views<I>(&self, profiles: I) -> AppResult<Vec<EmployeeView>>
    where
        I: IntoIterator<Item = EmployeeProfile>,
    {
        let mut profiles: Vec<EmployeeProfile> = profiles.into_iter().collect();
        profiles.sort_by_key(|p| Reverse((p.created_at, p.id.into_uuid())));
        profiles
            .into_iter()
            .map(|p| self.employee_view(p))
            .collect()
    }
}

fn newest_first(leaves: &mut [LeaveRequest]) {
    leaves.sort_by_key(|l| Reverse((l.created_at, l.id.into_uuid())));
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.clone()))
    }

    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let _guard = self.writer.lock().await;
        self.insert_account(data)
    }

    async fn update_password(&self, id: AccountId, password_hash: &str) -> AppResult<()> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.password_hash = password_hash.to_string();
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let mut all: Vec<Account> = self.accounts.iter().map(|a| a.clone()).collect();
        all.sort_by_key(|a| a.created_at);
        Ok(all)
    }
}

#[async_trait]
impl DepartmentRepository for MemoryStore {
    async fn create(&self, data: &DepartmentInput) -> AppResult<Department> {
        let _guard = self.writer.lock().await;
        if self.departments.iter().any(|d| d.name == data.name) {
            return Err(AppError::conflict(format!(
                "Department '{}' already exists",
                data.name
            )));
        }
        let now = Utc::now();
        let department = Department {
            id: DepartmentId::new(),
            name: data.name.clone(),
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.departments.insert(department.id, department.clone());
        Ok(department)
    }

    async fn find_by_id(&self, id: DepartmentId) -> AppResult<Option<Department>> {
        Ok(self.departments.get(&id).map(|d| d.clone()))
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        let mut all: Vec<Department> = self.departments.iter().map(|d| d.clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, id: DepartmentId, data: &DepartmentInput) -> AppResult<Department> {
        let _guard = self.writer.lock().await;
        if self
            .departments
            .iter()
            .any(|d| d.id != id && d.name == data.name)
        {
            return Err(AppError::conflict(format!(
                "Department '{}' already exists",
                data.name
            )));
        }
        let mut department = self
            .departments
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))?;
        department.name = data.name.clone();
        department.description = data.description.clone();
        department.updated_at = Utc::now();
        Ok(department.clone())
    }

    async fn delete(&self, id: DepartmentId) -> AppResult<bool> {
        let _guard = self.writer.lock().await;
        if self.departments.remove(&id).is_none() {
            return Ok(false);
        }
        for mut profile in self.employees.iter_mut() {
            if profile.department_id == Some(id) {
                profile.department_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn create(&self, data: &CreateEmployee) -> AppResult<EmployeeView> {
        let _guard = self.writer.lock().await;
        if self
            .employees
            .iter()
            .any(|e| e.employee_code == data.employee_code)
        {
            return Err(AppError::conflict("Employee code is already in use"));
        }
        if !self.department_exists(data.department_id) {
            return Err(AppError::validation("Department does not exist"));
        }
        let account = self.insert_account(&data.account)?;
        let now = Utc::now();
        let profile = EmployeeProfile {
            id: EmployeeId::new(),
            account_id: account.id,
            employee_code: data.employee_code.clone(),
            date_of_birth: data.date_of_birth,
            gender: data.gender.clone(),
            marital_status: data.marital_status.clone(),
            designation: data.designation.clone(),
            department_id: data.department_id,
            salary: data.salary,
            created_at: now,
            updated_at: now,
        };
        self.employees.insert(profile.id, profile.clone());
        self.employee_view(profile)
    }

    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<EmployeeProfile>> {
        Ok(self.employees.get(&id).map(|e| e.clone()))
    }

    async fn find_by_account(&self, account_id: AccountId) -> AppResult<Option<EmployeeProfile>> {
        Ok(self
            .employees
            .iter()
            .find(|e| e.account_id == account_id)
            .map(|e| e.clone()))
    }

    async fn find_view(&self, id: EmployeeId) -> AppResult<Option<EmployeeView>> {
        let profile = self.employees.get(&id).map(|e| e.clone());
        profile.map(|p| self.employee_view(p)).transpose()
    }

    async fn list(&self) -> AppResult<Vec<EmployeeView>> {
        let profiles: Vec<EmployeeProfile> = self.employees.iter().map(|e| e.clone()).collect();
        self.sorted_views(profiles)
    }

    async fn list_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<EmployeeView>> {
        let profiles: Vec<EmployeeProfile> = self
            .employees
            .iter()
            .filter(|e| e.department_id == Some(department_id))
            .map(|e| e.clone())
            .collect();
        self.sorted_views(profiles)
    }

    async fn update(&self, id: EmployeeId, data: &EmployeeUpdate) -> AppResult<EmployeeView> {
        let _guard = self.writer.lock().await;
        if !self.department_exists(data.department_id) {
            return Err(AppError::validation("Department does not exist"));
        }
        let now = Utc::now();
        let profile = {
            let mut profile = self
                .employees
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
            if let Some(marital_status) = &data.marital_status {
                profile.marital_status = Some(marital_status.clone());
            }
            if let Some(designation) = &data.designation {
                profile.designation = designation.clone();
            }
            if let Some(department_id) = data.department_id {
                profile.department_id = Some(department_id);
            }
            if let Some(salary) = data.salary {
                profile.salary = salary;
            }
            profile.updated_at = now;
            profile.clone()
        };
        if data.name.is_some() || data.role.is_some() {
            if let Some(mut account) = self.accounts.get_mut(&profile.account_id) {
                if let Some(name) = &data.name {
                    account.name = name.clone();
                }
                if let Some(role) = data.role {
                    account.role = role;
                }
                account.updated_at = now;
            }
        }
        self.employee_view(profile)
    }

    async fn delete(&self, id: EmployeeId) -> AppResult<bool> {
        let _guard = self.writer.lock().await;
        if self.employees.remove(&id).is_none() {
            return Ok(false);
        }
        self.leaves.retain(|_, l| l.employee_id != id);
        self.salaries.retain(|_, s| s.employee_id != id);
        Ok(true)
    }
}

#[async_trait]
impl LeaveRepository for MemoryStore {
    async fn create(&self, data: &CreateLeave) -> AppResult<LeaveRequest> {
        let _guard = self.writer.lock().await;
        if !self.employees.contains_key(&data.employee_id) {
            return Err(AppError::not_found(format!(
                "Employee {} not found",
                data.employee_id
            )));
        }
        let overlapping = self.leaves.iter().any(|l| {
            l.employee_id == data.employee_id
                && l.status.blocks_dates()
                && l.overlaps(data.start_date, data.end_date)
        });
        if overlapping {
            return Err(AppError::conflict(
                "Leave request overlaps an existing pending or approved request",
            ));
        }
        let now = Utc::now();
        let leave = LeaveRequest {
            id: LeaveId::new(),
            employee_id: data.employee_id,
            leave_type: data.leave_type,
            start_date: data.start_date,
            end_date: data.end_date,
            reason: data.reason.clone(),
            status: LeaveStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.leaves.insert(leave.id, leave.clone());
        Ok(leave)
    }

    async fn find_view(&self, id: LeaveId) -> AppResult<Option<LeaveView>> {
        let leave = self.leaves.get(&id).map(|l| l.clone());
        leave.map(|l| self.leave_view(l)).transpose()
    }

    async fn list_for_employee(
        &self,
        employee_id: EmployeeId,
        filter: &LeaveFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LeaveRequest>> {
        let mut matching: Vec<LeaveRequest> = self
            .leaves
            .iter()
            .filter(|l| l.employee_id == employee_id && filter.matches(l))
            .map(|l| l.clone())
            .collect();
        newest_first(&mut matching);
        Ok(PageResponse::from_full(matching, page))
    }

    async fn list_all(&self) -> AppResult<Vec<LeaveView>> {
        let mut all: Vec<LeaveRequest> = self.leaves.iter().map(|l| l.clone()).collect();
        newest_first(&mut all);
        all.into_iter().map(|l| self.leave_view(l)).collect()
    }

    async fn decide(&self, id: LeaveId, decision: LeaveDecision) -> AppResult<LeaveRequest> {
        let mut leave = self
            .leaves
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Leave request {id} not found")))?;
        if !leave.status.accepts(decision) {
            debug!(leave_id = %id, status = %leave.status, decision = decision.verb(), "Decision refused");
            return Err(AppError::conflict(format!(
                "Leave request is already {} and cannot be changed",
                leave.status
            )));
        }
        leave.status = decision.target();
        leave.updated_at = Utc::now();
        Ok(leave.clone())
    }
}

#[async_trait]
impl SalaryRepository for MemoryStore {
    async fn create(&self, data: &CreateSalary) -> AppResult<SalaryRecord> {
        if !self.employees.contains_key(&data.employee_id) {
            return Err(AppError::not_found(format!(
                "Employee {} not found",
                data.employee_id
            )));
        }
        let record = SalaryRecord {
            id: SalaryId::new(),
            employee_id: data.employee_id,
            basic_salary: data.basic_salary,
            allowances: data.allowances,
            deductions: data.deductions,
            net_salary: data.net_salary(),
            pay_date: data.pay_date,
            created_at: Utc::now(),
        };
        self.salaries.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_for_employee(&self, employee_id: EmployeeId) -> AppResult<Vec<SalaryView>> {
        let Some(employee) = self.employees.get(&employee_id).map(|e| e.clone()) else {
            return Ok(Vec::new());
        };
        let name = self
            .accounts
            .get(&employee.account_id)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        let mut records: Vec<SalaryRecord> = self
            .salaries
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .map(|s| s.clone())
            .collect();
        records.sort_by_key(|s| Reverse((s.pay_date, s.created_at)));
        Ok(records
            .into_iter()
            .map(|record| SalaryView {
                record,
                employee_code: employee.employee_code.clone(),
                employee_name: name.clone(),
            })
            .collect())
    }
}
