//! RBAC enforcement: does a role belong to the set allowed for an operation.

use workforce_core::error::AppError;
use workforce_entity::account::Role;

/// Enforces role membership for gated operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Allows the call only if `role` is one of `allowed`.
    pub fn require_role(&self, role: Role, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' is not permitted to perform this action"
            )))
        }
    }

    /// Allows the call only for admins.
    pub fn require_admin(&self, role: Role) -> Result<(), AppError> {
        self.require_role(role, &[Role::Admin])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_core::ErrorKind;

    #[test]
    fn test_admin_gate() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.require_admin(Role::Admin).is_ok());
        let err = rbac.require_admin(Role::Employee).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_role_set() {
        let rbac = RbacEnforcer::new();
        assert!(
            rbac.require_role(Role::Employee, &[Role::Admin, Role::Employee])
                .is_ok()
        );
        assert!(rbac.require_role(Role::Employee, &[]).is_err());
    }
}
