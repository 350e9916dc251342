use storeguard_core::errors::{ComplianceError, ComplianceResult};
use storeguard_core::models::{Actor, Role};

/// Engine operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAudit,
    UpdateAudit,
    StartAudit,
    SubmitAudit,
    ApproveAudit,
    RejectAudit,
    AddAuditItems,
    UpdateAuditItem,
    ViewAudits,
    ViewCertificates,
    ManageCertificates,
    ManageAssignments,
}

/// Per-operation capability sets.
///
/// Roles are plain membership sets here; there is no numeric hierarchy
/// to compare against. EXEC reads everything and mutates nothing.
pub fn allowed_roles(operation: Operation) -> &'static [Role] {
    use Role::*;
    match operation {
        Operation::CreateAudit => &[OpsManager, PropertyCoordinator],
        Operation::UpdateAudit => &[OpsManager, PropertyCoordinator],
        Operation::StartAudit => &[PropertyCoordinator],
        Operation::SubmitAudit => &[PropertyCoordinator],
        Operation::ApproveAudit => &[OpsManager],
        Operation::RejectAudit => &[OpsManager],
        Operation::AddAuditItems => &[OpsManager, PropertyCoordinator],
        Operation::UpdateAuditItem => &[OpsManager, PropertyCoordinator],
        Operation::ViewAudits => &[Store, PropertyCoordinator, OpsManager, Exec],
        Operation::ViewCertificates => &[Store, PropertyCoordinator, OpsManager, Exec],
        Operation::ManageCertificates => &[OpsManager, PropertyCoordinator],
        Operation::ManageAssignments => &[OpsManager],
    }
}

pub fn is_allowed(role: Role, operation: Operation) -> bool {
    allowed_roles(operation).contains(&role)
}

/// Fail closed: Forbidden unless the actor's role holds the capability.
pub fn require(actor: &Actor, operation: Operation) -> ComplianceResult<()> {
    if is_allowed(actor.role, operation) {
        Ok(())
    } else {
        Err(ComplianceError::forbidden(format!(
            "role {} may not perform {:?}",
            actor.role, operation
        )))
    }
}
