//! Identity resolution and permission checks
//!
//! Authorization is by plaintext username lookup, trusting the caller.
//! A username that does not resolve is Unauthenticated (401); a resolved
//! actor without permission is Forbidden (403).

use crate::contract::{Bid, Employee, ProcurementError, Tender};
use crate::domain::repository::{EmployeeRepository, OrganizationRepository};
use std::sync::Arc;
use uuid::Uuid;

/// Read-only identity and permission checker shared by the services
#[derive(Clone)]
pub struct AccessControl {
    employees: Arc<dyn EmployeeRepository>,
    organizations: Arc<dyn OrganizationRepository>,
}

impl AccessControl {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        organizations: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            employees,
            organizations,
        }
    }

    /// Resolve an actor by username. Exact string match - no case-folding,
    /// no trimming.
    pub async fn resolve_by_username(
        &self,
        username: &str,
    ) -> Result<Employee, ProcurementError> {
        if username.is_empty() {
            return Err(ProcurementError::unauthenticated("username is required"));
        }
        self.employees
            .find_by_username(username)
            .await
            .map_err(|_| ProcurementError::Internal)?
            .ok_or_else(|| ProcurementError::unauthenticated("invalid or non-existent user"))
    }

    /// Resolve an actor by employee id
    pub async fn resolve_by_id(&self, id: Uuid) -> Result<Employee, ProcurementError> {
        self.employees
            .find_by_id(id)
            .await
            .map_err(|_| ProcurementError::Internal)?
            .ok_or_else(|| ProcurementError::unauthenticated("user does not exist"))
    }

    /// Whether the employee holds a responsibility grant for the organization
    pub async fn is_responsible_for(
        &self,
        organization_id: Uuid,
        employee_id: Uuid,
    ) -> Result<bool, ProcurementError> {
        self.organizations
            .is_responsible(organization_id, employee_id)
            .await
            .map_err(|_| ProcurementError::Internal)
    }

    /// Forbidden unless the employee is responsible for the organization
    pub async fn require_responsible(
        &self,
        organization_id: Uuid,
        employee_id: Uuid,
        reason: &str,
    ) -> Result<(), ProcurementError> {
        if self.is_responsible_for(organization_id, employee_id).await? {
            Ok(())
        } else {
            Err(ProcurementError::forbidden(reason))
        }
    }
}

/// Tender mutation permission: exact username match against the creator.
/// Deliberately narrower than the organization-responsibility check bids use.
pub fn require_creator(tender: &Tender, username: &str) -> Result<(), ProcurementError> {
    if tender.creator_username == username {
        Ok(())
    } else {
        Err(ProcurementError::forbidden(
            "user is not the creator of this tender",
        ))
    }
}

/// Bid mutation permission: the acting employee must be the author
pub fn require_author(bid: &Bid, employee_id: Uuid) -> Result<(), ProcurementError> {
    if bid.author_id == employee_id {
        Ok(())
    } else {
        Err(ProcurementError::forbidden(
            "user is not the author of this bid",
        ))
    }
}
