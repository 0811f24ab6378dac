//! Employee directory service

use crate::contract::{Employee, ProcurementError};
use crate::domain::repository::EmployeeRepository;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { employees }
    }

    /// Create an employee. Usernames are unique; a taken username is a
    /// Validation error rather than a conflict, matching the rest of the
    /// API surface.
    pub async fn create(
        &self,
        username: String,
        first_name: String,
        last_name: String,
    ) -> Result<Employee, ProcurementError> {
        if username.is_empty() {
            return Err(ProcurementError::validation("username cannot be empty"));
        }

        let taken = self
            .employees
            .find_by_username(&username)
            .await
            .map_err(|_| ProcurementError::Internal)?
            .is_some();
        if taken {
            return Err(ProcurementError::validation("username is already taken"));
        }

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            username,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        };

        self.employees
            .insert(&employee)
            .await
            .map_err(|_| ProcurementError::Internal)
    }
}
