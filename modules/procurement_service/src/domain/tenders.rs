//! Tender lifecycle service
//!
//! Content edits (name/description/serviceType) and rollbacks go through the
//! revision engine and bump the version; status transitions are persisted
//! directly and are not versioned.

use crate::contract::{ProcurementError, Tender, TenderStatus};
use crate::domain::auth::{require_creator, AccessControl};
use crate::domain::repository::TenderRepository;
use crate::domain::{revision, validation};
use std::sync::Arc;
use uuid::Uuid;

/// Fields accepted when creating a tender
#[derive(Debug, Clone)]
pub struct CreateTender {
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub organization_id: Uuid,
    pub creator_username: String,
}

/// Partial update - absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TenderPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
}

pub struct TenderService {
    tenders: Arc<dyn TenderRepository>,
    access: AccessControl,
}

impl TenderService {
    pub fn new(tenders: Arc<dyn TenderRepository>, access: AccessControl) -> Self {
        Self { tenders, access }
    }

    /// Create a tender at version 1, status Created.
    ///
    /// The creator must exist (401) and be responsible for the owning
    /// organization (403).
    pub async fn create(&self, req: CreateTender) -> Result<Tender, ProcurementError> {
        if req.creator_username.is_empty() {
            return Err(ProcurementError::validation(
                "creatorUsername cannot be empty",
            ));
        }
        let service_type = validation::parse_service_type(&req.service_type)?;

        let employee = self.access.resolve_by_username(&req.creator_username).await?;
        self.access
            .require_responsible(
                req.organization_id,
                employee.id,
                "user is not responsible for the organization",
            )
            .await?;

        let tender = Tender::new(
            req.name,
            req.description,
            service_type,
            req.organization_id,
            req.creator_username,
        );

        let created = self
            .tenders
            .insert(&tender)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        tracing::debug!(tender_id = %created.id, "tender created");
        Ok(created)
    }

    /// List tenders ordered by name, optionally filtered by service type
    pub async fn list(
        &self,
        service_types: &[String],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>, ProcurementError> {
        let mut filters = Vec::with_capacity(service_types.len());
        for raw in service_types {
            filters.push(validation::parse_service_type(raw)?);
        }

        self.tenders
            .list(&filters, limit, offset)
            .await
            .map_err(|_| ProcurementError::Internal)
    }

    /// List the caller's own tenders. An unknown username is 401; a known
    /// user with no tenders is 404, surfacing "nothing exists yet"
    /// distinctly from "not authorized".
    pub async fn list_my(
        &self,
        username: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>, ProcurementError> {
        if username.is_empty() {
            return Err(ProcurementError::validation(
                "username parameter cannot be empty",
            ));
        }
        let employee = self.access.resolve_by_username(username).await?;

        let tenders = self
            .tenders
            .list_by_creator(&employee.username, limit, offset)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        if tenders.is_empty() {
            return Err(ProcurementError::not_found("tenders for user", username));
        }
        Ok(tenders)
    }

    /// Snapshot-then-patch edit; creator only
    pub async fn edit(
        &self,
        id: Uuid,
        patch: TenderPatch,
        username: &str,
    ) -> Result<Tender, ProcurementError> {
        let service_type = match &patch.service_type {
            Some(raw) => Some(validation::parse_service_type(raw)?),
            None => None,
        };
        let employee = self.access.resolve_by_username(username).await?;

        revision::edit(
            self.tenders.as_ref(),
            id,
            |tender| require_creator(tender, &employee.username),
            |tender| {
                if let Some(name) = patch.name {
                    tender.name = name;
                }
                if let Some(description) = patch.description {
                    tender.description = description;
                }
                if let Some(service_type) = service_type {
                    tender.service_type = service_type;
                }
                tender.updated_at = chrono::Utc::now();
            },
        )
        .await
    }

    /// Read the current status; creator only
    pub async fn get_status(
        &self,
        id: Uuid,
        username: &str,
    ) -> Result<TenderStatus, ProcurementError> {
        let employee = self.access.resolve_by_username(username).await?;
        let tender = self.load(id).await?;
        require_creator(&tender, &employee.username)?;
        Ok(tender.status)
    }

    /// Status transition; enum-validated, creator only, not versioned
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
        username: &str,
    ) -> Result<Tender, ProcurementError> {
        let new_status = validation::parse_tender_status(status)?;
        let employee = self.access.resolve_by_username(username).await?;

        let mut tender = self.load(id).await?;
        require_creator(&tender, &employee.username)?;

        self.tenders
            .set_status(id, new_status)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        tender.status = new_status;
        Ok(tender)
    }

    /// Roll back to a historical version; the result is a new version whose
    /// content equals the snapshot
    pub async fn rollback(
        &self,
        id: Uuid,
        target_version: i32,
        username: &str,
    ) -> Result<Tender, ProcurementError> {
        validation::validate_rollback_version(target_version)?;
        let employee = self.access.resolve_by_username(username).await?;

        revision::rollback(
            self.tenders.as_ref(),
            id,
            target_version,
            |tender| require_creator(tender, &employee.username),
            |tender, snapshot| {
                tender.name = snapshot.name.clone();
                tender.description = snapshot.description.clone();
                tender.service_type = snapshot.service_type;
                tender.status = snapshot.status;
                tender.updated_at = chrono::Utc::now();
            },
        )
        .await
    }

    async fn load(&self, id: Uuid) -> Result<Tender, ProcurementError> {
        self.tenders
            .load(id)
            .await
            .map_err(|_| ProcurementError::Internal)?
            .ok_or_else(|| ProcurementError::not_found("tender", id))
    }
}
