//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Bid, BidFeedback, BidStatus, Decision, Employee, Organization, ServiceType, Tender,
    TenderStatus,
};
use crate::domain::revision::RevisionStore;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for employees
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Create a new employee
    async fn insert(&self, employee: &Employee) -> Result<Employee>;

    /// Find an employee by unique username (exact match)
    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>>;

    /// Find an employee by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>>;
}

/// Repository for organizations and responsibility grants
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Find an organization by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>>;

    /// Whether any responsibility grant exists for the pair
    async fn is_responsible(&self, organization_id: Uuid, employee_id: Uuid) -> Result<bool>;
}

/// Repository for tenders, including the versioned-history operations
#[async_trait]
pub trait TenderRepository: RevisionStore<Tender> {
    /// Create a new tender at version 1
    async fn insert(&self, tender: &Tender) -> Result<Tender>;

    /// List tenders ordered by name, optionally filtered by service type
    async fn list(
        &self,
        service_types: &[ServiceType],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>>;

    /// List tenders created by the given username, ordered by name
    async fn list_by_creator(
        &self,
        username: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>>;

    /// Update the status only - no history snapshot, no version bump
    async fn set_status(&self, id: Uuid, status: TenderStatus) -> Result<()>;
}

/// Repository for bids, including the versioned-history operations
#[async_trait]
pub trait BidRepository: RevisionStore<Bid> {
    /// Create a new bid at version 1
    async fn insert(&self, bid: &Bid) -> Result<Bid>;

    /// List bids authored by the given employee
    async fn list_by_author(&self, author_id: Uuid, limit: u64, offset: u64) -> Result<Vec<Bid>>;

    /// List bids submitted against the given tender
    async fn list_by_tender(&self, tender_id: Uuid, limit: u64, offset: u64) -> Result<Vec<Bid>>;

    /// Update the status only - no history snapshot, no version bump
    async fn set_status(&self, id: Uuid, status: BidStatus) -> Result<()>;

    /// Record a decision - no history snapshot, no version bump
    async fn set_decision(&self, id: Uuid, decision: Decision) -> Result<()>;
}

/// Repository for append-only bid feedback
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Append a feedback record
    async fn insert(&self, feedback: &BidFeedback) -> Result<BidFeedback>;

    /// Feedback on all bids a given author submitted against a tender,
    /// in storage order
    async fn list_for_author_bids(
        &self,
        tender_id: Uuid,
        author_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<BidFeedback>>;
}
