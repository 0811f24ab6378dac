//! In-memory repository fakes and a seeded fixture shared by the
//! integration tests.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use procurement_service::api::rest::AppState;
use procurement_service::contract::{
    Bid, BidFeedback, BidStatus, Decision, Employee, Organization, OrganizationType, ServiceType,
    Tender, TenderStatus,
};
use procurement_service::domain::{
    AccessControl, BidRepository, BidService, EmployeeRepository, EmployeeService,
    FeedbackRepository, OrganizationRepository, RevisionStore, TenderRepository, TenderService,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

// ===== Employees =====

#[derive(Default)]
pub struct InMemoryEmployees {
    rows: RwLock<HashMap<Uuid, Employee>>,
}

impl InMemoryEmployees {
    pub fn seed(&self, employee: Employee) {
        self.rows.write().insert(employee.id, employee);
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployees {
    async fn insert(&self, employee: &Employee) -> Result<Employee> {
        self.rows.write().insert(employee.id, employee.clone());
        Ok(employee.clone())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>> {
        Ok(self
            .rows
            .read()
            .values()
            .find(|e| e.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        Ok(self.rows.read().get(&id).cloned())
    }
}

// ===== Organizations =====

#[derive(Default)]
pub struct InMemoryOrganizations {
    rows: RwLock<HashMap<Uuid, Organization>>,
    grants: RwLock<Vec<(Uuid, Uuid)>>,
}

impl InMemoryOrganizations {
    pub fn seed(&self, organization: Organization) {
        self.rows.write().insert(organization.id, organization);
    }

    pub fn grant(&self, organization_id: Uuid, employee_id: Uuid) {
        self.grants.write().push((organization_id, employee_id));
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizations {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn is_responsible(&self, organization_id: Uuid, employee_id: Uuid) -> Result<bool> {
        Ok(self
            .grants
            .read()
            .iter()
            .any(|(org, emp)| *org == organization_id && *emp == employee_id))
    }
}

// ===== Tenders =====

#[derive(Default)]
pub struct InMemoryTenders {
    rows: RwLock<HashMap<Uuid, Tender>>,
    history: RwLock<Vec<Tender>>,
}

impl InMemoryTenders {
    /// Snapshots recorded for a tender, in append order
    pub fn history_for(&self, id: Uuid) -> Vec<Tender> {
        self.history
            .read()
            .iter()
            .filter(|t| t.id == id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RevisionStore<Tender> for InMemoryTenders {
    async fn load(&self, id: Uuid) -> Result<Option<Tender>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn append_revision(&self, tender: &Tender) -> Result<()> {
        self.history.write().push(tender.clone());
        Ok(())
    }

    async fn revision_at(&self, id: Uuid, version: i32) -> Result<Option<Tender>> {
        Ok(self
            .history
            .read()
            .iter()
            .find(|t| t.id == id && t.version == version)
            .cloned())
    }

    async fn persist(&self, tender: &Tender, expected_version: i32) -> Result<bool> {
        let mut rows = self.rows.write();
        match rows.get(&tender.id) {
            Some(current) if current.version == expected_version => {
                rows.insert(tender.id, tender.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl TenderRepository for InMemoryTenders {
    async fn insert(&self, tender: &Tender) -> Result<Tender> {
        self.rows.write().insert(tender.id, tender.clone());
        Ok(tender.clone())
    }

    async fn list(
        &self,
        service_types: &[ServiceType],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>> {
        let mut tenders: Vec<Tender> = self
            .rows
            .read()
            .values()
            .filter(|t| service_types.is_empty() || service_types.contains(&t.service_type))
            .cloned()
            .collect();
        tenders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(tenders, limit, offset))
    }

    async fn list_by_creator(
        &self,
        username: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>> {
        let mut tenders: Vec<Tender> = self
            .rows
            .read()
            .values()
            .filter(|t| t.creator_username == username)
            .cloned()
            .collect();
        tenders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(tenders, limit, offset))
    }

    async fn set_status(&self, id: Uuid, status: TenderStatus) -> Result<()> {
        if let Some(tender) = self.rows.write().get_mut(&id) {
            tender.status = status;
            tender.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ===== Bids =====

#[derive(Default)]
pub struct InMemoryBids {
    rows: RwLock<HashMap<Uuid, Bid>>,
    history: RwLock<Vec<Bid>>,
}

impl InMemoryBids {
    /// Snapshots recorded for a bid, in append order
    pub fn history_for(&self, id: Uuid) -> Vec<Bid> {
        self.history
            .read()
            .iter()
            .filter(|b| b.id == id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RevisionStore<Bid> for InMemoryBids {
    async fn load(&self, id: Uuid) -> Result<Option<Bid>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn append_revision(&self, bid: &Bid) -> Result<()> {
        self.history.write().push(bid.clone());
        Ok(())
    }

    async fn revision_at(&self, id: Uuid, version: i32) -> Result<Option<Bid>> {
        Ok(self
            .history
            .read()
            .iter()
            .find(|b| b.id == id && b.version == version)
            .cloned())
    }

    async fn persist(&self, bid: &Bid, expected_version: i32) -> Result<bool> {
        let mut rows = self.rows.write();
        match rows.get(&bid.id) {
            Some(current) if current.version == expected_version => {
                rows.insert(bid.id, bid.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl BidRepository for InMemoryBids {
    async fn insert(&self, bid: &Bid) -> Result<Bid> {
        self.rows.write().insert(bid.id, bid.clone());
        Ok(bid.clone())
    }

    async fn list_by_author(&self, author_id: Uuid, limit: u64, offset: u64) -> Result<Vec<Bid>> {
        let mut bids: Vec<Bid> = self
            .rows
            .read()
            .values()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(bids, limit, offset))
    }

    async fn list_by_tender(&self, tender_id: Uuid, limit: u64, offset: u64) -> Result<Vec<Bid>> {
        let mut bids: Vec<Bid> = self
            .rows
            .read()
            .values()
            .filter(|b| b.tender_id == tender_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(bids, limit, offset))
    }

    async fn set_status(&self, id: Uuid, status: BidStatus) -> Result<()> {
        if let Some(bid) = self.rows.write().get_mut(&id) {
            bid.status = status;
        }
        Ok(())
    }

    async fn set_decision(&self, id: Uuid, decision: Decision) -> Result<()> {
        if let Some(bid) = self.rows.write().get_mut(&id) {
            bid.decision = Some(decision);
        }
        Ok(())
    }
}

// ===== Feedback =====

pub struct InMemoryFeedback {
    rows: RwLock<Vec<BidFeedback>>,
    bids: Arc<InMemoryBids>,
}

impl InMemoryFeedback {
    pub fn new(bids: Arc<InMemoryBids>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            bids,
        }
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedback {
    async fn insert(&self, feedback: &BidFeedback) -> Result<BidFeedback> {
        self.rows.write().push(feedback.clone());
        Ok(feedback.clone())
    }

    async fn list_for_author_bids(
        &self,
        tender_id: Uuid,
        author_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<BidFeedback>> {
        let bid_ids: Vec<Uuid> = self
            .bids
            .rows
            .read()
            .values()
            .filter(|b| b.tender_id == tender_id && b.author_id == author_id)
            .map(|b| b.id)
            .collect();

        let feedback: Vec<BidFeedback> = self
            .rows
            .read()
            .iter()
            .filter(|f| bid_ids.contains(&f.bid_id))
            .cloned()
            .collect();
        Ok(page(feedback, limit, offset))
    }
}

fn page<T>(items: Vec<T>, limit: u64, offset: u64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

// ===== Fixture =====

/// Seeded world: one organization, `alice` responsible for it, `bob` a
/// plain employee without any grant.
pub struct TestEnv {
    pub employees: Arc<InMemoryEmployees>,
    pub organizations: Arc<InMemoryOrganizations>,
    pub tender_repo: Arc<InMemoryTenders>,
    pub bid_repo: Arc<InMemoryBids>,
    pub feedback_repo: Arc<InMemoryFeedback>,
    pub tenders: TenderService,
    pub bids: BidService,
    pub org_id: Uuid,
    pub alice: Employee,
    pub bob: Employee,
}

pub fn employee(username: &str) -> Employee {
    let now = Utc::now();
    Employee {
        id: Uuid::new_v4(),
        username: username.to_string(),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
        created_at: now,
        updated_at: now,
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let employees = Arc::new(InMemoryEmployees::default());
        let organizations = Arc::new(InMemoryOrganizations::default());
        let tender_repo = Arc::new(InMemoryTenders::default());
        let bid_repo = Arc::new(InMemoryBids::default());
        let feedback_repo = Arc::new(InMemoryFeedback::new(bid_repo.clone()));

        let alice = employee("alice");
        let bob = employee("bob");
        employees.seed(alice.clone());
        employees.seed(bob.clone());

        let org_id = Uuid::new_v4();
        let now = Utc::now();
        organizations.seed(Organization {
            id: org_id,
            name: "Acme Construction".to_string(),
            description: "Builds things".to_string(),
            organization_type: OrganizationType::Llc,
            created_at: now,
            updated_at: now,
        });
        organizations.grant(org_id, alice.id);

        let access = AccessControl::new(employees.clone(), organizations.clone());
        let tenders = TenderService::new(tender_repo.clone(), access.clone());
        let bids = BidService::new(
            bid_repo.clone(),
            tender_repo.clone(),
            feedback_repo.clone(),
            access,
        );

        Self {
            employees,
            organizations,
            tender_repo,
            bid_repo,
            feedback_repo,
            tenders,
            bids,
            org_id,
            alice,
            bob,
        }
    }

    /// Router wired to the in-memory world, for HTTP-level tests
    pub fn into_router(self) -> axum::Router {
        let state = AppState {
            employees: Arc::new(EmployeeService::new(self.employees.clone())),
            tenders: Arc::new(self.tenders),
            bids: Arc::new(self.bids),
        };
        procurement_service::api::rest::router(state)
    }

    /// Shorthand: a tender created by alice under the seeded organization
    pub async fn alice_tender(&self, name: &str) -> Tender {
        self.tenders
            .create(procurement_service::domain::tenders::CreateTender {
                name: name.to_string(),
                description: "desc".to_string(),
                service_type: "Construction".to_string(),
                organization_id: self.org_id,
                creator_username: "alice".to_string(),
            })
            .await
            .expect("tender fixture")
    }

    /// Shorthand: a User-typed bid by bob against the given tender
    pub async fn bob_bid(&self, tender_id: Uuid, name: &str) -> Bid {
        self.bids
            .create(procurement_service::domain::bids::CreateBid {
                name: name.to_string(),
                description: "bid desc".to_string(),
                tender_id,
                author_type: "User".to_string(),
                author_id: self.bob.id,
            })
            .await
            .expect("bid fixture")
    }
}
