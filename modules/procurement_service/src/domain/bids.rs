//! Bid lifecycle service
//!
//! Bids share the revision engine with tenders for content edits and
//! rollbacks. Status and decision are persisted directly without a history
//! snapshot, and the decision field is deliberately decoupled from the
//! status state machine.

use crate::contract::{Bid, BidFeedback, BidStatus, Employee, ProcurementError, Tender};
use crate::domain::auth::{require_author, AccessControl};
use crate::domain::repository::{BidRepository, FeedbackRepository, TenderRepository};
use crate::domain::{revision, validation};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Fields accepted when creating a bid
#[derive(Debug, Clone)]
pub struct CreateBid {
    pub name: String,
    pub description: String,
    pub tender_id: Uuid,
    pub author_type: String,
    pub author_id: Uuid,
}

/// Partial update - absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct BidPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct BidService {
    bids: Arc<dyn BidRepository>,
    tenders: Arc<dyn TenderRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    access: AccessControl,
}

impl BidService {
    pub fn new(
        bids: Arc<dyn BidRepository>,
        tenders: Arc<dyn TenderRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        access: AccessControl,
    ) -> Self {
        Self {
            bids,
            tenders,
            feedback,
            access,
        }
    }

    /// Create a bid at version 1, status Created.
    ///
    /// The tender must exist (a missing tender is a malformed request, 400,
    /// not 404). The author must exist (401), and an Organization-typed bid
    /// requires a responsibility grant for the tender's organization (403).
    pub async fn create(&self, req: CreateBid) -> Result<Bid, ProcurementError> {
        let author_type = validation::parse_author_type(&req.author_type)?;

        let tender = self
            .tenders
            .load(req.tender_id)
            .await
            .map_err(|_| ProcurementError::Internal)?
            .ok_or_else(|| {
                ProcurementError::validation("tender with the given id does not exist")
            })?;

        let employee = self.access.resolve_by_id(req.author_id).await?;

        if author_type == crate::contract::AuthorType::Organization {
            self.access
                .require_responsible(
                    tender.organization_id,
                    employee.id,
                    "unauthorized to create bid as organization",
                )
                .await?;
        }

        let bid = Bid::new(
            req.name,
            req.description,
            tender.id,
            author_type,
            employee.id,
        );

        let created = self
            .bids
            .insert(&bid)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        tracing::debug!(bid_id = %created.id, tender_id = %tender.id, "bid created");
        Ok(created)
    }

    /// List the caller's own bids
    pub async fn list_my(
        &self,
        username: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Bid>, ProcurementError> {
        let employee = self.access.resolve_by_username(username).await?;

        self.bids
            .list_by_author(employee.id, limit, offset)
            .await
            .map_err(|_| ProcurementError::Internal)
    }

    /// List bids submitted against a tender; tender creator only
    pub async fn list_by_tender(
        &self,
        tender_id: Uuid,
        username: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Bid>, ProcurementError> {
        let tender = self.load_tender(tender_id).await?;
        let employee = self.access.resolve_by_username(username).await?;

        if tender.creator_username != employee.username {
            return Err(ProcurementError::forbidden(
                "user is not authorized to access bids for this tender",
            ));
        }

        self.bids
            .list_by_tender(tender_id, limit, offset)
            .await
            .map_err(|_| ProcurementError::Internal)
    }

    /// Read the current status; author or organization-responsible party
    pub async fn get_status(
        &self,
        id: Uuid,
        username: &str,
    ) -> Result<BidStatus, ProcurementError> {
        let employee = self.access.resolve_by_username(username).await?;
        let bid = self.load(id).await?;
        self.require_author_or_responsible(&bid, &employee, "access").await?;
        Ok(bid.status)
    }

    /// Status transition; enum-validated, author or organization-responsible,
    /// not versioned
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
        username: &str,
    ) -> Result<Bid, ProcurementError> {
        let new_status = validation::parse_bid_status(status)?;
        let employee = self.access.resolve_by_username(username).await?;

        let mut bid = self.load(id).await?;
        self.require_author_or_responsible(&bid, &employee, "update").await?;

        self.bids
            .set_status(id, new_status)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        bid.status = new_status;
        Ok(bid)
    }

    /// Snapshot-then-patch edit; author only
    pub async fn edit(
        &self,
        id: Uuid,
        patch: BidPatch,
        username: &str,
    ) -> Result<Bid, ProcurementError> {
        let employee = self.access.resolve_by_username(username).await?;

        revision::edit(
            self.bids.as_ref(),
            id,
            |bid| require_author(bid, employee.id),
            |bid| {
                if let Some(name) = patch.name {
                    bid.name = name;
                }
                if let Some(description) = patch.description {
                    bid.description = description;
                }
            },
        )
        .await
    }

    /// Roll back to a historical version; author only. Restores content,
    /// status and decision - never id or version.
    pub async fn rollback(
        &self,
        id: Uuid,
        target_version: i32,
        username: &str,
    ) -> Result<Bid, ProcurementError> {
        validation::validate_rollback_version(target_version)?;
        let employee = self.access.resolve_by_username(username).await?;

        revision::rollback(
            self.bids.as_ref(),
            id,
            target_version,
            |bid| require_author(bid, employee.id),
            |bid, snapshot| {
                bid.name = snapshot.name.clone();
                bid.description = snapshot.description.clone();
                bid.status = snapshot.status;
                bid.author_type = snapshot.author_type;
                bid.decision = snapshot.decision;
            },
        )
        .await
    }

    /// Record an Approved/Rejected decision; author only, not versioned,
    /// and the status field is left untouched
    pub async fn submit_decision(
        &self,
        id: Uuid,
        decision: &str,
        username: &str,
    ) -> Result<Bid, ProcurementError> {
        let decision = validation::parse_decision(decision)?;
        let employee = self.access.resolve_by_username(username).await?;

        let mut bid = self.load(id).await?;
        require_author(&bid, employee.id)?;

        self.bids
            .set_decision(id, decision)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        bid.decision = Some(decision);
        Ok(bid)
    }

    /// Append a feedback record to a bid.
    ///
    /// Only someone responsible for the organization that owns the bid's
    /// tender may leave feedback - not the bid's own author.
    pub async fn send_feedback(
        &self,
        bid_id: Uuid,
        text: &str,
        username: &str,
    ) -> Result<Bid, ProcurementError> {
        validation::validate_feedback(text)?;

        let bid = self.load(bid_id).await?;
        let tender = self.load_tender(bid.tender_id).await?;
        let employee = self.access.resolve_by_username(username).await?;

        self.access
            .require_responsible(
                tender.organization_id,
                employee.id,
                "user is not authorized to submit feedback for this bid",
            )
            .await?;

        let record = BidFeedback {
            id: Uuid::new_v4(),
            bid_id: bid.id,
            feedback: text.to_string(),
            author_id: employee.id,
            created_at: Utc::now(),
        };

        self.feedback
            .insert(&record)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        Ok(bid)
    }

    /// Feedback left on a given author's bids under a tender.
    ///
    /// The requester must be responsible for the tender's organization.
    /// An empty result is 404 "no reviews found" rather than an empty
    /// list, so "nothing exists yet" reads differently from "not
    /// authorized".
    pub async fn list_reviews(
        &self,
        tender_id: Uuid,
        author_username: &str,
        requester_username: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<BidFeedback>, ProcurementError> {
        if author_username.is_empty() {
            return Err(ProcurementError::validation("authorUsername is required"));
        }
        if requester_username.is_empty() {
            return Err(ProcurementError::validation(
                "requesterUsername is required",
            ));
        }

        let requester = self.access.resolve_by_username(requester_username).await?;
        let tender = self.load_tender(tender_id).await?;

        self.access
            .require_responsible(
                tender.organization_id,
                requester.id,
                "requester does not have permission to view reviews for this tender",
            )
            .await?;

        // An unknown author reads as 404 here, not 401: the author is the
        // subject of the query, not the caller. Storage failures stay 500.
        let author = match self.access.resolve_by_username(author_username).await {
            Ok(employee) => employee,
            Err(ProcurementError::Unauthenticated { .. }) => {
                return Err(ProcurementError::not_found("author user", author_username));
            }
            Err(err) => return Err(err),
        };

        let reviews = self
            .feedback
            .list_for_author_bids(tender_id, author.id, limit, offset)
            .await
            .map_err(|_| ProcurementError::Internal)?;

        if reviews.is_empty() {
            return Err(ProcurementError::not_found("reviews", tender_id));
        }
        Ok(reviews)
    }

    /// Author or someone responsible for the tender's organization.
    ///
    /// The responsibility lookup is keyed by the tender's actual
    /// organization id, resolved through the bid's tender.
    async fn require_author_or_responsible(
        &self,
        bid: &Bid,
        employee: &Employee,
        action: &str,
    ) -> Result<(), ProcurementError> {
        if bid.author_id == employee.id {
            return Ok(());
        }
        let tender = self.load_tender(bid.tender_id).await?;
        if self
            .access
            .is_responsible_for(tender.organization_id, employee.id)
            .await?
        {
            return Ok(());
        }
        Err(ProcurementError::forbidden(format!(
            "user is not authorized to {} this bid",
            action
        )))
    }

    async fn load(&self, id: Uuid) -> Result<Bid, ProcurementError> {
        self.bids
            .load(id)
            .await
            .map_err(|_| ProcurementError::Internal)?
            .ok_or_else(|| ProcurementError::not_found("bid", id))
    }

    async fn load_tender(&self, id: Uuid) -> Result<Tender, ProcurementError> {
        self.tenders
            .load(id)
            .await
            .map_err(|_| ProcurementError::Internal)?
            .ok_or_else(|| ProcurementError::not_found("tender", id))
    }
}
