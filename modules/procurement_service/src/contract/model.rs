//! Contract models for the procurement service
//!
//! These models are transport-agnostic. NO serde derives - serialization
//! lives in the REST DTOs and the storage entities.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Employee acting on tenders and bids, identified by unique username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Legal form of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationType {
    /// Individual entrepreneur
    Ie,
    /// Limited liability company
    Llc,
    /// Joint-stock company
    Jsc,
}

impl OrganizationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ie => "IE",
            Self::Llc => "LLC",
            Self::Jsc => "JSC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IE" => Some(Self::Ie),
            "LLC" => Some(Self::Llc),
            "JSC" => Some(Self::Jsc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub organization_type: OrganizationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Grant allowing an employee to act on behalf of an organization.
/// Duplicate grants for the same pair are tolerated and idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationResponsible {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub employee_id: Uuid,
}

/// Kind of service a tender requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Construction,
    Delivery,
    Manufacture,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Construction => "Construction",
            Self::Delivery => "Delivery",
            Self::Manufacture => "Manufacture",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Construction" => Some(Self::Construction),
            "Delivery" => Some(Self::Delivery),
            "Manufacture" => Some(Self::Manufacture),
            _ => None,
        }
    }
}

/// Tender lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenderStatus {
    Created,
    Published,
    Closed,
}

impl TenderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Closed => "Closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Created" => Some(Self::Created),
            "Published" => Some(Self::Published),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A posted request for services that bids are submitted against.
///
/// `version` starts at 1 and increases by exactly 1 on every accepted
/// edit or rollback. Status changes do not touch the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tender {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    pub organization_id: Uuid,
    pub creator_username: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tender {
    pub fn new(
        name: String,
        description: String,
        service_type: ServiceType,
        organization_id: Uuid,
        creator_username: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            service_type,
            status: TenderStatus::Created,
            organization_id,
            creator_username,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Whether a bid is submitted as an individual or on behalf of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorType {
    User,
    Organization,
}

impl AuthorType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Organization => "Organization",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "User" => Some(Self::User),
            "Organization" => Some(Self::Organization),
            _ => None,
        }
    }
}

/// Bid lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidStatus {
    Created,
    Published,
    Canceled,
}

impl BidStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Canceled => "Canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Created" => Some(Self::Created),
            "Published" => Some(Self::Published),
            "Canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

/// Reviewer verdict on a bid, decoupled from the status field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A proposal submitted against a tender.
///
/// `author_id` is always the submitting employee, regardless of whether
/// the bid was placed as a User or on behalf of an Organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: BidStatus,
    pub tender_id: Uuid,
    pub author_type: AuthorType,
    pub author_id: Uuid,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub decision: Option<Decision>,
}

impl Bid {
    pub fn new(
        name: String,
        description: String,
        tender_id: Uuid,
        author_type: AuthorType,
        author_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            status: BidStatus::Created,
            tender_id,
            author_type,
            author_id,
            version: 1,
            created_at: Utc::now(),
            decision: None,
        }
    }
}

/// Append-only feedback record attached to a bid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidFeedback {
    pub id: Uuid,
    pub bid_id: Uuid,
    pub feedback: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}
