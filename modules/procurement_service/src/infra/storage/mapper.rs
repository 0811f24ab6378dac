//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Unknown enum
//! strings coming back from storage fall back to the first variant; they
//! can only appear if the table was written around the application.

use super::entity;
use crate::contract::{
    AuthorType, Bid, BidFeedback, BidStatus, Decision, Employee, Organization, OrganizationType,
    ServiceType, Tender, TenderStatus,
};
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

// ===== Employee conversions =====

impl From<entity::employee::Model> for Employee {
    fn from(entity: entity::employee::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            first_name: entity.first_name,
            last_name: entity.last_name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Employee> for entity::employee::ActiveModel {
    fn from(model: &Employee) -> Self {
        Self {
            id: Set(model.id),
            username: Set(model.username.clone()),
            first_name: Set(model.first_name.clone()),
            last_name: Set(model.last_name.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Organization conversions =====

impl From<entity::organization::Model> for Organization {
    fn from(entity: entity::organization::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            organization_type: OrganizationType::parse(&entity.organization_type)
                .unwrap_or(OrganizationType::Ie),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

// ===== Tender conversions =====

impl From<entity::tender::Model> for Tender {
    fn from(entity: entity::tender::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            service_type: ServiceType::parse(&entity.service_type)
                .unwrap_or(ServiceType::Construction),
            status: TenderStatus::parse(&entity.status).unwrap_or(TenderStatus::Created),
            organization_id: entity.organization_id,
            creator_username: entity.creator_username,
            version: entity.version,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Tender> for entity::tender::ActiveModel {
    fn from(model: &Tender) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            service_type: Set(model.service_type.as_str().to_string()),
            status: Set(model.status.as_str().to_string()),
            organization_id: Set(model.organization_id),
            creator_username: Set(model.creator_username.clone()),
            version: Set(model.version),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

/// Reconstruct the tender state captured by a history snapshot
impl From<entity::tender_history::Model> for Tender {
    fn from(entity: entity::tender_history::Model) -> Self {
        Self {
            id: entity.tender_id,
            name: entity.name,
            description: entity.description,
            service_type: ServiceType::parse(&entity.service_type)
                .unwrap_or(ServiceType::Construction),
            status: TenderStatus::parse(&entity.status).unwrap_or(TenderStatus::Created),
            organization_id: entity.organization_id,
            creator_username: entity.creator_username,
            version: entity.version,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Snapshot the given tender state into a new history row
pub fn tender_snapshot(model: &Tender) -> entity::tender_history::ActiveModel {
    entity::tender_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        tender_id: Set(model.id),
        name: Set(model.name.clone()),
        description: Set(model.description.clone()),
        service_type: Set(model.service_type.as_str().to_string()),
        status: Set(model.status.as_str().to_string()),
        organization_id: Set(model.organization_id),
        creator_username: Set(model.creator_username.clone()),
        version: Set(model.version),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

// ===== Bid conversions =====

impl From<entity::bid::Model> for Bid {
    fn from(entity: entity::bid::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            status: BidStatus::parse(&entity.status).unwrap_or(BidStatus::Created),
            tender_id: entity.tender_id,
            author_type: AuthorType::parse(&entity.author_type).unwrap_or(AuthorType::User),
            author_id: entity.author_id,
            version: entity.version,
            created_at: entity.created_at,
            decision: entity.decision.as_deref().and_then(Decision::parse),
        }
    }
}

impl From<&Bid> for entity::bid::ActiveModel {
    fn from(model: &Bid) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            status: Set(model.status.as_str().to_string()),
            tender_id: Set(model.tender_id),
            author_type: Set(model.author_type.as_str().to_string()),
            author_id: Set(model.author_id),
            version: Set(model.version),
            created_at: Set(model.created_at),
            decision: Set(model.decision.map(|d| d.as_str().to_string())),
        }
    }
}

/// Reconstruct the bid state captured by a history snapshot
impl From<entity::bid_history::Model> for Bid {
    fn from(entity: entity::bid_history::Model) -> Self {
        Self {
            id: entity.bid_id,
            name: entity.name,
            description: entity.description,
            status: BidStatus::parse(&entity.status).unwrap_or(BidStatus::Created),
            tender_id: entity.tender_id,
            author_type: AuthorType::parse(&entity.author_type).unwrap_or(AuthorType::User),
            author_id: entity.author_id,
            version: entity.version,
            created_at: entity.created_at,
            decision: entity.decision.as_deref().and_then(Decision::parse),
        }
    }
}

/// Snapshot the given bid state into a new history row
pub fn bid_snapshot(model: &Bid) -> entity::bid_history::ActiveModel {
    entity::bid_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        bid_id: Set(model.id),
        name: Set(model.name.clone()),
        description: Set(model.description.clone()),
        status: Set(model.status.as_str().to_string()),
        tender_id: Set(model.tender_id),
        author_type: Set(model.author_type.as_str().to_string()),
        author_id: Set(model.author_id),
        version: Set(model.version),
        created_at: Set(model.created_at),
        decision: Set(model.decision.map(|d| d.as_str().to_string())),
    }
}

// ===== Feedback conversions =====

impl From<entity::bid_feedback::Model> for BidFeedback {
    fn from(entity: entity::bid_feedback::Model) -> Self {
        Self {
            id: entity.id,
            bid_id: entity.bid_id,
            feedback: entity.feedback,
            author_id: entity.author_id,
            created_at: entity.created_at,
        }
    }
}

impl From<&BidFeedback> for entity::bid_feedback::ActiveModel {
    fn from(model: &BidFeedback) -> Self {
        Self {
            id: Set(model.id),
            bid_id: Set(model.bid_id),
            feedback: Set(model.feedback.clone()),
            author_id: Set(model.author_id),
            created_at: Set(model.created_at),
        }
    }
}
