//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{Bid, BidFeedback, Employee, Tender};
use crate::domain::bids::CreateBid;
use crate::domain::tenders::CreateTender;

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            username: employee.username,
            first_name: employee.first_name,
            last_name: employee.last_name,
            created_at: employee.created_at.to_rfc3339(),
        }
    }
}

impl From<Tender> for TenderDto {
    fn from(tender: Tender) -> Self {
        Self {
            id: tender.id,
            name: tender.name,
            description: tender.description,
            status: tender.status.as_str().to_string(),
            service_type: tender.service_type.as_str().to_string(),
            version: tender.version,
            created_at: tender.created_at.to_rfc3339(),
        }
    }
}

impl From<CreateTenderRequest> for CreateTender {
    fn from(req: CreateTenderRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            service_type: req.service_type,
            organization_id: req.organization_id,
            creator_username: req.creator_username,
        }
    }
}

impl From<Bid> for BidDto {
    fn from(bid: Bid) -> Self {
        Self {
            id: bid.id,
            name: bid.name,
            status: bid.status.as_str().to_string(),
            author_type: bid.author_type.as_str().to_string(),
            author_id: bid.author_id,
            version: bid.version,
            created_at: bid.created_at.to_rfc3339(),
        }
    }
}

impl From<CreateBidRequest> for CreateBid {
    fn from(req: CreateBidRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            tender_id: req.tender_id,
            author_type: req.author_type,
            author_id: req.author_id,
        }
    }
}

impl From<BidFeedback> for BidReviewDto {
    fn from(feedback: BidFeedback) -> Self {
        Self {
            id: feedback.id,
            description: feedback.feedback,
            created_at: feedback.created_at.to_rfc3339(),
        }
    }
}
