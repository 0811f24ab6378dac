//! Procurement Service Module
//!
//! Tender and bid management backend. Tenders are posted by organizations,
//! bids are submitted against them, and every content edit or rollback is
//! recorded as a new, strictly increasing version with the prior state
//! snapshotted into a history table.

// Public exports
pub mod contract;
pub use contract::{
    error::ProcurementError, AuthorType, Bid, BidFeedback, BidStatus, Decision, Employee,
    Organization, OrganizationResponsible, OrganizationType, ServiceType, Tender, TenderStatus,
};

pub mod api;
pub mod domain;
pub mod infra;
