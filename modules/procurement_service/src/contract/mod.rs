//! Contract layer - transport-agnostic domain models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::ProcurementError;
pub use model::{
    AuthorType, Bid, BidFeedback, BidStatus, Decision, Employee, Organization,
    OrganizationResponsible, OrganizationType, ServiceType, Tender, TenderStatus,
};
