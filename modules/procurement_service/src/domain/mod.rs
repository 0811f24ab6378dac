//! Domain layer - business logic and services

pub mod auth;
pub mod bids;
pub mod employees;
pub mod repository;
pub mod revision;
pub mod tenders;
pub mod validation;

pub use auth::AccessControl;
pub use bids::BidService;
pub use employees::EmployeeService;
pub use repository::{
    BidRepository, EmployeeRepository, FeedbackRepository, OrganizationRepository,
    TenderRepository,
};
pub use revision::{RevisionStore, Revisioned};
pub use tenders::TenderService;
