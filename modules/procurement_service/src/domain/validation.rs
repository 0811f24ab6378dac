//! Input validation for enum-valued and length-limited fields
//!
//! Wire values are case-sensitive; anything outside the closed enums is a
//! Validation error (400).

use crate::contract::{
    AuthorType, BidStatus, Decision, ProcurementError, ServiceType, TenderStatus,
};

/// Feedback text is limited to 1000 characters
pub const MAX_FEEDBACK_CHARS: usize = 1000;

pub fn parse_service_type(s: &str) -> Result<ServiceType, ProcurementError> {
    ServiceType::parse(s)
        .ok_or_else(|| ProcurementError::validation(format!("invalid service type '{}'", s)))
}

pub fn parse_tender_status(s: &str) -> Result<TenderStatus, ProcurementError> {
    TenderStatus::parse(s)
        .ok_or_else(|| ProcurementError::validation(format!("invalid status value '{}'", s)))
}

pub fn parse_bid_status(s: &str) -> Result<BidStatus, ProcurementError> {
    BidStatus::parse(s)
        .ok_or_else(|| ProcurementError::validation(format!("invalid status value '{}'", s)))
}

pub fn parse_author_type(s: &str) -> Result<AuthorType, ProcurementError> {
    AuthorType::parse(s)
        .ok_or_else(|| ProcurementError::validation(format!("invalid author type '{}'", s)))
}

pub fn parse_decision(s: &str) -> Result<Decision, ProcurementError> {
    Decision::parse(s)
        .ok_or_else(|| ProcurementError::validation(format!("invalid decision value '{}'", s)))
}

/// Feedback must be non-empty and at most [`MAX_FEEDBACK_CHARS`] characters
pub fn validate_feedback(text: &str) -> Result<(), ProcurementError> {
    if text.is_empty() {
        return Err(ProcurementError::validation("feedback is required"));
    }
    if text.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(ProcurementError::validation(format!(
            "feedback exceeds maximum length of {} characters",
            MAX_FEEDBACK_CHARS
        )));
    }
    Ok(())
}

/// Rollback targets start at version 1
pub fn validate_rollback_version(version: i32) -> Result<(), ProcurementError> {
    if version < 1 {
        return Err(ProcurementError::validation(
            "version must be greater than 0",
        ));
    }
    Ok(())
}
