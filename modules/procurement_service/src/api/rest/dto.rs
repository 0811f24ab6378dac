//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Employee DTOs =====

/// Employee creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Employee response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

// ===== Tender DTOs =====

/// Tender creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequest {
    pub name: String,
    pub description: String,

    /// Construction | Delivery | Manufacture
    pub service_type: String,

    pub organization_id: Uuid,
    pub creator_username: String,
}

/// Tender edit request, absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
}

/// Tender response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenderDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub service_type: String,
    pub version: i32,

    /// RFC 3339 timestamp
    pub created_at: String,
}

// ===== Bid DTOs =====

/// Bid creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    pub name: String,
    pub description: String,
    pub tender_id: Uuid,

    /// User | Organization
    pub author_type: String,

    pub author_id: Uuid,
}

/// Bid edit request, absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditBidRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Bid response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidDto {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub author_type: String,
    pub author_id: Uuid,
    pub version: i32,

    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Review response DTO, one entry per feedback left on an author's bids
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidReviewDto {
    pub id: Uuid,
    pub description: String,

    /// RFC 3339 timestamp
    pub created_at: String,
}
