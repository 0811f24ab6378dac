//! HTTP request handlers - thin layer that delegates to domain services

use super::dto::*;
use super::error::{map_domain_error, Problem};
use crate::domain::bids::BidPatch;
use crate::domain::tenders::TenderPatch;
use crate::domain::{BidService, EmployeeService, TenderService};
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handler state, one service per resource family
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<EmployeeService>,
    pub tenders: Arc<TenderService>,
    pub bids: Arc<BidService>,
}

fn default_limit() -> u64 {
    5
}

/// Caller identity carried as a query parameter
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub username: String,
}

/// Pagination plus caller identity
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTendersQuery {
    pub service_type: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusQuery {
    pub status: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct DecisionQuery {
    pub decision: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    pub bid_feedback: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    #[serde(default)]
    pub author_username: String,
    #[serde(default)]
    pub requester_username: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

// ===== Service health =====

pub async fn ping() -> &'static str {
    "pong"
}

// ===== Employee handlers =====

pub async fn create_employee(
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeDto>, Problem> {
    let employee = state
        .employees
        .create(req.username, req.first_name, req.last_name)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(employee.into()))
}

// ===== Tender handlers =====

pub async fn create_tender(
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateTenderRequest>,
) -> Result<Json<TenderDto>, Problem> {
    let tender = state
        .tenders
        .create(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tender.into()))
}

pub async fn list_tenders(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListTendersQuery>,
) -> Result<Json<Vec<TenderDto>>, Problem> {
    let filters: Vec<String> = query.service_type.into_iter().collect();

    let tenders = state
        .tenders
        .list(&filters, query.limit, query.offset)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tenders.into_iter().map(TenderDto::from).collect()))
}

pub async fn list_my_tenders(
    Extension(state): Extension<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<TenderDto>>, Problem> {
    let tenders = state
        .tenders
        .list_my(&query.username, query.limit, query.offset)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tenders.into_iter().map(TenderDto::from).collect()))
}

pub async fn edit_tender(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
    Json(req): Json<EditTenderRequest>,
) -> Result<Json<TenderDto>, Problem> {
    let patch = TenderPatch {
        name: req.name,
        description: req.description,
        service_type: req.service_type,
    };

    let tender = state
        .tenders
        .edit(id, patch, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tender.into()))
}

pub async fn get_tender_status(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
) -> Result<Json<String>, Problem> {
    let status = state
        .tenders
        .get_status(id, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(status.as_str().to_string()))
}

pub async fn update_tender_status(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SetStatusQuery>,
) -> Result<Json<TenderDto>, Problem> {
    let tender = state
        .tenders
        .update_status(id, &query.status, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tender.into()))
}

pub async fn rollback_tender(
    Extension(state): Extension<AppState>,
    Path((id, version)): Path<(Uuid, i32)>,
    Query(query): Query<UserQuery>,
) -> Result<Json<TenderDto>, Problem> {
    let tender = state
        .tenders
        .rollback(id, version, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tender.into()))
}

// ===== Bid handlers =====

pub async fn create_bid(
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateBidRequest>,
) -> Result<Json<BidDto>, Problem> {
    let bid = state
        .bids
        .create(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bid.into()))
}

pub async fn list_my_bids(
    Extension(state): Extension<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<BidDto>>, Problem> {
    let bids = state
        .bids
        .list_my(&query.username, query.limit, query.offset)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bids.into_iter().map(BidDto::from).collect()))
}

/// Bids submitted against a tender; the path id is the tender's
pub async fn list_tender_bids(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<BidDto>>, Problem> {
    let bids = state
        .bids
        .list_by_tender(id, &query.username, query.limit, query.offset)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bids.into_iter().map(BidDto::from).collect()))
}

pub async fn get_bid_status(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
) -> Result<Json<String>, Problem> {
    let status = state
        .bids
        .get_status(id, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(status.as_str().to_string()))
}

pub async fn update_bid_status(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SetStatusQuery>,
) -> Result<Json<BidDto>, Problem> {
    let bid = state
        .bids
        .update_status(id, &query.status, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bid.into()))
}

pub async fn edit_bid(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
    Json(req): Json<EditBidRequest>,
) -> Result<Json<BidDto>, Problem> {
    let patch = BidPatch {
        name: req.name,
        description: req.description,
    };

    let bid = state
        .bids
        .edit(id, patch, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bid.into()))
}

pub async fn rollback_bid(
    Extension(state): Extension<AppState>,
    Path((id, version)): Path<(Uuid, i32)>,
    Query(query): Query<UserQuery>,
) -> Result<Json<BidDto>, Problem> {
    let bid = state
        .bids
        .rollback(id, version, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bid.into()))
}

pub async fn submit_bid_decision(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DecisionQuery>,
) -> Result<Json<BidDto>, Problem> {
    let bid = state
        .bids
        .submit_decision(id, &query.decision, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bid.into()))
}

pub async fn send_bid_feedback(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<BidDto>, Problem> {
    let bid = state
        .bids
        .send_feedback(id, &query.bid_feedback, &query.username)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bid.into()))
}

/// Reviews for an author's bids under a tender; the path id is the tender's
pub async fn list_bid_reviews(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<BidReviewDto>>, Problem> {
    let reviews = state
        .bids
        .list_reviews(
            id,
            &query.author_username,
            &query.requester_username,
            query.limit,
            query.offset,
        )
        .await
        .map_err(map_domain_error)?;

    Ok(Json(reviews.into_iter().map(BidReviewDto::from).collect()))
}
