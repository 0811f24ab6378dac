//! Route registration

use super::handlers;
pub use super::handlers::AppState;
use axum::{
    routing::{get, patch, post, put},
    Extension, Router,
};

/// Build the full API router. All paths use the same `{id}` segment name
/// so tender and bid routes can share their position in the match tree.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        // Employee endpoints
        .route("/api/employees/new", post(handlers::create_employee))
        // Tender endpoints
        .route("/api/tenders/new", post(handlers::create_tender))
        .route("/api/tenders", get(handlers::list_tenders))
        .route("/api/tenders/my", get(handlers::list_my_tenders))
        .route("/api/tenders/{id}/edit", patch(handlers::edit_tender))
        .route(
            "/api/tenders/{id}/status",
            get(handlers::get_tender_status).put(handlers::update_tender_status),
        )
        .route(
            "/api/tenders/{id}/rollback/{version}",
            put(handlers::rollback_tender),
        )
        // Bid endpoints
        .route("/api/bids/new", post(handlers::create_bid))
        .route("/api/bids/my", get(handlers::list_my_bids))
        .route("/api/bids/{id}/list", get(handlers::list_tender_bids))
        .route(
            "/api/bids/{id}/status",
            get(handlers::get_bid_status).put(handlers::update_bid_status),
        )
        .route("/api/bids/{id}/edit", patch(handlers::edit_bid))
        .route(
            "/api/bids/{id}/rollback/{version}",
            put(handlers::rollback_bid),
        )
        .route(
            "/api/bids/{id}/submit_decision",
            put(handlers::submit_bid_decision),
        )
        .route("/api/bids/{id}/feedback", put(handlers::send_bid_feedback))
        .route("/api/bids/{id}/reviews", get(handlers::list_bid_reviews))
        .layer(Extension(state))
}
