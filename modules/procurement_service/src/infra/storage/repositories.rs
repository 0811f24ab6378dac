//! SeaORM repository implementations

use super::entity;
use super::mapper::{bid_snapshot, tender_snapshot};
use crate::contract::{
    Bid, BidFeedback, BidStatus, Decision, Employee, Organization, ServiceType, Tender,
    TenderStatus,
};
use crate::domain::repository::{
    BidRepository, EmployeeRepository, FeedbackRepository, OrganizationRepository,
    TenderRepository,
};
use crate::domain::revision::RevisionStore;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, sea_query::Query, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

// ===== Employee Repository =====

pub struct SeaOrmEmployeeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn insert(&self, employee: &Employee) -> Result<Employee> {
        let active: entity::employee::ActiveModel = employee.into();
        let result = entity::employee::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>> {
        let result = entity::employee::Entity::find()
            .filter(entity::employee::Column::Username.eq(username))
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let result = entity::employee::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(|e| e.into()))
    }
}

// ===== Organization Repository =====

pub struct SeaOrmOrganizationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrganizationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrganizationRepository for SeaOrmOrganizationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        let result = entity::organization::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn is_responsible(&self, organization_id: Uuid, employee_id: Uuid) -> Result<bool> {
        // Duplicate grants are tolerated; any matching row suffices
        let count = entity::organization_responsible::Entity::find()
            .filter(entity::organization_responsible::Column::OrganizationId.eq(organization_id))
            .filter(entity::organization_responsible::Column::EmployeeId.eq(employee_id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }
}

// ===== Tender Repository =====

pub struct SeaOrmTenderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTenderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RevisionStore<Tender> for SeaOrmTenderRepository {
    async fn load(&self, id: Uuid) -> Result<Option<Tender>> {
        let result = entity::tender::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(|e| e.into()))
    }

    async fn append_revision(&self, tender: &Tender) -> Result<()> {
        entity::tender_history::Entity::insert(tender_snapshot(tender))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn revision_at(&self, id: Uuid, version: i32) -> Result<Option<Tender>> {
        let result = entity::tender_history::Entity::find()
            .filter(entity::tender_history::Column::TenderId.eq(id))
            .filter(entity::tender_history::Column::Version.eq(version))
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn persist(&self, tender: &Tender, expected_version: i32) -> Result<bool> {
        // Version-guarded write: refuses to clobber a concurrent update
        let active: entity::tender::ActiveModel = tender.into();
        let result = entity::tender::Entity::update_many()
            .set(active)
            .filter(entity::tender::Column::Id.eq(tender.id))
            .filter(entity::tender::Column::Version.eq(expected_version))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl TenderRepository for SeaOrmTenderRepository {
    async fn insert(&self, tender: &Tender) -> Result<Tender> {
        let active: entity::tender::ActiveModel = tender.into();
        let result = entity::tender::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn list(
        &self,
        service_types: &[ServiceType],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>> {
        let mut query = entity::tender::Entity::find();

        if !service_types.is_empty() {
            let values: Vec<&str> = service_types.iter().map(|st| st.as_str()).collect();
            query = query.filter(entity::tender::Column::ServiceType.is_in(values));
        }

        let results = query
            .order_by_asc(entity::tender::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn list_by_creator(
        &self,
        username: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Tender>> {
        let results = entity::tender::Entity::find()
            .filter(entity::tender::Column::CreatorUsername.eq(username))
            .order_by_asc(entity::tender::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn set_status(&self, id: Uuid, status: TenderStatus) -> Result<()> {
        entity::tender::Entity::update_many()
            .col_expr(entity::tender::Column::Status, Expr::value(status.as_str()))
            .col_expr(
                entity::tender::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(entity::tender::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Bid Repository =====

pub struct SeaOrmBidRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmBidRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RevisionStore<Bid> for SeaOrmBidRepository {
    async fn load(&self, id: Uuid) -> Result<Option<Bid>> {
        let result = entity::bid::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(|e| e.into()))
    }

    async fn append_revision(&self, bid: &Bid) -> Result<()> {
        entity::bid_history::Entity::insert(bid_snapshot(bid))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn revision_at(&self, id: Uuid, version: i32) -> Result<Option<Bid>> {
        let result = entity::bid_history::Entity::find()
            .filter(entity::bid_history::Column::BidId.eq(id))
            .filter(entity::bid_history::Column::Version.eq(version))
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn persist(&self, bid: &Bid, expected_version: i32) -> Result<bool> {
        let active: entity::bid::ActiveModel = bid.into();
        let result = entity::bid::Entity::update_many()
            .set(active)
            .filter(entity::bid::Column::Id.eq(bid.id))
            .filter(entity::bid::Column::Version.eq(expected_version))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl BidRepository for SeaOrmBidRepository {
    async fn insert(&self, bid: &Bid) -> Result<Bid> {
        let active: entity::bid::ActiveModel = bid.into();
        let result = entity::bid::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn list_by_author(&self, author_id: Uuid, limit: u64, offset: u64) -> Result<Vec<Bid>> {
        let results = entity::bid::Entity::find()
            .filter(entity::bid::Column::AuthorId.eq(author_id))
            .order_by_asc(entity::bid::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn list_by_tender(&self, tender_id: Uuid, limit: u64, offset: u64) -> Result<Vec<Bid>> {
        let results = entity::bid::Entity::find()
            .filter(entity::bid::Column::TenderId.eq(tender_id))
            .order_by_asc(entity::bid::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn set_status(&self, id: Uuid, status: BidStatus) -> Result<()> {
        entity::bid::Entity::update_many()
            .col_expr(entity::bid::Column::Status, Expr::value(status.as_str()))
            .filter(entity::bid::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn set_decision(&self, id: Uuid, decision: Decision) -> Result<()> {
        entity::bid::Entity::update_many()
            .col_expr(entity::bid::Column::Decision, Expr::value(decision.as_str()))
            .filter(entity::bid::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Feedback Repository =====

pub struct SeaOrmFeedbackRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmFeedbackRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for SeaOrmFeedbackRepository {
    async fn insert(&self, feedback: &BidFeedback) -> Result<BidFeedback> {
        let active: entity::bid_feedback::ActiveModel = feedback.into();
        let result = entity::bid_feedback::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn list_for_author_bids(
        &self,
        tender_id: Uuid,
        author_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<BidFeedback>> {
        let author_bids = Query::select()
            .column(entity::bid::Column::Id)
            .from(entity::bid::Entity)
            .and_where(Expr::col(entity::bid::Column::TenderId).eq(tender_id))
            .and_where(Expr::col(entity::bid::Column::AuthorId).eq(author_id))
            .to_owned();

        let results = entity::bid_feedback::Entity::find()
            .filter(entity::bid_feedback::Column::BidId.in_subquery(author_bids))
            .order_by_asc(entity::bid_feedback::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}
