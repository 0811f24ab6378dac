//! Tender service behavior: creation, authorization, versioned edits and
//! rollbacks.

mod common;

use anyhow::Result;
use async_trait::async_trait;
use common::{InMemoryTenders, TestEnv};
use procurement_service::contract::{ProcurementError, ServiceType, Tender, TenderStatus};
use procurement_service::domain::tenders::{CreateTender, TenderPatch};
use procurement_service::domain::{revision, RevisionStore};
use std::sync::Arc;
use uuid::Uuid;

fn create_req(env: &TestEnv, name: &str, service_type: &str, username: &str) -> CreateTender {
    CreateTender {
        name: name.to_string(),
        description: "desc".to_string(),
        service_type: service_type.to_string(),
        organization_id: env.org_id,
        creator_username: username.to_string(),
    }
}

#[tokio::test]
async fn create_starts_at_version_one() {
    let env = TestEnv::new();

    let tender = env.alice_tender("Road resurfacing").await;

    assert_eq!(tender.version, 1);
    assert_eq!(tender.status, TenderStatus::Created);
    assert_eq!(tender.service_type, ServiceType::Construction);
    assert_eq!(tender.creator_username, "alice");
    assert!(env.tender_repo.history_for(tender.id).is_empty());
}

#[tokio::test]
async fn create_rejects_unknown_user() {
    let env = TestEnv::new();

    let err = env
        .tenders
        .create(create_req(&env, "T", "Construction", "mallory"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProcurementError::Unauthenticated { .. }));
}

#[tokio::test]
async fn create_requires_responsibility_grant() {
    let env = TestEnv::new();

    // bob exists but has no grant for the organization
    let err = env
        .tenders
        .create(create_req(&env, "T", "Construction", "bob"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProcurementError::Forbidden { .. }));
}

#[tokio::test]
async fn create_rejects_invalid_service_type() {
    let env = TestEnv::new();

    let err = env
        .tenders
        .create(create_req(&env, "T", "Catering", "alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProcurementError::Validation { .. }));
}

#[tokio::test]
async fn edit_bumps_version_and_snapshots_prior_state() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Bridge repair").await;

    let patch = TenderPatch {
        name: Some("Bridge repair phase 2".to_string()),
        ..Default::default()
    };
    let edited = env.tenders.edit(tender.id, patch, "alice").await.unwrap();

    assert_eq!(edited.version, 2);
    assert_eq!(edited.name, "Bridge repair phase 2");
    // unpatched fields untouched
    assert_eq!(edited.description, "desc");

    let history = env.tender_repo.history_for(tender.id);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].version, 1);
    assert_eq!(history[0].name, "Bridge repair");
}

#[tokio::test]
async fn edit_by_non_creator_is_forbidden_and_leaves_no_trace() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Bridge repair").await;

    let patch = TenderPatch {
        name: Some("hijacked".to_string()),
        ..Default::default()
    };
    let err = env.tenders.edit(tender.id, patch, "bob").await.unwrap_err();

    assert!(matches!(err, ProcurementError::Forbidden { .. }));
    let current = env.tender_repo.history_for(tender.id);
    assert!(current.is_empty(), "rejected edit must not snapshot");
}

#[tokio::test]
async fn rollback_appends_a_new_version_with_old_content() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Warehouse build").await;

    let patch = TenderPatch {
        name: Some("Warehouse build v2".to_string()),
        description: Some("revised".to_string()),
        ..Default::default()
    };
    let edited = env.tenders.edit(tender.id, patch, "alice").await.unwrap();
    assert_eq!(edited.version, 2);

    let rolled = env.tenders.rollback(tender.id, 1, "alice").await.unwrap();

    // Rollback never rewinds: it materializes the snapshot as version 3
    assert_eq!(rolled.version, 3);
    assert_eq!(rolled.name, "Warehouse build");
    assert_eq!(rolled.description, "desc");

    let history = env.tender_repo.history_for(tender.id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].version, 1);
    assert_eq!(history[1].version, 2);
    assert_eq!(history[1].name, "Warehouse build v2");
}

#[tokio::test]
async fn rollback_to_current_version_fails() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Depot").await;

    // Version 1 is current and therefore not yet in the history table
    let err = env.tenders.rollback(tender.id, 1, "alice").await.unwrap_err();

    assert!(matches!(err, ProcurementError::NotFound { .. }));
}

#[tokio::test]
async fn rollback_rejects_non_positive_versions() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Depot").await;

    let err = env.tenders.rollback(tender.id, 0, "alice").await.unwrap_err();
    assert!(matches!(err, ProcurementError::Validation { .. }));

    let err = env
        .tenders
        .rollback(tender.id, -3, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, ProcurementError::Validation { .. }));
}

#[tokio::test]
async fn status_change_is_not_versioned() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Depot").await;

    let updated = env
        .tenders
        .update_status(tender.id, "Published", "alice")
        .await
        .unwrap();

    assert_eq!(updated.status, TenderStatus::Published);
    assert_eq!(updated.version, 1, "status change must not bump version");
    assert!(env.tender_repo.history_for(tender.id).is_empty());
}

#[tokio::test]
async fn invalid_status_is_rejected_before_any_write() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Depot").await;

    let err = env
        .tenders
        .update_status(tender.id, "Opened", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, ProcurementError::Validation { .. }));

    let status = env.tenders.get_status(tender.id, "alice").await.unwrap();
    assert_eq!(status, TenderStatus::Created);
}

#[tokio::test]
async fn status_is_visible_to_creator_only() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Depot").await;

    let err = env.tenders.get_status(tender.id, "bob").await.unwrap_err();
    assert!(matches!(err, ProcurementError::Forbidden { .. }));

    let err = env
        .tenders
        .update_status(tender.id, "Closed", "bob")
        .await
        .unwrap_err();
    assert!(matches!(err, ProcurementError::Forbidden { .. }));
}

#[tokio::test]
async fn list_orders_by_name_and_filters_by_service_type() {
    let env = TestEnv::new();
    env.alice_tender("Zeta works").await;
    env.alice_tender("Alpha works").await;
    env.tenders
        .create(CreateTender {
            name: "Mid delivery".to_string(),
            description: "desc".to_string(),
            service_type: "Delivery".to_string(),
            organization_id: env.org_id,
            creator_username: "alice".to_string(),
        })
        .await
        .unwrap();

    let all = env.tenders.list(&[], 10, 0).await.unwrap();
    let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha works", "Mid delivery", "Zeta works"]);

    let construction = env
        .tenders
        .list(&["Construction".to_string()], 10, 0)
        .await
        .unwrap();
    assert_eq!(construction.len(), 2);

    let err = env
        .tenders
        .list(&["Gardening".to_string()], 10, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ProcurementError::Validation { .. }));
}

/// Store where another writer slips in between load and persist
struct ContendedTenders {
    inner: Arc<InMemoryTenders>,
}

#[async_trait]
impl RevisionStore<Tender> for ContendedTenders {
    async fn load(&self, id: Uuid) -> Result<Option<Tender>> {
        self.inner.load(id).await
    }

    async fn append_revision(&self, tender: &Tender) -> Result<()> {
        self.inner.append_revision(tender).await
    }

    async fn revision_at(&self, id: Uuid, version: i32) -> Result<Option<Tender>> {
        self.inner.revision_at(id, version).await
    }

    async fn persist(&self, tender: &Tender, expected_version: i32) -> Result<bool> {
        if let Some(mut current) = self.inner.load(tender.id).await? {
            let held = current.version;
            current.name = "concurrent edit".to_string();
            current.version = held + 1;
            self.inner.persist(&current, held).await?;
        }
        self.inner.persist(tender, expected_version).await
    }
}

#[tokio::test]
async fn edit_losing_a_concurrent_write_is_an_internal_error() {
    let env = TestEnv::new();
    let tender = env.alice_tender("Depot").await;
    let store = ContendedTenders {
        inner: env.tender_repo.clone(),
    };

    let err = revision::edit(&store, tender.id, |_| Ok(()), |t| {
        t.name = "our edit".to_string();
    })
    .await
    .unwrap_err();

    assert_eq!(err, ProcurementError::Internal);

    // the row belongs to the winner; the losing edit changed nothing
    let current = env.tender_repo.load(tender.id).await.unwrap().unwrap();
    assert_eq!(current.name, "concurrent edit");
    assert_eq!(current.version, 2);

    // the loser's pre-edit snapshot stays behind as a restorable point
    let history = env.tender_repo.history_for(tender.id);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].version, 1);
    assert_eq!(history[0].name, "Depot");
}

#[tokio::test]
async fn list_my_with_no_tenders_is_not_found() {
    let env = TestEnv::new();

    let err = env.tenders.list_my("bob", 5, 0).await.unwrap_err();
    assert!(matches!(err, ProcurementError::NotFound { .. }));
}

#[tokio::test]
async fn list_my_requires_known_user() {
    let env = TestEnv::new();

    let err = env.tenders.list_my("mallory", 5, 0).await.unwrap_err();
    assert!(matches!(err, ProcurementError::Unauthenticated { .. }));
}
