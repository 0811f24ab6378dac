//! Generic versioned-entity engine
//!
//! Tenders and bids share the same mutation discipline: every accepted edit
//! snapshots the current row into a history table before changing it, and
//! rollback re-materializes a historical snapshot as a brand-new version.
//! Version numbers are never reused and never decrease - rollback appends
//! version N+1 with old content instead of rewinding to version K, so the
//! history chain stays a strictly increasing audit log.

use crate::contract::{Bid, ProcurementError, Tender};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Entity that carries a monotonically increasing version number
pub trait Revisioned {
    /// Resource name used in not-found errors ("tender", "bid")
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn version(&self) -> i32;
    fn set_version(&mut self, version: i32);
}

impl Revisioned for Tender {
    const KIND: &'static str = "tender";

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }
}

impl Revisioned for Bid {
    const KIND: &'static str = "bid";

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }
}

/// Storage contract for a versioned entity and its history table
#[async_trait]
pub trait RevisionStore<E>: Send + Sync {
    /// Load the current row by id
    async fn load(&self, id: Uuid) -> Result<Option<E>>;

    /// Append an immutable snapshot of the given state to the history table
    async fn append_revision(&self, entity: &E) -> Result<()>;

    /// Find the history snapshot recorded at `version`, if any
    async fn revision_at(&self, id: Uuid, version: i32) -> Result<Option<E>>;

    /// Persist the current row, guarded by a compare-and-swap on the
    /// version column (`WHERE version = expected_version`). Returns false
    /// when the guard did not match and nothing was written.
    async fn persist(&self, entity: &E, expected_version: i32) -> Result<bool>;
}

/// Snapshot-then-patch edit.
///
/// Load (404) -> authorize (403) -> snapshot pre-edit state -> apply the
/// patch -> version + 1 -> guarded persist. The snapshot captures the
/// version being edited away from; if the subsequent persist fails the
/// orphaned history row is tolerated, it only adds a restorable point.
pub async fn edit<E, A, P>(
    store: &dyn RevisionStore<E>,
    id: Uuid,
    authorize: A,
    apply: P,
) -> Result<E, ProcurementError>
where
    E: Revisioned + Send + Sync,
    A: FnOnce(&E) -> Result<(), ProcurementError>,
    P: FnOnce(&mut E),
{
    let mut entity = store
        .load(id)
        .await
        .map_err(|_| ProcurementError::Internal)?
        .ok_or_else(|| ProcurementError::not_found(E::KIND, id))?;

    authorize(&entity)?;

    store
        .append_revision(&entity)
        .await
        .map_err(|_| ProcurementError::Internal)?;

    let expected = entity.version();
    apply(&mut entity);
    entity.set_version(expected + 1);

    commit(store, &entity, expected).await?;
    Ok(entity)
}

/// Rollback to a historical version, recorded as a new version.
///
/// The target must exist in the history table; the current version is only
/// pushed there on the next mutation, so rolling back to the current
/// version number always fails lookup. `restore` copies the mutable fields
/// from the snapshot - never id or version.
pub async fn rollback<E, A, R>(
    store: &dyn RevisionStore<E>,
    id: Uuid,
    target_version: i32,
    authorize: A,
    restore: R,
) -> Result<E, ProcurementError>
where
    E: Revisioned + Send + Sync,
    A: FnOnce(&E) -> Result<(), ProcurementError>,
    R: FnOnce(&mut E, &E),
{
    let mut entity = store
        .load(id)
        .await
        .map_err(|_| ProcurementError::Internal)?
        .ok_or_else(|| ProcurementError::not_found(E::KIND, id))?;

    authorize(&entity)?;

    let snapshot = store
        .revision_at(id, target_version)
        .await
        .map_err(|_| ProcurementError::Internal)?
        .ok_or_else(|| {
            ProcurementError::not_found(format!("{} version", E::KIND), target_version)
        })?;

    // Preserve the version being rolled back from
    store
        .append_revision(&entity)
        .await
        .map_err(|_| ProcurementError::Internal)?;

    let expected = entity.version();
    restore(&mut entity, &snapshot);
    entity.set_version(expected + 1);

    commit(store, &entity, expected).await?;
    Ok(entity)
}

async fn commit<E>(
    store: &dyn RevisionStore<E>,
    entity: &E,
    expected: i32,
) -> Result<(), ProcurementError>
where
    E: Revisioned + Send + Sync,
{
    let stored = store
        .persist(entity, expected)
        .await
        .map_err(|_| ProcurementError::Internal)?;

    if !stored {
        // Version guard did not match: a concurrent writer got there first.
        tracing::warn!(
            kind = E::KIND,
            id = %entity.id(),
            expected_version = expected,
            "versioned write lost a concurrent update race"
        );
        return Err(ProcurementError::Internal);
    }
    Ok(())
}
