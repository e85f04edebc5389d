//! Single-entry TTL cache for the full employee list.
//!
//! The cache holds at most one [`Snapshot`]. Population is single-flight:
//! concurrent callers that miss queue behind one gate, and every caller after
//! the first finds the freshly stored snapshot instead of calling upstream
//! again. A failed population is never cached and never falls back to stale
//! data.
//!
//! Invalidation bumps a generation counter. A population that started before
//! an invalidation still answers its own caller but is not stored, so the
//! next read after a write goes back upstream.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use mockable::Clock;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Employee, Error, Snapshot};

/// Default time a snapshot stays fresh.
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(30);

/// Cache of the whole employee list.
pub struct SnapshotCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    current: RwLock<Slot>,
    populate_gate: Mutex<()>,
    generation: AtomicU64,
}

#[derive(Default)]
struct Slot {
    snapshot: Option<Arc<Snapshot>>,
}

impl SnapshotCache {
    /// Build an empty cache whose snapshots expire after `ttl`.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            current: RwLock::new(Slot::default()),
            populate_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the fresh snapshot, or run `populate` to build one.
    ///
    /// `populate` runs at most once per call and never concurrently with
    /// another population on the same cache. Its error is returned unchanged.
    pub async fn get_or_populate<F, Fut>(&self, populate: F) -> Result<Arc<Snapshot>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Employee>, Error>>,
    {
        if let Some(snapshot) = self.fresh_snapshot()? {
            return Ok(snapshot);
        }

        let _gate = self.populate_gate.lock().await;
        if let Some(snapshot) = self.fresh_snapshot()? {
            return Ok(snapshot);
        }

        let started_at = self.generation.load(Ordering::SeqCst);
        let entries = populate().await?;
        let snapshot = Arc::new(Snapshot::new(entries, self.clock.utc()));

        let mut slot = self.write_slot()?;
        if self.generation.load(Ordering::SeqCst) == started_at {
            slot.snapshot = Some(Arc::clone(&snapshot));
            debug!(
                entries = snapshot.entries().len(),
                generation = started_at,
                "snapshot cache populated"
            );
        } else {
            debug!(
                generation = started_at,
                "snapshot cache invalidated during population; result not stored"
            );
        }
        Ok(snapshot)
    }

    /// Discard the current snapshot so the next read repopulates.
    pub fn invalidate(&self) -> Result<(), Error> {
        let mut slot = self.write_slot()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        slot.snapshot = None;
        debug!(generation, "snapshot cache invalidated");
        Ok(())
    }

    fn fresh_snapshot(&self) -> Result<Option<Arc<Snapshot>>, Error> {
        let slot = self
            .current
            .read()
            .map_err(|_| Error::unexpected("snapshot cache lock poisoned"))?;
        let now = self.clock.utc();
        Ok(slot
            .snapshot
            .as_ref()
            .filter(|snapshot| snapshot.is_fresh(now, self.ttl))
            .map(Arc::clone))
    }

    fn write_slot(&self) -> Result<std::sync::RwLockWriteGuard<'_, Slot>, Error> {
        self.current
            .write()
            .map_err(|_| Error::unexpected("snapshot cache lock poisoned"))
    }
}
