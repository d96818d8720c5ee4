use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::{IdentityRecord, InitGate, InitPhase, LedgerError, db};

/// One `{id, data}` pair as read back from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id:     String,
    pub record: IdentityRecord,
}

type Handle = Arc<Mutex<Option<Connection>>>;

/// Durable store of the identities registered through the adapter.
///
/// The database is opened lazily on the first `store` or `get_all` and at
/// most once at a time; see [`InitGate`].
pub struct IdentityLedger {
    path:   PathBuf,
    handle: Handle,
    gate:   InitGate<()>,
}

impl IdentityLedger {
    /// Create a ledger backed by the database file at `path`. Nothing is
    /// touched on disk until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: Arc::new(Mutex::new(None)),
            gate: InitGate::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn phase(&self) -> InitPhase {
        self.gate.phase()
    }

    /// Upsert `record` under `id`.
    pub async fn store(&self, id: &str, record: IdentityRecord) -> Result<(), LedgerError> {
        self.ready().await?;
        let key = id.to_string();
        with_connection(&self.handle, move |conn| db::put(conn, &key, &record)).await?;
        tracing::debug!(cred_id = id, "Identity stored");
        Ok(())
    }

    /// Every stored entry, in key order.
    pub async fn get_all(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        self.ready().await?;
        let entries = with_connection(&self.handle, db::scan_all).await?;
        tracing::debug!(count = entries.len(), "Identities loaded");
        Ok(entries)
    }

    /// Release the database handle. Later operations fail with
    /// [`LedgerError::Unavailable`].
    pub fn close(&self) {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    async fn ready(&self) -> Result<(), LedgerError> {
        let path = self.path.clone();
        let handle = self.handle.clone();
        self.gate
            .get_or_init(move || async move {
                let result = tokio::task::spawn_blocking(move || {
                    let conn = db::open(&path)?;
                    *handle.lock().unwrap_or_else(PoisonError::into_inner) = Some(conn);
                    Ok::<(), LedgerError>(())
                })
                .await
                .map_err(|e| LedgerError::Task(e.to_string()))?;
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "Identity ledger initialization failed");
                }
                result
            })
            .await
    }
}

/// Run `op` against the open connection on the blocking pool.
async fn with_connection<T, F>(handle: &Handle, op: F) -> Result<T, LedgerError>
where
    T: Send + 'static,
    F: FnOnce(&mut Connection) -> Result<T, LedgerError> + Send + 'static,
{
    let handle = handle.clone();
    tokio::task::spawn_blocking(move || {
        let mut guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
        let conn = guard.as_mut().ok_or(LedgerError::Unavailable)?;
        op(conn)
    })
    .await
    .map_err(|e| LedgerError::Task(e.to_string()))?
}
