use rusqlite::{Connection, TransactionBehavior, params};
use std::path::Path;
use std::time::Duration;

use super::{IdentityRecord, LedgerError, index::LedgerEntry};
use crate::config::{IDENTITY_TABLE, SCHEMA_VERSION};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open or create the ledger database at `path`. A fresh database gets its
/// table and version stamp inside one transaction.
pub(crate) fn open(path: &Path) -> Result<Connection, LedgerError> {
    let mut conn = Connection::open(path).map_err(|e| open_err(&e))?;
    configure_connection(&conn).map_err(|e| open_err(&e))?;
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| open_err(&e))?;

    match version {
        0 => {
            let tx = conn.transaction().map_err(|e| open_err(&e))?;
            tx.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {IDENTITY_TABLE} (
                    id   TEXT NOT NULL PRIMARY KEY,
                    data BLOB NOT NULL
                );
                PRAGMA user_version = {SCHEMA_VERSION};"
            ))
            .map_err(|e| open_err(&e))?;
            tx.commit().map_err(|e| open_err(&e))?;
            tracing::info!(path = %path.display(), "Created identity ledger");
        }
        SCHEMA_VERSION => {}
        other => {
            return Err(LedgerError::Open(format!(
                "unsupported schema version {other} (expected {SCHEMA_VERSION})"
            )));
        }
    }
    Ok(conn)
}

/// WAL lets `--list` read while the adapter writes; writers wait out each
/// other instead of failing with "database is locked".
fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.pragma_update(None, "synchronous", "FULL")
}

/// Upsert `record` under `id` in a single read-write transaction.
pub(crate) fn put(
    conn: &mut Connection,
    id: &str,
    record: &IdentityRecord,
) -> Result<(), LedgerError> {
    let mut data = Vec::new();
    ciborium::into_writer(record, &mut data)
        .map_err(|e| LedgerError::Serialization(e.to_string()))?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| tx_err(&e))?;
    tx.execute(
        &format!(
            "INSERT INTO {IDENTITY_TABLE} (id, data) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data"
        ),
        params![id, data],
    )
    .map_err(|e| tx_err(&e))?;
    tx.commit().map_err(|e| tx_err(&e))
}

/// Forward scan of every entry in key order. Any row error discards what
/// was read so far. The connection is `query_only` for the duration.
pub(crate) fn scan_all(conn: &mut Connection) -> Result<Vec<LedgerEntry>, LedgerError> {
    conn.pragma_update(None, "query_only", true)
        .map_err(|e| tx_err(&e))?;
    let result = read_entries(conn);
    conn.pragma_update(None, "query_only", false)
        .map_err(|e| tx_err(&e))?;
    result
}

fn read_entries(conn: &mut Connection) -> Result<Vec<LedgerEntry>, LedgerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Deferred)
        .map_err(|e| tx_err(&e))?;

    let entries = {
        let mut stmt = tx
            .prepare(&format!("SELECT id, data FROM {IDENTITY_TABLE} ORDER BY id"))
            .map_err(|e| cursor_err(&e))?;
        let mut rows = stmt.query([]).map_err(|e| cursor_err(&e))?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().map_err(|e| cursor_err(&e))? {
            let id: String = row.get(0).map_err(|e| cursor_err(&e))?;
            let data: Vec<u8> = row.get(1).map_err(|e| cursor_err(&e))?;
            let record: IdentityRecord = ciborium::from_reader(data.as_slice())
                .map_err(|e| LedgerError::Serialization(format!("{id}: {e}")))?;
            entries.push(LedgerEntry { id, record });
        }
        entries
    };

    tx.commit().map_err(|e| tx_err(&e))?;
    Ok(entries)
}

fn open_err(err: &rusqlite::Error) -> LedgerError {
    LedgerError::Open(err.to_string())
}

fn tx_err(err: &rusqlite::Error) -> LedgerError {
    LedgerError::Transaction(err.to_string())
}

fn cursor_err(err: &rusqlite::Error) -> LedgerError {
    LedgerError::Cursor(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, user: &str) -> IdentityRecord {
        IdentityRecord {
            credential_id: id.to_string(),
            rp_display_name: "Example".into(),
            user_display_name: user.into(),
            user_id: format!("{user}-id"),
            account_name: None,
            account_image_uri: None,
        }
    }

    #[test]
    fn test_open_stamps_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(&dir.path().join("ledger.db")).unwrap();
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_open_enables_wal() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(&dir.path().join("ledger.db")).unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_open_rejects_newer_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("PRAGMA user_version = 7;")
            .unwrap();

        let err = open(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Open(msg) if msg.contains("7")));
    }

    #[test]
    fn test_open_garbage_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        std::fs::write(&path, vec![0x5a; 4096]).unwrap();
        assert!(matches!(open(&path), Err(LedgerError::Open(_))));
    }

    #[test]
    fn test_put_upserts() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = open(&dir.path().join("ledger.db")).unwrap();

        put(&mut conn, "cred-1", &record("cred-1", "alice")).unwrap();
        put(&mut conn, "cred-1", &record("cred-1", "bob")).unwrap();

        let entries = scan_all(&mut conn).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].record.user_display_name, "bob");
    }

    #[test]
    fn test_scan_is_key_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = open(&dir.path().join("ledger.db")).unwrap();

        for id in ["c", "a", "b"] {
            put(&mut conn, id, &record(id, "user")).unwrap();
        }

        let ids: Vec<_> = scan_all(&mut conn).unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_scan_leaves_connection_writable() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = open(&dir.path().join("ledger.db")).unwrap();
        put(&mut conn, "a", &record("a", "alice")).unwrap();

        scan_all(&mut conn).unwrap();
        let query_only: bool = conn
            .query_row("PRAGMA query_only", [], |row| row.get(0))
            .unwrap();
        assert!(!query_only);

        put(&mut conn, "b", &record("b", "bob")).unwrap();
        assert_eq!(scan_all(&mut conn).unwrap().len(), 2);
    }

    #[test]
    fn test_query_only_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(&dir.path().join("ledger.db")).unwrap();
        conn.pragma_update(None, "query_only", true).unwrap();
        let err = conn
            .execute(&format!("DELETE FROM {IDENTITY_TABLE}"), [])
            .unwrap_err();
        assert!(err.to_string().contains("readonly"), "got {err}");
    }

    #[test]
    fn test_scan_undecodable_row_discards_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = open(&dir.path().join("ledger.db")).unwrap();
        put(&mut conn, "a", &record("a", "alice")).unwrap();
        conn.execute(
            &format!("INSERT INTO {IDENTITY_TABLE} (id, data) VALUES ('b', x'ff00')"),
            [],
        )
        .unwrap();

        let err = scan_all(&mut conn).unwrap_err();
        assert!(matches!(err, LedgerError::Serialization(msg) if msg.starts_with("b:")));
    }
}
