//! Durable per-customer record storage.
//!
//! One row per registered customer: identity attributes, the customer key
//! pair, and the issued certificate. The store's primary-key constraint on
//! the external id is the sole serialization point for concurrent
//! registrations; no application-level locking is added on top.
//!
//! Connections are opened per invocation and released on drop. The
//! process performs one registration and exits, so there is no pooling.

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, ErrorCode};

use crate::error::{VouchError, VouchResult};
use crate::keypair::KeyPair;

/// A registered customer as persisted server-side.
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    /// Unique customer-facing identifier (e.g. a national identifier
    /// number). Doubles as the bundle file name.
    pub external_id: String,
    pub display_name: String,
    pub key_pair: KeyPair,
    pub certificate: String,
}

pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the registry database at the given path.
    ///
    /// A bounded busy timeout is set so a locked database fails the
    /// operation instead of hanging it.
    pub fn connect(path: &Path, busy_timeout: Duration) -> VouchResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| VouchError::Connection(format!("failed to open {}: {e}", path.display())))?;

        conn.busy_timeout(busy_timeout)
            .map_err(|e| VouchError::Connection(format!("failed to set busy timeout: {e}")))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS customers (
                external_id TEXT PRIMARY KEY NOT NULL,
                display_name TEXT NOT NULL,
                private_pem TEXT NOT NULL,
                public_pem TEXT NOT NULL,
                certificate TEXT NOT NULL,
                created_at TEXT DEFAULT (datetime('now'))
            );",
        )
        .map_err(|e| VouchError::Connection(format!("failed to create tables: {e}")))?;

        tracing::debug!(path = %path.display(), "record store connected");
        Ok(Self { conn })
    }

    /// Insert one customer record.
    ///
    /// Called only after all cryptographic material has been computed, so a
    /// store failure never leaves key material without a matching export
    /// path. A duplicate external id is rejected by the primary key.
    pub fn save(&self, record: &CustomerRecord) -> VouchResult<()> {
        self.conn
            .execute(
                "INSERT INTO customers
                    (external_id, display_name, private_pem, public_pem, certificate)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.external_id,
                    record.display_name,
                    record.key_pair.private_pem,
                    record.key_pair.public_pem,
                    record.certificate,
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    VouchError::Persistence(format!(
                        "external id '{}' is already registered",
                        record.external_id
                    ))
                }
                other => VouchError::Persistence(format!("insert failed: {other}")),
            })?;

        tracing::info!(external_id = %record.external_id, "customer record saved");
        Ok(())
    }

    /// Fetch a customer record by external id.
    pub fn find(&self, external_id: &str) -> VouchResult<Option<CustomerRecord>> {
        let result = self.conn.query_row(
            "SELECT external_id, display_name, private_pem, public_pem, certificate
             FROM customers WHERE external_id = ?1",
            params![external_id],
            |row| {
                Ok(CustomerRecord {
                    external_id: row.get(0)?,
                    display_name: row.get(1)?,
                    key_pair: KeyPair {
                        private_pem: row.get(2)?,
                        public_pem: row.get(3)?,
                    },
                    certificate: row.get(4)?,
                })
            },
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(VouchError::Persistence(format!("query failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_millis(500);

    fn test_record(external_id: &str) -> CustomerRecord {
        CustomerRecord {
            external_id: external_id.to_string(),
            display_name: "Jane Doe".to_string(),
            key_pair: KeyPair {
                public_pem: "pub-pem".to_string(),
                private_pem: "priv-pem".to_string(),
            },
            certificate: "cert-value".to_string(),
        }
    }

    #[test]
    fn save_then_find_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::connect(&dir.path().join("registry.db"), TIMEOUT).unwrap();

        store.save(&test_record("123456789")).unwrap();
        let found = store.find("123456789").unwrap().unwrap();
        assert_eq!(found.display_name, "Jane Doe");
        assert_eq!(found.certificate, "cert-value");
        assert_eq!(found.key_pair.public_pem, "pub-pem");
    }

    #[test]
    fn find_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::connect(&dir.path().join("registry.db"), TIMEOUT).unwrap();
        assert!(store.find("000000000").unwrap().is_none());
    }

    #[test]
    fn duplicate_external_id_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::connect(&dir.path().join("registry.db"), TIMEOUT).unwrap();

        store.save(&test_record("123456789")).unwrap();
        match store.save(&test_record("123456789")) {
            Err(VouchError::Persistence(msg)) => assert!(msg.contains("already registered")),
            other => panic!("expected Persistence, got {other:?}"),
        }
    }

    #[test]
    fn unreachable_path_is_connection_error() {
        match RecordStore::connect(Path::new("/nonexistent/dir/registry.db"), TIMEOUT) {
            Err(VouchError::Connection(_)) => {}
            other => panic!("expected Connection, got {:?}", other.err()),
        }
    }
}
