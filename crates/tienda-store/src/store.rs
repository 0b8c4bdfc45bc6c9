//! # JSON Document Store
//!
//! Whole-document persistence for the three collections, plus the
//! [`Database`] handle that owns the per-collection mutexes and hands out
//! repositories.
//!
//! ## Write Protocol
//!
//! A write never touches the live document directly. The new content is
//! first staged to a sibling temp file, then promoted with a rename. A
//! multi-collection operation stages every document before promoting any of
//! them, so a failure during staging leaves all live documents untouched.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::repository::producto::ProductoRepository;
use crate::repository::usuario::UsuarioRepository;
use crate::repository::venta::VentaRepository;

// =============================================================================
// Collections
// =============================================================================

/// The three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Productos,
    Usuarios,
    Ventas,
}

impl Collection {
    /// All collections, in canonical lock order.
    pub const ALL: [Collection; 3] = [
        Collection::Productos,
        Collection::Usuarios,
        Collection::Ventas,
    ];

    /// Collection name as used in paths and log lines.
    pub const fn name(self) -> &'static str {
        match self {
            Collection::Productos => "productos",
            Collection::Usuarios => "usuarios",
            Collection::Ventas => "ventas",
        }
    }

    /// File name of the backing document.
    pub const fn file_name(self) -> &'static str {
        match self {
            Collection::Productos => "productos.json",
            Collection::Usuarios => "usuarios.json",
            Collection::Ventas => "ventas.json",
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data").create_missing(true);
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the collection documents.
    pub data_dir: PathBuf,

    /// Create the directory and empty `[]` documents for absent
    /// collections when the database is opened. Default: true.
    pub create_missing: bool,
}

impl StoreConfig {
    /// Creates a configuration rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            create_missing: true,
        }
    }

    /// Sets whether absent collections are created on open.
    pub fn create_missing(mut self, create: bool) -> Self {
        self.create_missing = create;
        self
    }
}

// =============================================================================
// JsonStore
// =============================================================================

/// Generic read/write of the collection documents. No business logic.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

/// A staged document: serialized and written to a temp file, not yet
/// promoted over the live document.
#[derive(Debug)]
pub struct StagedWrite {
    collection: Collection,
    tmp: PathBuf,
    dest: PathBuf,
}

impl JsonStore {
    /// Creates a store over the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        JsonStore {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Reads a collection in full.
    ///
    /// ## Errors
    /// * [`StoreError::Missing`] - backing document does not exist
    /// * [`StoreError::Corrupt`] - document is not a JSON array of records
    pub async fn read<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let raw = fs::read_to_string(self.path(collection))
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => StoreError::Missing(collection),
                _ => StoreError::Io { collection, source },
            })?;

        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { collection, source })
    }

    /// Serializes a collection's new content to its temp file.
    ///
    /// The live document is untouched until [`JsonStore::commit`] promotes
    /// the returned stage.
    pub async fn stage<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> StoreResult<StagedWrite> {
        let payload = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::Corrupt { collection, source })?;

        let dest = self.path(collection);
        let tmp = self.data_dir.join(format!("{}.tmp", collection.file_name()));
        fs::write(&tmp, payload)
            .await
            .map_err(|source| StoreError::Io { collection, source })?;

        debug!(collection = collection.name(), records = records.len(), "Staged");
        Ok(StagedWrite {
            collection,
            tmp,
            dest,
        })
    }

    /// Promotes staged documents over the live ones.
    ///
    /// All stages were written before the first rename runs, so a staging
    /// failure can never leave the collections half-updated.
    pub async fn commit(&self, staged: Vec<StagedWrite>) -> StoreResult<()> {
        for stage in staged {
            fs::rename(&stage.tmp, &stage.dest)
                .await
                .map_err(|source| StoreError::Io {
                    collection: stage.collection,
                    source,
                })?;
            debug!(collection = stage.collection.name(), "Committed");
        }
        Ok(())
    }

    /// Replaces a single collection's full contents (stage + commit).
    pub async fn write<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> StoreResult<()> {
        let staged = self.stage(collection, records).await?;
        self.commit(vec![staged]).await
    }

    /// Creates the data directory and an empty document for every absent
    /// collection. Idempotent; existing documents are never touched.
    pub async fn ensure_collections(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Io {
                collection: Collection::Productos,
                source,
            })?;

        for collection in Collection::ALL {
            let path = self.path(collection);
            let exists = fs::try_exists(&path)
                .await
                .map_err(|source| StoreError::Io { collection, source })?;
            if !exists {
                info!(collection = collection.name(), "Creating empty collection");
                self.write::<serde_json::Value>(collection, &[]).await?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Database
// =============================================================================

/// One mutex per collection.
///
/// Lock order is canonical - productos, then usuarios, then ventas - and
/// every repository acquires in that order, which rules out deadlock
/// between multi-collection operations.
#[derive(Debug, Default)]
struct CollectionLocks {
    productos: Mutex<()>,
    usuarios: Mutex<()>,
    ventas: Mutex<()>,
}

/// Main database handle providing repository access.
///
/// Cloning is cheap; all clones share the same lock set, so mutual
/// exclusion holds across every repository created from the same handle.
#[derive(Debug, Clone)]
pub struct Database {
    store: JsonStore,
    locks: std::sync::Arc<CollectionLocks>,
}

impl Database {
    /// Opens the database over the configured data directory.
    ///
    /// With `create_missing` set, absent collection documents are created
    /// empty before the first repository call can observe them.
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening document store");

        let store = JsonStore::new(config.data_dir.clone());
        if config.create_missing {
            store.ensure_collections().await?;
        }

        Ok(Database {
            store,
            locks: std::sync::Arc::default(),
        })
    }

    /// Returns the underlying document store.
    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// Returns the catalog repository.
    pub fn productos(&self) -> ProductoRepository {
        ProductoRepository::new(self.clone())
    }

    /// Returns the account repository.
    pub fn usuarios(&self) -> UsuarioRepository {
        UsuarioRepository::new(self.clone())
    }

    /// Returns the sales repository.
    pub fn ventas(&self) -> VentaRepository {
        VentaRepository::new(self.clone())
    }

    /// Checks that every collection can be read.
    pub async fn health_check(&self) -> bool {
        for collection in Collection::ALL {
            if self
                .store
                .read::<serde_json::Value>(collection)
                .await
                .is_err()
            {
                return false;
            }
        }
        true
    }

    // Lock acquisition, in canonical order. A repository operation takes
    // the guard of every collection it reads-for-validation or writes and
    // holds them across its whole read-modify-write sequence.

    pub(crate) async fn lock_productos(&self) -> MutexGuard<'_, ()> {
        self.locks.productos.lock().await
    }

    pub(crate) async fn lock_usuarios(&self) -> MutexGuard<'_, ()> {
        self.locks.usuarios.lock().await
    }

    pub(crate) async fn lock_ventas(&self) -> MutexGuard<'_, ()> {
        self.locks.ventas.lock().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(StoreConfig::new(dir.path())).await.unwrap();

        assert!(db.health_check().await);
        for collection in Collection::ALL {
            let rows: Vec<serde_json::Value> = db.store().read(collection).await.unwrap();
            assert!(rows.is_empty());
        }
    }

    #[tokio::test]
    async fn test_read_missing_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let err = store
            .read::<serde_json::Value>(Collection::Ventas)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Missing(Collection::Ventas)));
    }

    #[tokio::test]
    async fn test_read_corrupt_collection() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("ventas.json"), "not json")
            .await
            .unwrap();

        let store = JsonStore::new(dir.path());
        let err = store
            .read::<serde_json::Value>(Collection::Ventas)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_write_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        store
            .write(Collection::Productos, &[serde_json::json!({"id": 1})])
            .await
            .unwrap();
        store
            .write(Collection::Productos, &[serde_json::json!({"id": 2})])
            .await
            .unwrap();

        let rows: Vec<serde_json::Value> = store.read(Collection::Productos).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], 2);
    }

    #[tokio::test]
    async fn test_staged_commit_promotes_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let staged = vec![
            store
                .stage(Collection::Ventas, &[serde_json::json!({"id": 4001})])
                .await
                .unwrap(),
            store
                .stage(Collection::Productos, &[serde_json::json!({"id": 1})])
                .await
                .unwrap(),
        ];

        // Nothing visible before commit.
        assert!(store
            .read::<serde_json::Value>(Collection::Ventas)
            .await
            .is_err());

        store.commit(staged).await.unwrap();

        let ventas: Vec<serde_json::Value> = store.read(Collection::Ventas).await.unwrap();
        let productos: Vec<serde_json::Value> = store.read(Collection::Productos).await.unwrap();
        assert_eq!(ventas[0]["id"], 4001);
        assert_eq!(productos[0]["id"], 1);
    }
}
