use super::backend::NodeBackend;
use crate::error::SyncError;
use crate::schema::SchemaLibrary;
use ahash::AHashSet;

/// File-management operations against the node library.
///
/// Deletions keep a per-file pending flag so concurrent operations on
/// different files never interfere, while a second delete of the same file is
/// rejected while the first is in flight.
pub struct FileManager<B: NodeBackend> {
    backend: B,
    deleting: AHashSet<String>,
}

impl<B: NodeBackend> FileManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            deleting: AHashSet::new(),
        }
    }

    pub fn is_deleting(&self, file_id: &str) -> bool {
        self.deleting.contains(file_id)
    }

    /// Marks a deletion in flight ahead of an asynchronous round-trip.
    ///
    /// The synchronous [`delete`](Self::delete) path manages its own flag;
    /// embedders that park the backend call on an event loop begin here and
    /// call [`finish_delete`](Self::finish_delete) from the response handler,
    /// during which [`is_deleting`](Self::is_deleting) reports `true` and a
    /// second delete of the same file is rejected.
    pub fn begin_delete(&mut self, file_id: &str) -> Result<(), SyncError> {
        if !self.deleting.insert(file_id.to_string()) {
            return Err(SyncError::EditInFlight {
                entity: file_id.to_string(),
            });
        }
        Ok(())
    }

    /// Clears an in-flight mark begun with [`begin_delete`](Self::begin_delete).
    pub fn finish_delete(&mut self, file_id: &str) {
        self.deleting.remove(file_id);
    }

    pub fn delete(&mut self, file_id: &str) -> Result<(), SyncError> {
        if !self.deleting.insert(file_id.to_string()) {
            return Err(SyncError::EditInFlight {
                entity: file_id.to_string(),
            });
        }
        let outcome = self.backend.delete_file(file_id);
        self.deleting.remove(file_id);
        outcome
    }

    pub fn upload(&self, file_name: &str, contents: &[u8]) -> Result<(), SyncError> {
        self.backend.upload_file(file_name, contents)
    }

    pub fn copy(&self, file_id: &str, new_name: &str) -> Result<(), SyncError> {
        self.backend.copy_file(file_id, new_name)
    }

    pub fn sync(&self) -> Result<(), SyncError> {
        self.backend.sync_files()
    }

    pub fn create_category(&self, name: &str) -> Result<(), SyncError> {
        self.backend.create_category(name)
    }

    /// Re-reads the palette listing and replaces the library wholesale.
    /// Returns `(total_files, total_nodes)` as reported by the backend.
    pub fn refresh_library(&self, library: &mut SchemaLibrary) -> Result<(u64, u64), SyncError> {
        let listing = self.backend.fetch_uploaded_nodes()?;
        let totals = (listing.total_files, listing.total_nodes);
        library.replace_all(listing.nodes);
        Ok(totals)
    }
}
