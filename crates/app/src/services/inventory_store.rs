//! Inventory store — the caller-owned snapshot of the equipment list.
//!
//! The store is a display cache: it is never consulted when deciding whether a
//! unit can be reserved. Reservations always re-read the row through the
//! gateway.

use lendstock_domain::equipment::Equipment;
use lendstock_domain::error::LendError;
use lendstock_domain::id::EquipmentId;

use crate::ports::DataGateway;

/// Last-fetched equipment rows, ordered by name.
pub struct InventoryStore<G> {
    gateway: G,
    snapshot: Vec<Equipment>,
    loaded: bool,
}

impl<G: DataGateway> InventoryStore<G> {
    /// Create an empty store backed by the given gateway.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            snapshot: Vec::new(),
            loaded: false,
        }
    }

    /// Fetch all equipment and replace the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the previous snapshot is left intact.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&[Equipment], LendError> {
        let mut fresh = self.gateway.list_equipment().await.inspect_err(|err| {
            tracing::warn!(error = %err, "inventory refresh failed, keeping previous snapshot");
        })?;
        fresh.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(items = fresh.len(), "inventory refreshed");
        self.snapshot = fresh;
        self.loaded = true;
        Ok(&self.snapshot)
    }

    /// Cached row for `id`, if the last refresh saw it.
    #[must_use]
    pub fn find_by_id(&self, id: EquipmentId) -> Option<&Equipment> {
        self.snapshot.iter().find(|e| e.id == id)
    }

    /// The whole snapshot.
    #[must_use]
    pub fn equipment(&self) -> &[Equipment] {
        &self.snapshot
    }

    /// Whether at least one refresh succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
