//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use lendstock_app::ports::{DataGateway, IntegrityReporter};
use lendstock_app::services::cancellation_workflow::CancellationWorkflow;
use lendstock_app::services::equipment_service::EquipmentService;
use lendstock_app::services::inventory_store::InventoryStore;
use lendstock_app::services::person_service::PersonService;
use lendstock_app::services::rental_workflow::RentalWorkflow;

/// Application state shared across all axum handlers.
///
/// Generic over the gateway and the integrity channel to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<G, R> {
    /// Equipment snapshot served to the stock screen.
    pub inventory: Arc<RwLock<InventoryStore<G>>>,
    /// Equipment administration.
    pub equipment_service: Arc<EquipmentService<G>>,
    /// Lender directory.
    pub person_service: Arc<PersonService<G>>,
    /// Rental creation and listing.
    pub rental_workflow: Arc<RentalWorkflow<G, R>>,
    /// Rental cancellation.
    pub cancellation_workflow: Arc<CancellationWorkflow<G, R>>,
}

impl<G, R> Clone for AppState<G, R> {
    fn clone(&self) -> Self {
        Self {
            inventory: Arc::clone(&self.inventory),
            equipment_service: Arc::clone(&self.equipment_service),
            person_service: Arc::clone(&self.person_service),
            rental_workflow: Arc::clone(&self.rental_workflow),
            cancellation_workflow: Arc::clone(&self.cancellation_workflow),
        }
    }
}

impl<G, R> AppState<G, R>
where
    G: DataGateway + Clone + Send + Sync + 'static,
    R: IntegrityReporter + Clone + Send + Sync + 'static,
{
    /// Wire every service onto one gateway and one integrity channel.
    pub fn new(gateway: G, integrity: R) -> Self {
        Self {
            inventory: Arc::new(RwLock::new(InventoryStore::new(gateway.clone()))),
            equipment_service: Arc::new(EquipmentService::new(gateway.clone())),
            person_service: Arc::new(PersonService::new(gateway.clone())),
            rental_workflow: Arc::new(RentalWorkflow::new(gateway.clone(), integrity.clone())),
            cancellation_workflow: Arc::new(CancellationWorkflow::new(gateway, integrity)),
        }
    }
}

impl<G, R> AppState<G, R>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    /// Reload the inventory snapshot after a mutation.
    ///
    /// A failed refresh keeps the previous snapshot; the store logs it.
    pub async fn refresh_inventory(&self) {
        let mut inventory = self.inventory.write().await;
        if inventory.refresh().await.is_err() {
            tracing::debug!("serving stale inventory snapshot");
        }
    }
}
