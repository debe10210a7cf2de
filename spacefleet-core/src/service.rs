//! Ship operations composed from validation, rating, filtering, and paging.

use crate::domain::{Ship, ShipDraft, ShipPatch};
use crate::error::{FleetError, Result};
use crate::filter::{ShipCriteria, filter_ships};
use crate::paging::{PageRequest, ShipOrder, paginate};
use crate::store::ShipStore;
use crate::validate::{check_ship_id, validate_for_create, validate_for_update};

/// Ship operations backed by a [`ShipStore`].
#[derive(Debug, Clone)]
pub struct ShipService<S: ShipStore> {
    store: S,
}

impl<S: ShipStore> ShipService<S> {
    /// Create a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a draft, derive its rating, and persist it.
    pub fn create(&self, draft: ShipDraft) -> Result<Ship> {
        let ship = validate_for_create(draft)?;
        self.store.insert(ship)
    }

    /// Apply a partial update to an existing ship.
    pub fn update(&self, id: i64, patch: ShipPatch) -> Result<Ship> {
        let existing = self.get(id)?;
        let updated = validate_for_update(&existing, patch)?;
        self.store.save(updated)
    }

    /// Remove a ship, failing when it does not exist.
    pub fn delete(&self, id: i64) -> Result<()> {
        let id = check_ship_id(id)?;
        if !self.store.exists_by_id(id)? {
            return Err(FleetError::NotFound(id));
        }
        self.store.delete_by_id(id)
    }

    /// Fetch a ship by identifier.
    pub fn get(&self, id: i64) -> Result<Ship> {
        let id = check_ship_id(id)?;
        self.store.find_by_id(id)?.ok_or(FleetError::NotFound(id))
    }

    /// Filter, sort, and page the stored ships.
    pub fn list(
        &self,
        criteria: &ShipCriteria,
        order: ShipOrder,
        page: PageRequest,
    ) -> Result<Vec<Ship>> {
        let ships = filter_ships(self.store.find_all()?, criteria);
        Ok(paginate(ships, order, page))
    }

    /// Number of stored ships matching the criteria, ignoring paging.
    pub fn count(&self, criteria: &ShipCriteria) -> Result<usize> {
        Ok(filter_ships(self.store.find_all()?, criteria).len())
    }
}
