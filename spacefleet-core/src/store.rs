//! Record store abstraction and the in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{NewShip, Ship};
use crate::error::{FleetError, Result};

/// Persistence operations the ship service relies on.
#[cfg_attr(test, mockall::automock)]
pub trait ShipStore {
    /// Persist a new ship and return it with its assigned identifier.
    fn insert(&self, ship: NewShip) -> Result<Ship>;
    /// Overwrite an existing ship; a missing identifier is `NotFound`.
    fn save(&self, ship: Ship) -> Result<Ship>;
    /// Look up a ship by identifier.
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>>;
    /// Whether a ship with the identifier exists.
    fn exists_by_id(&self, id: i64) -> Result<bool>;
    /// Remove a ship by identifier.
    fn delete_by_id(&self, id: i64) -> Result<()>;
    /// Every stored ship in ascending identifier order.
    fn find_all(&self) -> Result<Vec<Ship>>;
}

impl<T: ShipStore + ?Sized> ShipStore for Arc<T> {
    fn insert(&self, ship: NewShip) -> Result<Ship> {
        (**self).insert(ship)
    }

    fn save(&self, ship: Ship) -> Result<Ship> {
        (**self).save(ship)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        (**self).find_by_id(id)
    }

    fn exists_by_id(&self, id: i64) -> Result<bool> {
        (**self).exists_by_id(id)
    }

    fn delete_by_id(&self, id: i64) -> Result<()> {
        (**self).delete_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Ship>> {
        (**self).find_all()
    }
}

#[derive(Debug)]
struct Inner {
    ships: BTreeMap<i64, Ship>,
    next_id: i64,
}

/// Ship store kept entirely in process memory.
#[derive(Debug)]
pub struct InMemoryShipStore {
    inner: RwLock<Inner>,
}

impl InMemoryShipStore {
    /// Create an empty store whose first identifier is 1.
    pub fn new() -> Self {
        Self::from_ships(Vec::new())
    }

    /// Create a store pre-populated with ships; new identifiers continue after the largest one.
    pub fn from_ships(ships: impl IntoIterator<Item = Ship>) -> Self {
        let ships: BTreeMap<i64, Ship> = ships.into_iter().map(|ship| (ship.id, ship)).collect();
        let next_id = ships.keys().next_back().map_or(1, |id| id + 1);
        Self {
            inner: RwLock::new(Inner { ships, next_id }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| FleetError::storage("ship store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| FleetError::storage("ship store lock poisoned"))
    }
}

impl Default for InMemoryShipStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipStore for InMemoryShipStore {
    fn insert(&self, ship: NewShip) -> Result<Ship> {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let ship = ship.with_id(id);
        inner.ships.insert(id, ship.clone());
        Ok(ship)
    }

    fn save(&self, ship: Ship) -> Result<Ship> {
        let mut inner = self.write()?;
        let slot = inner
            .ships
            .get_mut(&ship.id)
            .ok_or(FleetError::NotFound(ship.id))?;
        *slot = ship.clone();
        Ok(ship)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        Ok(self.read()?.ships.get(&id).cloned())
    }

    fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.read()?.ships.contains_key(&id))
    }

    fn delete_by_id(&self, id: i64) -> Result<()> {
        self.write()?.ships.remove(&id);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Ship>> {
        Ok(self.read()?.ships.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryShipStore, ShipStore};
    use crate::domain::{NewShip, ShipType};
    use crate::error::FleetError;
    use chrono::{TimeZone, Utc};

    fn new_ship(name: &str) -> NewShip {
        NewShip {
            name: name.to_string(),
            planet: "Io".to_string(),
            ship_type: ShipType::Transport,
            prod_date: Utc.with_ymd_and_hms(2990, 2, 2, 0, 0, 0).unwrap(),
            is_used: false,
            speed: 0.3,
            crew_size: 4,
            rating: 0.8,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = InMemoryShipStore::new();
        let first = store.insert(new_ship("A")).expect("insert");
        let second = store.insert(new_ship("B")).expect("insert");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.find_all().expect("all").len(), 2);
    }

    #[test]
    fn save_overwrites_and_delete_removes() {
        let store = InMemoryShipStore::new();
        let mut ship = store.insert(new_ship("A")).expect("insert");
        ship.name = "Renamed".to_string();
        store.save(ship.clone()).expect("save");

        assert_eq!(
            store.find_by_id(ship.id).expect("find").map(|ship| ship.name),
            Some("Renamed".to_string())
        );

        store.delete_by_id(ship.id).expect("delete");
        assert!(!store.exists_by_id(ship.id).expect("exists"));
        assert!(store.find_by_id(ship.id).expect("find").is_none());
    }

    #[test]
    fn save_of_unknown_id_is_not_found() {
        let store = InMemoryShipStore::new();
        store.insert(new_ship("A")).expect("insert");

        let result = store.save(new_ship("Ghost").with_id(42));

        assert_eq!(result, Err(FleetError::NotFound(42)));
        assert!(!store.exists_by_id(42).expect("exists"));
        assert_eq!(store.insert(new_ship("B")).expect("insert").id, 2);
    }

    #[test]
    fn seeded_store_continues_after_largest_id() {
        let seeded = vec![new_ship("A").with_id(3), new_ship("B").with_id(9)];
        let store = InMemoryShipStore::from_ships(seeded);

        let ship = store.insert(new_ship("C")).expect("insert");
        assert_eq!(ship.id, 10);

        let ids: Vec<i64> = store
            .find_all()
            .expect("all")
            .iter()
            .map(|ship| ship.id)
            .collect();
        assert_eq!(ids, vec![3, 9, 10]);
    }
}
