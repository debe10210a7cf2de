//! PostgreSQL-backed ship store.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use spacefleet_core::{FleetError, NewShip, Ship, ShipStore};

use crate::db::DbPool;
use crate::models::{NewShipRow, ShipRow};
use crate::schema::ships;

type PooledPg = PooledConnection<ConnectionManager<PgConnection>>;

/// Ship store persisting into the `ships` table.
#[derive(Clone)]
pub struct PgShipStore {
    pool: DbPool,
}

impl PgShipStore {
    /// Create a store over an initialized pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledPg, FleetError> {
        self.pool
            .get()
            .map_err(|err| FleetError::storage(format!("failed to fetch connection: {err}")))
    }
}

// Logged once at the HTTP boundary by `routes::error_response`.
fn query_error(err: diesel::result::Error) -> FleetError {
    FleetError::storage(format!("ship query failed: {err}"))
}

impl ShipStore for PgShipStore {
    fn insert(&self, ship: NewShip) -> Result<Ship, FleetError> {
        let mut conn = self.conn()?;
        let row: ShipRow = diesel::insert_into(ships::table)
            .values(NewShipRow::from(ship))
            .returning(ShipRow::as_returning())
            .get_result(&mut conn)
            .map_err(query_error)?;
        Ship::try_from(row)
    }

    fn save(&self, ship: Ship) -> Result<Ship, FleetError> {
        let mut conn = self.conn()?;
        let id = ship.id;
        let row: Option<ShipRow> = diesel::update(ships::table.find(id))
            .set(NewShipRow::from(ship))
            .returning(ShipRow::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(query_error)?;
        row.ok_or(FleetError::NotFound(id)).and_then(Ship::try_from)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>, FleetError> {
        let mut conn = self.conn()?;
        ships::table
            .find(id)
            .select(ShipRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(query_error)?
            .map(Ship::try_from)
            .transpose()
    }

    fn exists_by_id(&self, id: i64) -> Result<bool, FleetError> {
        let mut conn = self.conn()?;
        diesel::select(diesel::dsl::exists(ships::table.find(id)))
            .get_result(&mut conn)
            .map_err(query_error)
    }

    fn delete_by_id(&self, id: i64) -> Result<(), FleetError> {
        let mut conn = self.conn()?;
        diesel::delete(ships::table.find(id))
            .execute(&mut conn)
            .map_err(query_error)?;
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Ship>, FleetError> {
        let mut conn = self.conn()?;
        ships::table
            .order(ships::id.asc())
            .select(ShipRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?
            .into_iter()
            .map(Ship::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{PgShipStore, query_error};
    use crate::db::TestDatabase;
    use chrono::{TimeZone, Utc};
    use spacefleet_core::{
        FleetError, ShipCriteria, ShipDraft, ShipPatch, ShipService, ShipStore, ShipType,
        compute_rating,
    };

    fn draft(name: &str, speed: f64) -> ShipDraft {
        ShipDraft {
            name: Some(name.to_string()),
            planet: Some("Luna".to_string()),
            ship_type: Some(ShipType::Merchant),
            prod_date: Some(Utc.with_ymd_and_hms(3012, 11, 20, 8, 0, 0).unwrap()),
            is_used: None,
            speed: Some(speed),
            crew_size: Some(12),
        }
    }

    #[test]
    fn query_errors_become_storage_errors() {
        let err = query_error(diesel::result::Error::NotFound);
        assert_eq!(
            err,
            FleetError::Storage("ship query failed: Record not found".to_string())
        );
    }

    #[test]
    fn pg_store_round_trips_through_service() {
        let Some(mut test_db) = TestDatabase::try_new() else {
            return;
        };
        let service = ShipService::new(PgShipStore::new(test_db.pool()));

        let created = service.create(draft("Canterbury", 0.333)).expect("create");
        assert_eq!(created.speed, 0.33);
        assert_eq!(service.get(created.id).expect("get"), created);

        let updated = service
            .update(
                created.id,
                ShipPatch {
                    is_used: Some(true),
                    ..ShipPatch::default()
                },
            )
            .expect("update");
        assert!(updated.is_used);
        assert_eq!(updated.rating, compute_rating(updated.speed, true, 3012));

        service.create(draft("Tachi", 0.9)).expect("create");
        let criteria = ShipCriteria {
            min_speed: Some(0.5),
            ..ShipCriteria::default()
        };
        assert_eq!(service.count(&criteria).expect("count"), 1);

        service.delete(created.id).expect("delete");
        assert_eq!(
            service.delete(created.id),
            Err(FleetError::NotFound(created.id))
        );
        assert_eq!(service.store().find_all().expect("all").len(), 1);
    }

    #[test]
    fn pg_store_save_of_missing_row_is_not_found() {
        let Some(mut test_db) = TestDatabase::try_new() else {
            return;
        };
        let store = PgShipStore::new(test_db.pool());
        let ship = spacefleet_core::validate_for_create(draft("Ghost", 0.5))
            .expect("valid")
            .with_id(404);

        assert_eq!(store.save(ship), Err(FleetError::NotFound(404)));
    }
}
