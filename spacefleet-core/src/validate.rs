//! Field validation for ship creation and partial updates.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{NewShip, Ship, ShipDraft, ShipPatch, ShipType};
use crate::error::{FleetError, Result};
use crate::rating::{compute_rating, round_hundredths};

/// Longest accepted name or planet, in characters.
pub const MAX_TEXT_LEN: usize = 50;
/// Earliest accepted production year.
pub const MIN_PROD_YEAR: i32 = 2800;
/// Latest accepted production year.
pub const MAX_PROD_YEAR: i32 = 3019;
/// Slowest accepted speed.
pub const MIN_SPEED: f64 = 0.01;
/// Fastest accepted speed.
pub const MAX_SPEED: f64 = 0.99;
/// Smallest accepted crew.
pub const MIN_CREW_SIZE: i32 = 1;
/// Largest accepted crew.
pub const MAX_CREW_SIZE: i32 = 9999;

/// Reject identifiers below 1 before they reach the store.
pub fn check_ship_id(id: i64) -> Result<i64> {
    if id < 1 {
        return Err(FleetError::bad_request(format!(
            "ship id must be positive, got {id}"
        )));
    }
    Ok(id)
}

/// Validate a create payload and derive its rating.
pub fn validate_for_create(draft: ShipDraft) -> Result<NewShip> {
    let name = check_text(required(draft.name, "name")?, "name")?;
    let planet = check_text(required(draft.planet, "planet")?, "planet")?;
    let ship_type: ShipType = required(draft.ship_type, "shipType")?;
    let prod_date = check_prod_date(required(draft.prod_date, "prodDate")?)?;
    let speed = check_speed(required(draft.speed, "speed")?)?;
    let crew_size = check_crew_size(required(draft.crew_size, "crewSize")?)?;
    let is_used = draft.is_used.unwrap_or(false);

    Ok(NewShip {
        name,
        planet,
        ship_type,
        prod_date,
        is_used,
        speed,
        crew_size,
        rating: compute_rating(speed, is_used, prod_date.year()),
    })
}

/// Apply a partial update to an existing ship.
///
/// Every present field is checked before any of them is applied, so a
/// failing patch leaves `existing` untouched. The rating is recomputed even
/// when none of its inputs changed.
pub fn validate_for_update(existing: &Ship, patch: ShipPatch) -> Result<Ship> {
    let name = patch.name.map(|name| check_text(name, "name")).transpose()?;
    let planet = patch
        .planet
        .map(|planet| check_text(planet, "planet"))
        .transpose()?;
    let prod_date = patch.prod_date.map(check_prod_date).transpose()?;
    let speed = patch.speed.map(check_speed).transpose()?;
    let crew_size = patch.crew_size.map(check_crew_size).transpose()?;

    let mut updated = existing.clone();
    if let Some(name) = name {
        updated.name = name;
    }
    if let Some(planet) = planet {
        updated.planet = planet;
    }
    if let Some(ship_type) = patch.ship_type {
        updated.ship_type = ship_type;
    }
    if let Some(prod_date) = prod_date {
        updated.prod_date = prod_date;
    }
    if let Some(is_used) = patch.is_used {
        updated.is_used = is_used;
    }
    if let Some(speed) = speed {
        updated.speed = speed;
    }
    if let Some(crew_size) = crew_size {
        updated.crew_size = crew_size;
    }
    updated.rating = compute_rating(updated.speed, updated.is_used, updated.prod_year());
    Ok(updated)
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| FleetError::bad_request(format!("{field} is required")))
}

fn check_text(value: String, field: &'static str) -> Result<String> {
    let len = value.chars().count();
    if len == 0 || len > MAX_TEXT_LEN {
        return Err(FleetError::bad_request(format!(
            "{field} must be 1-{MAX_TEXT_LEN} characters, got {len}"
        )));
    }
    Ok(value)
}

fn check_prod_date(value: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let year = value.year();
    if !(MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&year) {
        return Err(FleetError::bad_request(format!(
            "prodDate year must be within {MIN_PROD_YEAR}-{MAX_PROD_YEAR}, got {year}"
        )));
    }
    Ok(value)
}

// Bounds apply to the raw value; rounding happens after the check.
fn check_speed(value: f64) -> Result<f64> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&value) {
        return Err(FleetError::bad_request(format!(
            "speed must be within {MIN_SPEED}-{MAX_SPEED}, got {value}"
        )));
    }
    Ok(round_hundredths(value))
}

fn check_crew_size(value: i32) -> Result<i32> {
    if !(MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&value) {
        return Err(FleetError::bad_request(format!(
            "crewSize must be within {MIN_CREW_SIZE}-{MAX_CREW_SIZE}, got {value}"
        )));
    }
    Ok(value)
}
