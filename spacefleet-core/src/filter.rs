//! Attribute filters applied before sorting and paging.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::{Ship, ShipType};

/// Optional predicates over ship attributes. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipCriteria {
    /// Case-sensitive substring of the ship name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Case-sensitive substring of the home planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Exact ship class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    /// Production date strictly after this epoch millisecond.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<i64>,
    /// Production date strictly before this epoch millisecond.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<i64>,
    /// Exact usage flag.
    #[serde(rename = "isUsed", default, skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// Inclusive lower speed bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    /// Inclusive lower crew bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_crew_size: Option<i32>,
    /// Inclusive upper crew bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<f64>,
}

impl ShipCriteria {
    /// Whether a ship satisfies every present predicate.
    pub fn matches(&self, ship: &Ship) -> bool {
        let prod_millis = ship.prod_date.timestamp_millis();

        self.name
            .as_deref()
            .is_none_or(|name| ship.name.contains(name))
            && self
                .planet
                .as_deref()
                .is_none_or(|planet| ship.planet.contains(planet))
            && self.ship_type.is_none_or(|ship_type| ship.ship_type == ship_type)
            && self.after.is_none_or(|after| prod_millis > after)
            && self.before.is_none_or(|before| prod_millis < before)
            && self.is_used.is_none_or(|is_used| ship.is_used == is_used)
            && self.min_speed.is_none_or(|min| ship.speed >= min)
            && self.max_speed.is_none_or(|max| ship.speed <= max)
            && self.min_crew_size.is_none_or(|min| ship.crew_size >= min)
            && self.max_crew_size.is_none_or(|max| ship.crew_size <= max)
            && self.min_rating.is_none_or(|min| ship.rating >= min)
            && self.max_rating.is_none_or(|max| ship.rating <= max)
    }
}

/// Keep the ships that satisfy `criteria`, preserving their order.
pub fn filter_ships(ships: Vec<Ship>, criteria: &ShipCriteria) -> Vec<Ship> {
    ships
        .into_iter()
        .filter(|ship| criteria.matches(ship))
        .collect()
}
