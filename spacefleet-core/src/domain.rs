//! Domain entities for SpaceFleet.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::FleetError;

/// Closed set of ship classes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    /// Cargo and passenger haulers.
    Transport,
    /// Armed vessels.
    Military,
    /// Trading vessels.
    Merchant,
}

impl ShipType {
    /// All ship classes in declaration order.
    pub const ALL: [ShipType; 3] = [ShipType::Transport, ShipType::Military, ShipType::Merchant];

    /// Wire label of the ship class.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ShipType::ALL
            .into_iter()
            .find(|ship_type| ship_type.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| FleetError::bad_request(format!("unknown ship type: {value}")))
    }
}

/// A persisted ship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Store-assigned identifier.
    pub id: i64,
    /// Ship name, 1-50 characters.
    pub name: String,
    /// Home planet, 1-50 characters.
    pub planet: String,
    /// Ship class.
    pub ship_type: ShipType,
    /// Production date, serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub prod_date: DateTime<Utc>,
    /// Whether the ship has had previous owners.
    #[serde(rename = "isUsed")]
    pub is_used: bool,
    /// Cruising speed, rounded to hundredths.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
    /// Derived rating, rounded to hundredths.
    pub rating: f64,
}

impl Ship {
    /// Calendar year (UTC) the ship was produced in.
    pub fn prod_year(&self) -> i32 {
        self.prod_date.year()
    }

    /// Drop the identifier, the inverse of [`NewShip::with_id`].
    pub fn into_new_ship(self) -> NewShip {
        NewShip {
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}

/// A validated ship that has not yet been assigned an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship class.
    pub ship_type: ShipType,
    /// Production date.
    pub prod_date: DateTime<Utc>,
    /// Whether the ship has had previous owners.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl NewShip {
    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: i64) -> Ship {
        Ship {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}

/// Create payload; every field is optional on the wire and checked by the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipDraft {
    /// Ship name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Home planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Ship class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    /// Production date in epoch milliseconds.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Whether the ship has had previous owners; defaults to `false`.
    #[serde(rename = "isUsed", default, skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// Cruising speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Number of crew members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<i32>,
}

/// Partial update payload. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipPatch {
    /// Replacement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Replacement ship class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    /// Replacement production date in epoch milliseconds.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Replacement usage flag.
    #[serde(rename = "isUsed", default, skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// Replacement speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Replacement crew size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::{Ship, ShipDraft, ShipPatch, ShipType};
    use chrono::{TimeZone, Utc};

    fn sample_ship() -> Ship {
        Ship {
            id: 7,
            name: "Daedalus".to_string(),
            planet: "Earth".to_string(),
            ship_type: ShipType::Military,
            prod_date: Utc.with_ymd_and_hms(3010, 5, 1, 0, 0, 0).unwrap(),
            is_used: true,
            speed: 0.82,
            crew_size: 120,
            rating: 3.73,
        }
    }

    #[test]
    fn ship_serializes_with_wire_names() {
        let ship = sample_ship();
        let value = serde_json::to_value(&ship).expect("serialize ship");

        assert_eq!(value["shipType"], "MILITARY");
        assert_eq!(value["isUsed"], true);
        assert_eq!(value["crewSize"], 120);
        assert_eq!(value["prodDate"], ship.prod_date.timestamp_millis());
    }

    #[test]
    fn into_new_ship_reverses_with_id() {
        let ship = sample_ship();
        let new_ship = ship.clone().into_new_ship();

        assert_eq!(new_ship.name, "Daedalus");
        assert_eq!(new_ship.with_id(7), ship);
    }

    #[test]
    fn ship_type_parses_case_insensitively() {
        assert_eq!("transport".parse::<ShipType>().unwrap(), ShipType::Transport);
        assert_eq!("MERCHANT".parse::<ShipType>().unwrap(), ShipType::Merchant);
        assert!("FRIGATE".parse::<ShipType>().is_err());
    }

    #[test]
    fn draft_accepts_missing_fields() {
        let draft: ShipDraft =
            serde_json::from_str(r#"{"name":"Nova","prodDate":33000000000000}"#).expect("draft");

        assert_eq!(draft.name.as_deref(), Some("Nova"));
        assert_eq!(
            draft.prod_date.map(|date| date.timestamp_millis()),
            Some(33_000_000_000_000)
        );
        assert!(draft.planet.is_none());
        assert!(draft.is_used.is_none());
    }

    #[test]
    fn patch_ignores_id_and_rating() {
        let patch: ShipPatch =
            serde_json::from_str(r#"{"id":99,"rating":12.5,"isUsed":false}"#).expect("patch");

        assert_eq!(
            patch,
            ShipPatch {
                is_used: Some(false),
                ..ShipPatch::default()
            }
        );
    }

    #[test]
    fn patch_omits_absent_fields_when_serialized() {
        let patch = ShipPatch {
            speed: Some(0.5),
            ..ShipPatch::default()
        };
        let json = serde_json::to_string(&patch).expect("serialize patch");
        assert_eq!(json, r#"{"speed":0.5}"#);
    }
}
