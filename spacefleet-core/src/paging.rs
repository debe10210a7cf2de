//! Ordering and page slicing for ship listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Ship;
use crate::error::FleetError;

/// Page returned when the caller does not ask for one.
pub const DEFAULT_PAGE_NUMBER: u32 = 0;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Sort key for ship listings. Every key sorts ascending.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipOrder {
    /// Store identifier.
    #[default]
    Id,
    /// Cruising speed.
    Speed,
    /// Production date.
    Date,
    /// Derived rating.
    Rating,
}

impl ShipOrder {
    /// Wire label of the order key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipOrder::Id => "ID",
            ShipOrder::Speed => "SPEED",
            ShipOrder::Date => "DATE",
            ShipOrder::Rating => "RATING",
        }
    }

    /// Compare two ships by this key.
    pub fn compare(&self, left: &Ship, right: &Ship) -> Ordering {
        match self {
            ShipOrder::Id => left.id.cmp(&right.id),
            ShipOrder::Speed => left.speed.total_cmp(&right.speed),
            ShipOrder::Date => left.prod_date.cmp(&right.prod_date),
            ShipOrder::Rating => left.rating.total_cmp(&right.rating),
        }
    }
}

impl fmt::Display for ShipOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipOrder {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [
            ShipOrder::Id,
            ShipOrder::Speed,
            ShipOrder::Date,
            ShipOrder::Rating,
        ]
        .into_iter()
        .find(|order| order.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| FleetError::bad_request(format!("unknown order: {value}")))
    }
}

/// Zero-based page selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_number: u32,
    /// Maximum number of ships per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Build a page request, falling back to the defaults for absent values.
    pub fn new(page_number: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page_number: page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    fn offset(&self) -> usize {
        (self.page_number as usize).saturating_mul(self.page_size as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Sort ships ascending by `order` and return the requested page.
///
/// Pages past the end come back empty.
pub fn paginate(mut ships: Vec<Ship>, order: ShipOrder, page: PageRequest) -> Vec<Ship> {
    ships.sort_by(|left, right| order.compare(left, right));
    ships
        .into_iter()
        .skip(page.offset())
        .take(page.page_size as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, ShipOrder, paginate};
    use crate::domain::{Ship, ShipType};
    use chrono::{TimeZone, Utc};

    fn ship(id: i64, speed: f64, rating: f64, year: i32) -> Ship {
        Ship {
            id,
            name: format!("Ship-{id}"),
            planet: "Vega".to_string(),
            ship_type: ShipType::Merchant,
            prod_date: Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap(),
            is_used: false,
            speed,
            crew_size: 10,
            rating,
        }
    }

    fn ten_ships() -> Vec<Ship> {
        (1..=10)
            .rev()
            .map(|id| ship(id, 0.1, 1.0, 3000))
            .collect()
    }

    fn ids(ships: &[Ship]) -> Vec<i64> {
        ships.iter().map(|ship| ship.id).collect()
    }

    #[test]
    fn third_page_by_id() {
        let page = PageRequest::new(Some(2), Some(3));
        let result = paginate(ten_ships(), ShipOrder::Id, page);
        assert_eq!(ids(&result), vec![7, 8, 9]);
    }

    #[test]
    fn defaults_to_first_three_by_id() {
        let result = paginate(ten_ships(), ShipOrder::default(), PageRequest::default());
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn last_page_may_be_short() {
        let result = paginate(ten_ships(), ShipOrder::Id, PageRequest::new(Some(3), None));
        assert_eq!(ids(&result), vec![10]);
    }

    #[test]
    fn page_past_end_is_empty() {
        let result = paginate(ten_ships(), ShipOrder::Id, PageRequest::new(Some(40), None));
        assert!(result.is_empty());
    }

    #[test]
    fn zero_page_size_is_empty() {
        let result = paginate(ten_ships(), ShipOrder::Id, PageRequest::new(None, Some(0)));
        assert!(result.is_empty());
    }

    #[test]
    fn sorts_by_speed_rating_and_date() {
        let ships = vec![
            ship(1, 0.9, 0.5, 3005),
            ship(2, 0.2, 3.0, 2990),
            ship(3, 0.5, 1.5, 3018),
        ];
        let page = PageRequest::new(None, Some(10));

        assert_eq!(
            ids(&paginate(ships.clone(), ShipOrder::Speed, page)),
            vec![2, 3, 1]
        );
        assert_eq!(
            ids(&paginate(ships.clone(), ShipOrder::Rating, page)),
            vec![1, 3, 2]
        );
        assert_eq!(ids(&paginate(ships, ShipOrder::Date, page)), vec![2, 1, 3]);
    }

    #[test]
    fn order_parses_wire_labels() {
        assert_eq!("RATING".parse::<ShipOrder>().unwrap(), ShipOrder::Rating);
        assert_eq!("date".parse::<ShipOrder>().unwrap(), ShipOrder::Date);
        assert!("NAME".parse::<ShipOrder>().is_err());
    }
}
