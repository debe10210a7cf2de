#![deny(missing_docs)]
//! SpaceFleet core library.
//!
//! This crate contains the ship domain types together with the validation,
//! rating, filtering, and paging rules shared by the server and the CLI.

pub mod domain;
pub mod error;
pub mod filter;
pub mod paging;
pub mod rating;
pub mod service;
pub mod store;
pub mod validate;

pub use domain::{NewShip, Ship, ShipDraft, ShipPatch, ShipType};
pub use error::{FleetError, Result};
pub use filter::{ShipCriteria, filter_ships};
pub use paging::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest, ShipOrder, paginate};
pub use rating::{compute_rating, round_hundredths};
pub use service::ShipService;
pub use store::{InMemoryShipStore, ShipStore};
pub use validate::{check_ship_id, validate_for_create, validate_for_update};
