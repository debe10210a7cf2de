//! Diesel schema definitions for SpaceFleet server.

diesel::table! {
    ships (id) {
        id -> BigInt,
        name -> Varchar,
        planet -> Varchar,
        ship_type -> Varchar,
        prod_date -> Timestamp,
        is_used -> Bool,
        speed -> Double,
        crew_size -> Integer,
        rating -> Double,
    }
}
