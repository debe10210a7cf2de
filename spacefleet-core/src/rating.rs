//! Ship rating formula.

/// Year the rating formula measures ship age against.
pub const CURRENT_YEAR: i32 = 3019;

const USED_COEFFICIENT: f64 = 0.5;
const NEW_COEFFICIENT: f64 = 1.0;

/// Round a value to two decimal places, halves away from zero.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the rating of a ship from its speed, usage flag, and production year.
///
/// `prod_year` is expected to be at most [`CURRENT_YEAR`]; the validator
/// guarantees this for every stored ship.
pub fn compute_rating(speed: f64, is_used: bool, prod_year: i32) -> f64 {
    let k = if is_used {
        USED_COEFFICIENT
    } else {
        NEW_COEFFICIENT
    };
    let age = f64::from(CURRENT_YEAR - prod_year + 1);
    round_hundredths((80.0 * speed * k) / age)
}

#[cfg(test)]
mod tests {
    use super::{compute_rating, round_hundredths};

    #[test]
    fn brand_new_ship_gets_full_rating() {
        assert_eq!(compute_rating(0.5, false, 3019), 40.0);
    }

    #[test]
    fn used_ship_rating_is_halved() {
        assert_eq!(compute_rating(0.5, true, 3019), 20.0);
    }

    #[test]
    fn older_ships_rate_lower() {
        // 80 * 0.99 / 220
        assert_eq!(compute_rating(0.99, false, 2800), 0.36);
        // 80 * 0.82 * 0.5 / 10
        assert_eq!(compute_rating(0.82, true, 3010), 3.28);
    }

    #[test]
    fn rounds_half_up_for_positive_values() {
        assert_eq!(round_hundredths(0.125), 0.13);
        assert_eq!(round_hundredths(0.994), 0.99);
        assert_eq!(round_hundredths(0.4449), 0.44);
    }
}
