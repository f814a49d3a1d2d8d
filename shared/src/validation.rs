use validator::ValidationError;

use crate::constants::{MAX_TILE_VALUE, MIN_TILE_VALUE};

pub fn validate_tile_value(value: u32) -> Result<(), ValidationError> {
    if !(MIN_TILE_VALUE..=MAX_TILE_VALUE).contains(&value) || !value.is_power_of_two() {
        let mut err = ValidationError::new("invalid_tile_value");
        err.add_param("value".into(), &value);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_powers_of_two_from_two() {
        for value in [2, 4, 8, 1024, 2048, 1 << 17] {
            assert!(validate_tile_value(value).is_ok(), "{value} should be valid");
        }
    }

    #[test]
    fn rejects_one_zero_and_non_powers() {
        for value in [0, 1, 3, 6, 12, 2047] {
            let err = validate_tile_value(value).unwrap_err();
            assert_eq!(err.code, "invalid_tile_value");
        }
    }

    #[test]
    fn rejects_tiles_above_the_largest_reachable() {
        for value in [1 << 18, 1 << 31] {
            let err = validate_tile_value(value).unwrap_err();
            assert_eq!(err.code, "invalid_tile_value");
        }
    }
}
