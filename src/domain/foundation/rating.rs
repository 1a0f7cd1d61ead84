//! Rating value object for reviews (1 to 5 stars).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Star rating given by one exchange participant to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// Creates a Rating, returning error if outside 1..=5.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::out_of_range(
                "rating",
                Self::MIN,
                Self::MAX,
                value,
            ))
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i32 {
        self.0 as i32
    }
}

impl TryFrom<i32> for Rating {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Arithmetic mean of the given ratings; 0.0 for none.
pub fn average_rating(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| r.value() as i64).sum();
    sum as f64 / ratings.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_one_through_five() {
        for v in 1..=5 {
            assert_eq!(Rating::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(-1).is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let rating: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(rating.value(), 4);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let ratings = [Rating::new(4).unwrap(), Rating::new(5).unwrap()];
        assert_eq!(average_rating(&ratings), 4.5);
    }

    #[test]
    fn displays_out_of_five() {
        assert_eq!(Rating::new(3).unwrap().to_string(), "3/5");
    }

    proptest! {
        #[test]
        fn construction_matches_bounds(v in -100i32..100) {
            prop_assert_eq!(Rating::new(v).is_ok(), (1..=5).contains(&v));
        }

        #[test]
        fn average_stays_within_bounds(values in prop::collection::vec(1i32..=5, 1..50)) {
            let ratings: Vec<Rating> = values.iter().map(|v| Rating::new(*v).unwrap()).collect();
            let avg = average_rating(&ratings);
            prop_assert!((1.0..=5.0).contains(&avg));
        }
    }
}
