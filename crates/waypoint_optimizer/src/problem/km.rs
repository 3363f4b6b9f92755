use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::kmh::Kmh;

/// A distance in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize, JsonSchema)]
pub struct Km(f64);

impl Km {
    pub const ZERO: Km = Km(0.0);

    pub fn new(value: f64) -> Self {
        Km(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Minutes needed to drive this distance at a constant `speed`.
    pub fn travel_minutes(self, speed: Kmh) -> f64 {
        self.0 / speed.value() * 60.0
    }
}

impl PartialOrd for Km {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.0.total_cmp(&other.0))
    }
}

impl Add for Km {
    type Output = Km;

    fn add(self, other: Km) -> Km {
        Km(self.0 + other.0)
    }
}

impl AddAssign for Km {
    fn add_assign(&mut self, other: Km) {
        self.0 += other.0;
    }
}

impl Sum for Km {
    fn sum<I: Iterator<Item = Km>>(iter: I) -> Km {
        iter.fold(Km::ZERO, |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_minutes() {
        assert_eq!(Km::new(15.0).travel_minutes(Kmh::new(30.0)), 30.0);
        assert_eq!(Km::ZERO.travel_minutes(Kmh::new(30.0)), 0.0);
    }

    #[test]
    fn test_sum() {
        let total: Km = [1.5, 2.0, 0.5].into_iter().map(Km::new).sum();
        assert_eq!(total, Km::new(4.0));
    }
}
