//! Random supply amounts.
//!
//! Amounts are drawn uniformly from [1.000000, 3.000000) with six
//! fractional digits and converted to 18-decimal token units.

use crate::contracts::TOKEN_DECIMALS;
use ethers::types::U256;
use rand::Rng;
use serde::Serialize;
use std::fmt;

const FRACTION_DIGITS: u32 = 6;
const MICROS_PER_TOKEN: u64 = 10u64.pow(FRACTION_DIGITS);

pub const MIN_MICROS: u64 = MICROS_PER_TOKEN;
pub const MAX_MICROS: u64 = 3 * MICROS_PER_TOKEN;

/// A token quantity with exactly six decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SupplyAmount {
    micros: u64,
}

impl SupplyAmount {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            micros: rng.gen_range(MIN_MICROS..MAX_MICROS),
        }
    }

    pub fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    pub fn micros(&self) -> u64 {
        self.micros
    }

    /// Value in 18-decimal fixed point.
    pub fn to_units(&self) -> U256 {
        U256::from(self.micros) * U256::exp10((TOKEN_DECIMALS - FRACTION_DIGITS) as usize)
    }
}

impl fmt::Display for SupplyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.micros / MICROS_PER_TOKEN,
            self.micros % MICROS_PER_TOKEN
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_in_range_with_six_digits() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let amount = SupplyAmount::random(&mut rng);
            let text = amount.to_string();

            let (whole, frac) = text.split_once('.').unwrap();
            assert_eq!(frac.len(), 6, "{}", text);
            assert!(frac.chars().all(|c| c.is_ascii_digit()));

            let value: f64 = text.parse().unwrap();
            assert!((1.0..3.0).contains(&value), "{}", text);
            assert!(whole == "1" || whole == "2", "{}", text);
        }
    }

    #[test]
    fn test_to_units_scales_to_18_decimals() {
        let amount = SupplyAmount::from_micros(1_234_567);
        assert_eq!(amount.to_string(), "1.234567");
        assert_eq!(
            amount.to_units(),
            U256::from_dec_str("1234567000000000000").unwrap()
        );
    }

    #[test]
    fn test_bounds_format() {
        assert_eq!(SupplyAmount::from_micros(MIN_MICROS).to_string(), "1.000000");
        assert_eq!(SupplyAmount::from_micros(MAX_MICROS - 1).to_string(), "2.999999");
    }

    #[test]
    fn test_samples_are_independent() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples: Vec<SupplyAmount> = (0..50).map(|_| SupplyAmount::random(&mut rng)).collect();

        let first = samples[0];
        assert!(samples.iter().any(|s| *s != first));
    }
}
