//! Fare calculation, coupons, and holiday packages.
//!
//! Pricing is destination-driven: every passenger pays the destination's
//! adult or kid base fare depending on age, plus the destination's business
//! surcharge when seated in rows 1-15. Coupons and packages then take a
//! percentage off the total.

use std::collections::BTreeMap;

use crate::booking::{Destination, Passenger, TravelClass};

/// Packages always carry this many adults.
pub const PACKAGE_ADULTS: usize = 2;

/// Packages always carry this many kids.
pub const PACKAGE_KIDS: usize = 2;

/// Adult base fare that package pricing builds on, in RM.
const PACKAGE_BASE_ADULT: f64 = 1000.0;

/// Kid base fare that package pricing builds on, in RM.
const PACKAGE_BASE_KID: f64 = 500.0;

/// Fare for one passenger travelling to `destination`.
#[must_use]
pub fn passenger_fare(destination: Destination, passenger: &Passenger) -> f64 {
    let base = if passenger.is_adult() {
        destination.adult_fare()
    } else {
        destination.kid_fare()
    };
    match passenger.class {
        TravelClass::Business => base + destination.business_surcharge(),
        TravelClass::Economy => base,
    }
}

/// The set of coupon codes currently honoured.
///
/// Rates are fractional discounts in `(0, 1)`. Codes are matched exactly;
/// a lowercase entry of a valid code is not honoured.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponBook {
    rates: BTreeMap<String, f64>,
}

impl CouponBook {
    /// Build a coupon book from a code-to-rate map.
    #[must_use]
    pub fn from_rates(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    /// The built-in coupon catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_rates(builtin_coupons())
    }

    /// Look up the discount rate for a coupon code.
    #[must_use]
    pub fn discount_rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Iterate over `(code, rate)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// Number of honoured codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether no coupons are honoured at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The built-in coupon catalog as a plain map, for config defaults.
#[must_use]
pub fn builtin_coupons() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("CAPTAINAFIQ".to_string(), 0.05),
        ("COPILOTAMIR".to_string(), 0.10),
        ("STEWARDFARIS".to_string(), 0.10),
        ("AEROAMEEN".to_string(), 0.15),
    ])
}

/// A fixed-price holiday package for two adults and two kids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
    /// Package A: Kuala Lumpur to London, 30% off.
    London,
    /// Package B: Kuala Lumpur to Tokyo, 20% off.
    Tokyo,
    /// Package C: Kuala Lumpur to Makkah, 35% off.
    Makkah,
}

impl Package {
    /// All packages, in menu order.
    pub const ALL: [Self; 3] = [Self::London, Self::Tokyo, Self::Makkah];

    /// The menu key for this package.
    #[must_use]
    pub fn key(self) -> char {
        match self {
            Self::London => 'A',
            Self::Tokyo => 'B',
            Self::Makkah => 'C',
        }
    }

    /// Look up a package by menu key, case-insensitively.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'A' => Some(Self::London),
            'B' => Some(Self::Tokyo),
            'C' => Some(Self::Makkah),
            _ => None,
        }
    }

    /// Where this package flies to.
    #[must_use]
    pub fn destination(self) -> Destination {
        match self {
            Self::London => Destination::London,
            Self::Tokyo => Destination::Tokyo,
            Self::Makkah => Destination::Makkah,
        }
    }

    /// Per-adult surcharge on top of the package base fare, in RM.
    fn adult_surcharge(self) -> f64 {
        match self {
            Self::London => 500.0,
            Self::Tokyo => 300.0,
            Self::Makkah => 200.0,
        }
    }

    /// The fractional discount this package carries.
    #[must_use]
    pub fn discount_rate(self) -> f64 {
        match self {
            Self::London => 0.30,
            Self::Tokyo => 0.20,
            Self::Makkah => 0.35,
        }
    }

    /// Undiscounted price for 2 adults and 2 kids, in RM.
    #[must_use]
    pub fn list_price(self) -> f64 {
        let adult = PACKAGE_BASE_ADULT + self.adult_surcharge();
        let kid = PACKAGE_BASE_KID + self.adult_surcharge() / 2.0;
        2.0 * adult + 2.0 * kid
    }

    /// Price after the package discount, in RM.
    #[must_use]
    pub fn discounted_price(self) -> f64 {
        self.list_price() * (1.0 - self.discount_rate())
    }

    /// Amount saved versus the list price, in RM.
    #[must_use]
    pub fn savings(self) -> f64 {
        self.list_price() - self.discounted_price()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Passenger;

    fn passenger(age: u8, seat: u8) -> Passenger {
        Passenger::new("Test Passenger", age, seat).expect("valid passenger")
    }

    #[test]
    fn test_economy_adult_fare() {
        let fare = passenger_fare(Destination::Jakarta, &passenger(30, 40));
        assert!((fare - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_economy_kid_fare() {
        let fare = passenger_fare(Destination::Jakarta, &passenger(10, 40));
        assert!((fare - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_business_adds_surcharge() {
        let adult = passenger_fare(Destination::London, &passenger(30, 5));
        assert!((adult - 2500.0).abs() < f64::EPSILON);

        let kid = passenger_fare(Destination::London, &passenger(10, 5));
        assert!((kid - 1750.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builtin_coupon_rates() {
        let book = CouponBook::builtin();
        assert_eq!(book.len(), 4);
        assert_eq!(book.discount_rate("CAPTAINAFIQ"), Some(0.05));
        assert_eq!(book.discount_rate("COPILOTAMIR"), Some(0.10));
        assert_eq!(book.discount_rate("STEWARDFARIS"), Some(0.10));
        assert_eq!(book.discount_rate("AEROAMEEN"), Some(0.15));
    }

    #[test]
    fn test_coupons_are_case_sensitive() {
        let book = CouponBook::builtin();
        assert_eq!(book.discount_rate("aeroameen"), None);
        assert_eq!(book.discount_rate("FREEFLIGHT"), None);
    }

    #[test]
    fn test_coupon_book_iter_is_ordered() {
        let book = CouponBook::builtin();
        let codes: Vec<&str> = book.iter().map(|(code, _)| code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_empty_coupon_book() {
        let book = CouponBook::from_rates(BTreeMap::new());
        assert!(book.is_empty());
        assert_eq!(book.discount_rate("AEROAMEEN"), None);
    }

    #[test]
    fn test_package_keys() {
        assert_eq!(Package::from_key('a'), Some(Package::London));
        assert_eq!(Package::from_key('C'), Some(Package::Makkah));
        assert_eq!(Package::from_key('Z'), None);
        assert_eq!(Package::Tokyo.key(), 'B');
    }

    #[test]
    fn test_package_destinations() {
        assert_eq!(Package::London.destination(), Destination::London);
        assert_eq!(Package::Tokyo.destination(), Destination::Tokyo);
        assert_eq!(Package::Makkah.destination(), Destination::Makkah);
    }

    #[test]
    fn test_package_london_pricing() {
        // 2 x (1000 + 500) + 2 x (500 + 250) = 4500, then 30% off.
        assert!((Package::London.list_price() - 4500.0).abs() < f64::EPSILON);
        assert!((Package::London.discounted_price() - 3150.0).abs() < 1e-9);
        assert!((Package::London.savings() - 1350.0).abs() < 1e-9);
    }

    #[test]
    fn test_package_tokyo_pricing() {
        // 2 x (1000 + 300) + 2 x (500 + 150) = 3900, then 20% off.
        assert!((Package::Tokyo.list_price() - 3900.0).abs() < f64::EPSILON);
        assert!((Package::Tokyo.discounted_price() - 3120.0).abs() < 1e-9);
    }

    #[test]
    fn test_package_makkah_pricing() {
        // 2 x (1000 + 200) + 2 x (500 + 100) = 3600, then 35% off.
        assert!((Package::Makkah.list_price() - 3600.0).abs() < f64::EPSILON);
        assert!((Package::Makkah.discounted_price() - 2340.0).abs() < 1e-9);
    }
}
