//! Core booking types for raubair.
//!
//! This module defines the fundamental data structures for representing
//! passengers and reservations, along with the fixed facts about the
//! carrier's single serviced aircraft.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Name of the carrier, as printed on boarding passes.
pub const AIRLINE: &str = "RAUB AIRLINE";

/// Every flight departs from this city.
pub const ORIGIN: &str = "KUALA LUMPUR";

/// The single flight number serviced by the system.
pub const FLIGHT_NUMBER: &str = "RB370";

/// The aircraft operating the flight.
pub const AIRCRAFT: &str = "Boeing-770";

/// Highest seat number in the cabin.
pub const SEAT_COUNT: u8 = 81;

/// Seats 1 through this number are business class.
pub const BUSINESS_SEAT_MAX: u8 = 15;

/// Passengers at or above this age pay the adult fare.
pub const ADULT_AGE: u8 = 18;

/// Prefix for generated reference numbers.
const REFERENCE_PREFIX: &str = "RB";

/// Number of random characters following the reference prefix.
const REFERENCE_SUFFIX_LEN: usize = 6;

/// Alphabet used for the random part of a reference number.
const REFERENCE_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A serviced destination with its fare schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Destination {
    /// Jakarta, Indonesia.
    Jakarta,
    /// Bangkok, Thailand.
    Bangkok,
    /// Makkah, Saudi Arabia.
    Makkah,
    /// Tokyo, Japan.
    Tokyo,
    /// Paris, France.
    Paris,
    /// London, United Kingdom.
    London,
    /// Chicago, United States.
    Chicago,
}

impl Destination {
    /// All serviced destinations, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Jakarta,
        Self::Bangkok,
        Self::Makkah,
        Self::Tokyo,
        Self::Paris,
        Self::London,
        Self::Chicago,
    ];

    /// The uppercase city name used in the data file and on boarding passes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Jakarta => "JAKARTA",
            Self::Bangkok => "BANGKOK",
            Self::Makkah => "MAKKAH",
            Self::Tokyo => "TOKYO",
            Self::Paris => "PARIS",
            Self::London => "LONDON",
            Self::Chicago => "CHICAGO",
        }
    }

    /// Base fare for an adult passenger, in RM.
    #[must_use]
    pub fn adult_fare(self) -> f64 {
        match self {
            Self::Jakarta => 1000.0,
            Self::Bangkok => 1100.0,
            Self::Makkah => 1200.0,
            Self::Tokyo => 1300.0,
            Self::Paris => 1400.0,
            Self::London => 1500.0,
            Self::Chicago => 1600.0,
        }
    }

    /// Base fare for a kid passenger, in RM.
    #[must_use]
    pub fn kid_fare(self) -> f64 {
        self.adult_fare() / 2.0
    }

    /// Surcharge added per passenger seated in business class, in RM.
    #[must_use]
    pub fn business_surcharge(self) -> f64 {
        match self {
            Self::Jakarta => 500.0,
            Self::Bangkok => 600.0,
            Self::Makkah => 700.0,
            Self::Tokyo => 800.0,
            Self::Paris => 900.0,
            Self::London => 1000.0,
            Self::Chicago => 1100.0,
        }
    }

    /// Parse a destination by city name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDestination`] if the name is not serviced.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|dest| dest.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::UnknownDestination(name.trim().to_string()))
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cabin class, derived from the seat number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelClass {
    /// Seats 1-15.
    Business,
    /// Seats 16-81.
    Economy,
}

impl TravelClass {
    /// Determine the class for a seat number.
    ///
    /// Seat numbers are assumed valid; out-of-range seats are rejected
    /// before this point by [`Passenger::new`].
    #[must_use]
    pub fn for_seat(seat: u8) -> Self {
        if seat <= BUSINESS_SEAT_MAX {
            Self::Business
        } else {
            Self::Economy
        }
    }

    /// The label used in the data file and on boarding passes.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Business => "Business Class",
            Self::Economy => "Economy Class",
        }
    }

    /// Parse a class from its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Business Class" => Some(Self::Business),
            "Economy Class" => Some(Self::Economy),
            _ => None,
        }
    }
}

impl std::fmt::Display for TravelClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TravelClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One of the four fixed departure slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureTime {
    /// 8.00AM, menu key A.
    Morning,
    /// 1.30PM, menu key B.
    Afternoon,
    /// 5.00PM, menu key C.
    Evening,
    /// 10.30PM, menu key D.
    Night,
}

impl DepartureTime {
    /// All departure slots, in menu order.
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    /// The menu key for this slot.
    #[must_use]
    pub fn key(self) -> char {
        match self {
            Self::Morning => 'A',
            Self::Afternoon => 'B',
            Self::Evening => 'C',
            Self::Night => 'D',
        }
    }

    /// Look up a slot by menu key, case-insensitively.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'A' => Some(Self::Morning),
            'B' => Some(Self::Afternoon),
            'C' => Some(Self::Evening),
            'D' => Some(Self::Night),
            _ => None,
        }
    }

    /// The clock label used in the data file and on boarding passes.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "8.00AM",
            Self::Afternoon => "1.30PM",
            Self::Evening => "5.00PM",
            Self::Night => "10.30PM",
        }
    }

    /// Parse a slot from its clock label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDeparture`] if the label matches no slot.
    pub fn parse(label: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.label() == label.trim())
            .ok_or_else(|| Error::UnknownDeparture(label.trim().to_string()))
    }
}

impl std::fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DepartureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A single passenger on a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    /// Passenger name. Never contains commas or line breaks.
    pub name: String,
    /// Passenger age in years.
    pub age: u8,
    /// Assigned seat, 1-81.
    pub seat: u8,
    /// Cabin class, always consistent with the seat number.
    pub class: TravelClass,
}

impl Passenger {
    /// Create a passenger, deriving the travel class from the seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the name cannot be stored in the data file or
    /// the seat is outside the cabin.
    pub fn new(name: impl Into<String>, age: u8, seat: u8) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.contains(',') || name.contains('\n') || name.contains('\r') {
            return Err(Error::InvalidPassengerName { name });
        }
        if !(1..=SEAT_COUNT).contains(&seat) {
            return Err(Error::SeatOutOfRange {
                seat: u32::from(seat),
                max: SEAT_COUNT,
            });
        }
        Ok(Self {
            class: TravelClass::for_seat(seat),
            name,
            age,
            seat,
        })
    }

    /// Whether this passenger pays the adult fare.
    #[must_use]
    pub fn is_adult(&self) -> bool {
        self.age >= ADULT_AGE
    }
}

/// A complete flight reservation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    /// Unique reference number, `RB` plus six random characters.
    pub reference: String,
    /// When the reservation was made.
    pub created_at: DateTime<Utc>,
    /// Flight destination.
    pub destination: Destination,
    /// Scheduled departure slot.
    pub departure: DepartureTime,
    /// Total paid, after any discount, in RM.
    pub total_price: f64,
    /// Discount deducted from the list price, in RM.
    pub discount: f64,
    /// Everyone travelling on this reservation.
    pub passengers: Vec<Passenger>,
}

impl Reservation {
    /// Number of adult passengers.
    #[must_use]
    pub fn adults(&self) -> usize {
        self.passengers.iter().filter(|p| p.is_adult()).count()
    }

    /// Number of kid passengers.
    #[must_use]
    pub fn kids(&self) -> usize {
        self.passengers.len() - self.adults()
    }

    /// Number of tickets (one per passenger).
    #[must_use]
    pub fn tickets(&self) -> usize {
        self.passengers.len()
    }

    /// List price before the discount was applied.
    #[must_use]
    pub fn gross(&self) -> f64 {
        self.total_price + self.discount
    }
}

/// Generate a fresh reference number: `RB` plus six characters from `0-9A-Z`.
#[must_use]
pub fn generate_reference(rng: &mut impl Rng) -> String {
    let mut reference = String::with_capacity(REFERENCE_PREFIX.len() + REFERENCE_SUFFIX_LEN);
    reference.push_str(REFERENCE_PREFIX);
    for _ in 0..REFERENCE_SUFFIX_LEN {
        let index = rng.gen_range(0..REFERENCE_CHARSET.len());
        reference.push(char::from(REFERENCE_CHARSET[index]));
    }
    reference
}
