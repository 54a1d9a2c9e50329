//! Aggregate reporting over the reservation list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::booking::Reservation;

/// Totals across all stored reservations.
///
/// `revenue` is what was actually collected (after discounts);
/// `gross` adds back the discounts given away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of reservations.
    pub reservations: usize,
    /// Number of tickets sold (one per passenger).
    pub tickets: usize,
    /// Number of adult passengers.
    pub adults: usize,
    /// Number of kid passengers.
    pub kids: usize,
    /// Reservation counts per destination, keyed by city name.
    pub by_destination: BTreeMap<String, usize>,
    /// Total collected, in RM.
    pub revenue: f64,
    /// Total discount given away, in RM.
    pub discount_given: f64,
}

impl Summary {
    /// Compute the summary for a list of reservations.
    #[must_use]
    pub fn from_reservations(reservations: &[Reservation]) -> Self {
        let mut summary = Self {
            reservations: reservations.len(),
            tickets: 0,
            adults: 0,
            kids: 0,
            by_destination: BTreeMap::new(),
            revenue: 0.0,
            discount_given: 0.0,
        };

        for reservation in reservations {
            summary.tickets += reservation.tickets();
            summary.adults += reservation.adults();
            summary.kids += reservation.kids();
            summary.revenue += reservation.total_price;
            summary.discount_given += reservation.discount;
            *summary
                .by_destination
                .entry(reservation.destination.name().to_string())
                .or_insert(0) += 1;
        }

        summary
    }

    /// Revenue plus discounts given, i.e. the undiscounted list total.
    #[must_use]
    pub fn gross(&self) -> f64 {
        self.revenue + self.discount_given
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{DepartureTime, Destination, Passenger};
    use chrono::Utc;

    fn reservation(destination: Destination, ages: &[u8], total: f64, discount: f64) -> Reservation {
        let passengers = ages
            .iter()
            .enumerate()
            .map(|(i, &age)| {
                Passenger::new(format!("P{i}"), age, u8::try_from(i).unwrap() + 1).unwrap()
            })
            .collect();
        Reservation {
            reference: format!("RB{:06}", ages.len()),
            created_at: Utc::now(),
            destination,
            departure: DepartureTime::Morning,
            total_price: total,
            discount,
            passengers,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_reservations(&[]);
        assert_eq!(summary.reservations, 0);
        assert_eq!(summary.tickets, 0);
        assert!(summary.by_destination.is_empty());
        assert!(summary.gross().abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_totals() {
        let reservations = vec![
            reservation(Destination::London, &[30, 10], 2250.0, 0.0),
            reservation(Destination::London, &[40], 1500.0, 0.0),
            reservation(Destination::Tokyo, &[25, 26, 7], 2900.0, 350.0),
        ];
        let summary = Summary::from_reservations(&reservations);

        assert_eq!(summary.reservations, 3);
        assert_eq!(summary.tickets, 6);
        assert_eq!(summary.adults, 4);
        assert_eq!(summary.kids, 2);
        assert!((summary.revenue - 6650.0).abs() < 1e-9);
        assert!((summary.discount_given - 350.0).abs() < 1e-9);
        assert!((summary.gross() - 7000.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_by_destination() {
        let reservations = vec![
            reservation(Destination::London, &[30], 1500.0, 0.0),
            reservation(Destination::Tokyo, &[30], 1300.0, 0.0),
            reservation(Destination::London, &[30], 1500.0, 0.0),
        ];
        let summary = Summary::from_reservations(&reservations);

        assert_eq!(summary.by_destination.get("LONDON"), Some(&2));
        assert_eq!(summary.by_destination.get("TOKYO"), Some(&1));
        assert_eq!(summary.by_destination.get("PARIS"), None);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = Summary::from_reservations(&[reservation(
            Destination::Makkah,
            &[30, 8],
            1800.0,
            200.0,
        )]);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"MAKKAH\""));
        assert!(json.contains("\"tickets\":2"));
    }
}
