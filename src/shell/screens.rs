//! Screen rendering for the interactive shell.
//!
//! Everything here writes plain text to a caller-supplied writer so the
//! same screens serve the interactive menu, the non-interactive commands,
//! and the unit tests.

use std::io::Write;

use crate::booking::{
    DepartureTime, Destination, Reservation, AIRCRAFT, AIRLINE, BUSINESS_SEAT_MAX, FLIGHT_NUMBER,
    ORIGIN, SEAT_COUNT,
};
use crate::pricing::{CouponBook, Package, PACKAGE_ADULTS, PACKAGE_KIDS};
use crate::report::Summary;

const RULE: &str =
    "__________________________________________________________________________";

/// The main menu.
pub fn main_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== {AIRLINE} :: MAIN MENU =====")?;
    writeln!(out)?;
    writeln!(out, "  1. Packages")?;
    writeln!(out, "  2. Manual reservation")?;
    writeln!(out, "  3. Coupons")?;
    writeln!(out, "  4. Report")?;
    writeln!(out, "  5. Exit")?;
    Ok(())
}

/// The destination menu for manual reservations.
pub fn destination_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "========== MANUAL RESERVATION ==========")?;
    writeln!(out)?;
    writeln!(out, "You will depart from {ORIGIN}.")?;
    writeln!(out)?;
    writeln!(out, "Available destinations today:")?;
    for (index, destination) in Destination::ALL.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, destination)?;
    }
    Ok(())
}

/// The departure slot menu.
pub fn departure_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Your flight is {AIRCRAFT} ({FLIGHT_NUMBER}).")?;
    writeln!(out)?;
    for slot in DepartureTime::ALL {
        writeln!(out, "  {} - {}", slot.key(), slot)?;
    }
    Ok(())
}

/// The package catalog, with prices computed from the fare rules.
pub fn package_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "========== PACKAGES ==========")?;
    for package in Package::ALL {
        writeln!(out)?;
        writeln!(out, "  {} : {ORIGIN} to {}", package.key(), package.destination())?;
        writeln!(
            out,
            "      {PACKAGE_ADULTS} adults, {PACKAGE_KIDS} kids        DISCOUNT {:.0}%",
            package.discount_rate() * 100.0
        )?;
        writeln!(
            out,
            "      RM{:.2} (was RM{:.2})",
            package.discounted_price(),
            package.list_price()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// The coupon catalog screen.
pub fn coupons<W: Write>(out: &mut W, book: &CouponBook) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "========== COUPONS ==========")?;
    writeln!(out)?;
    writeln!(out, "Apply one of these codes during a manual reservation:")?;
    writeln!(out)?;
    if book.is_empty() {
        writeln!(out, "  (no coupons are currently honoured)")?;
    }
    for (code, rate) in book.iter() {
        writeln!(out, "  - {code:<14} ({:.0}% off)", rate * 100.0)?;
    }
    Ok(())
}

/// The cabin seat listing, grouped by class.
pub fn seat_map<W: Write>(out: &mut W, taken: &[u8]) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  BUSINESS CLASS (seats 1-{BUSINESS_SEAT_MAX})")?;
    write_seat_rows(out, 1, BUSINESS_SEAT_MAX, 3, taken)?;
    writeln!(out)?;
    writeln!(out, "  ECONOMY CLASS (seats {}-{SEAT_COUNT})", BUSINESS_SEAT_MAX + 1)?;
    write_seat_rows(out, BUSINESS_SEAT_MAX + 1, SEAT_COUNT, 6, taken)?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Write seats `first..=last` in rows of `per_row`, marking taken seats.
fn write_seat_rows<W: Write>(
    out: &mut W,
    first: u8,
    last: u8,
    per_row: u8,
    taken: &[u8],
) -> std::io::Result<()> {
    for seat in first..=last {
        if (seat - first) % per_row == 0 {
            write!(out, "\n   ")?;
        }
        if taken.contains(&seat) {
            write!(out, "  XX")?;
        } else {
            write!(out, "  {seat:02}")?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// One reservation's boarding pass.
pub fn boarding_pass<W: Write>(out: &mut W, reservation: &Reservation) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "   {AIRLINE}        e-Boarding Pass        [Reference: {}]",
        reservation.reference
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "   PASSENGER & FLIGHT DETAILS")?;
    for passenger in &reservation.passengers {
        writeln!(out)?;
        writeln!(out, "   {}", passenger.name)?;
        writeln!(
            out,
            "   Age {:<3}     Flight {FLIGHT_NUMBER}     {}",
            passenger.age, passenger.class
        )?;
        writeln!(out, "   Seat {}", passenger.seat)?;
        writeln!(
            out,
            "   {ORIGIN} to {}     {}",
            reservation.destination, reservation.departure
        )?;
    }
    writeln!(out)?;
    writeln!(out, "   TOTAL AMOUNT : RM{:.2}", reservation.total_price)?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// One reservation as a single line, for sorted listings.
pub fn reservation_line<W: Write>(out: &mut W, reservation: &Reservation) -> std::io::Result<()> {
    writeln!(
        out,
        "  {}  {:<8}  {}  {:>2} pax  RM{:>9.2}",
        reservation.reference,
        reservation.destination,
        reservation.departure,
        reservation.tickets(),
        reservation.total_price
    )
}

/// The aggregate sales report.
pub fn summary<W: Write>(out: &mut W, summary: &Summary) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "========== {AIRLINE} REPORT ==========")?;
    writeln!(out)?;
    writeln!(out, "Reservations        : {}", summary.reservations)?;
    writeln!(out, "Total tickets sold  : {}", summary.tickets)?;
    writeln!(out, "Total adults        : {}", summary.adults)?;
    writeln!(out, "Total kids          : {}", summary.kids)?;
    writeln!(out)?;
    writeln!(out, "Reservations by destination:")?;
    if summary.by_destination.is_empty() {
        writeln!(out, "  - none yet")?;
    }
    for (city, count) in &summary.by_destination {
        writeln!(out, "  - {city} : {count}")?;
    }
    writeln!(out)?;
    writeln!(out, "Total discount given   : RM{:.2}", summary.discount_given)?;
    writeln!(out, "Total income           : RM{:.2}", summary.revenue)?;
    writeln!(out, "Gross before discounts : RM{:.2}", summary.gross())?;
    Ok(())
}

/// The report sub-menu.
pub fn report_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Sorting & searching ---")?;
    writeln!(out, "  1. Sort reservations by total price (bubble sort)")?;
    writeln!(out, "  2. Sort reservations by total price (merge sort)")?;
    writeln!(out, "  3. Search reservation by reference (linear search)")?;
    writeln!(out, "  4. Search reservation by reference (binary search)")?;
    writeln!(out, "  5. View all reservations")?;
    writeln!(out, "  6. Back to main menu")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Passenger;
    use chrono::Utc;

    fn render<F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>>(f: F) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample_reservation() -> Reservation {
        Reservation {
            reference: "RB3F9K2A".to_string(),
            created_at: Utc::now(),
            destination: Destination::London,
            departure: DepartureTime::Morning,
            total_price: 2500.0,
            discount: 0.0,
            passengers: vec![Passenger::new("Alice Tan", 34, 3).unwrap()],
        }
    }

    #[test]
    fn test_main_menu_lists_all_options() {
        let text = render(main_menu);
        for needle in ["Packages", "Manual reservation", "Coupons", "Report", "Exit"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_destination_menu_numbers_all_cities() {
        let text = render(destination_menu);
        assert!(text.contains("1. JAKARTA"));
        assert!(text.contains("7. CHICAGO"));
    }

    #[test]
    fn test_departure_menu_shows_all_slots() {
        let text = render(departure_menu);
        assert!(text.contains("A - 8.00AM"));
        assert!(text.contains("D - 10.30PM"));
    }

    #[test]
    fn test_package_menu_shows_computed_prices() {
        let text = render(package_menu);
        assert!(text.contains("A : KUALA LUMPUR to LONDON"));
        assert!(text.contains("DISCOUNT 30%"));
        assert!(text.contains("RM3150.00 (was RM4500.00)"));
        assert!(text.contains("RM2340.00 (was RM3600.00)"));
    }

    #[test]
    fn test_coupons_screen() {
        let text = render(|out| coupons(out, &CouponBook::builtin()));
        assert!(text.contains("AEROAMEEN"));
        assert!(text.contains("15% off"));
    }

    #[test]
    fn test_coupons_screen_empty_book() {
        let book = CouponBook::from_rates(std::collections::BTreeMap::new());
        let text = render(|out| coupons(out, &book));
        assert!(text.contains("no coupons"));
    }

    #[test]
    fn test_seat_map_shows_all_seats() {
        let text = render(|out| seat_map(out, &[]));
        assert!(text.contains("BUSINESS CLASS"));
        assert!(text.contains("ECONOMY CLASS"));
        assert!(text.contains("01"));
        assert!(text.contains("81"));
    }

    #[test]
    fn test_seat_map_marks_taken_seats() {
        let text = render(|out| seat_map(out, &[1]));
        assert!(text.contains("XX"));
        // Seat 1 is masked; seat 10 still shows.
        assert!(text.contains("10"));
    }

    #[test]
    fn test_boarding_pass_contents() {
        let text = render(|out| boarding_pass(out, &sample_reservation()));
        assert!(text.contains("RAUB AIRLINE"));
        assert!(text.contains("[Reference: RB3F9K2A]"));
        assert!(text.contains("Alice Tan"));
        assert!(text.contains("Flight RB370"));
        assert!(text.contains("Business Class"));
        assert!(text.contains("KUALA LUMPUR to LONDON"));
        assert!(text.contains("TOTAL AMOUNT : RM2500.00"));
    }

    #[test]
    fn test_reservation_line() {
        let text = render(|out| reservation_line(out, &sample_reservation()));
        assert!(text.contains("RB3F9K2A"));
        assert!(text.contains("LONDON"));
        assert!(text.contains("RM"));
    }

    #[test]
    fn test_summary_screen() {
        let reservations = [sample_reservation()];
        let totals = Summary::from_reservations(&reservations);
        let text = render(|out| summary(out, &totals));
        assert!(text.contains("Total tickets sold  : 1"));
        assert!(text.contains("LONDON : 1"));
        assert!(text.contains("Total income           : RM2500.00"));
    }

    #[test]
    fn test_summary_screen_empty() {
        let totals = Summary::from_reservations(&[]);
        let text = render(|out| summary(out, &totals));
        assert!(text.contains("none yet"));
    }

    #[test]
    fn test_report_menu_options() {
        let text = render(report_menu);
        assert!(text.contains("bubble sort"));
        assert!(text.contains("merge sort"));
        assert!(text.contains("linear search"));
        assert!(text.contains("binary search"));
    }
}
