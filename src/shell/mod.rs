//! The interactive booking menu.
//!
//! A blocking, synchronous loop that reads menu choices from a `BufRead`
//! and writes screens to a `Write`, so the whole flow can be driven by
//! in-memory buffers in tests. Logging stays on stderr; everything the
//! operator sees goes through the writer.

mod input;
pub mod screens;

use std::io::{BufRead, Write};

use chrono::Utc;
use tracing::info;

use crate::algo;
use crate::booking::{
    generate_reference, DepartureTime, Destination, Passenger, Reservation, AIRLINE, SEAT_COUNT,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::pricing::{self, CouponBook, Package, PACKAGE_ADULTS, PACKAGE_KIDS};
use crate::report::Summary;
use crate::storage::Store;

/// Which sort the report menu runs.
#[derive(Debug, Clone, Copy)]
enum SortAlgorithm {
    Bubble,
    Merge,
}

/// Which search the report menu runs.
#[derive(Debug, Clone, Copy)]
enum SearchAlgorithm {
    Linear,
    Binary,
}

/// The interactive shell, bound to a reservation store.
#[derive(Debug)]
pub struct Shell<'a, R, W> {
    input: R,
    out: W,
    store: &'a mut Store,
    coupons: CouponBook,
    max_party_size: usize,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Build a shell over the given streams and store.
    pub fn new(input: R, out: W, store: &'a mut Store, config: &Config) -> Self {
        Self {
            input,
            out,
            store,
            coupons: config.coupon_book(),
            max_party_size: config.booking.max_party_size,
        }
    }

    /// Consume the shell and return its output stream.
    ///
    /// Mostly useful when driving the shell with in-memory buffers.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the menu loop until the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or when a completed booking cannot
    /// be saved. Running out of input is a normal exit, not an error.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to the {AIRLINE} reservation system.")?;
        loop {
            screens::main_menu(&mut self.out)?;
            let choice = match self.prompt_number("Choose an option", 1, 5) {
                Ok(choice) => choice,
                Err(Error::InputClosed) => break,
                Err(err) => return Err(err),
            };
            let outcome = match choice {
                1 => self.packages(),
                2 => self.manual_reservation(),
                3 => self.coupon_catalog(),
                4 => self.report(),
                _ => break,
            };
            match outcome {
                Err(Error::InputClosed) => break,
                other => other?,
            }
        }
        // Bookings are saved as they complete; this covers the exit itself,
        // creating the data file even for a session that booked nothing.
        self.store.save()?;
        writeln!(self.out, "\nThank you for flying {AIRLINE}. Goodbye!")?;
        Ok(())
    }

    /// The manual reservation flow: destination, party, seats, departure,
    /// coupon, boarding pass.
    fn manual_reservation(&mut self) -> Result<()> {
        screens::destination_menu(&mut self.out)?;
        let city = self.prompt_number("Choose your destination", 1, 7)?;
        let destination = Destination::ALL[city as usize - 1];

        let max = u32::try_from(self.max_party_size).unwrap_or(u32::MAX);
        let tickets = self.prompt_number(&format!("Number of tickets (1-{max})"), 1, max)?;

        let mut passengers = Vec::with_capacity(tickets as usize);
        let mut taken: Vec<u8> = Vec::new();
        let mut total = 0.0;
        for ordinal in 1..=tickets as usize {
            let passenger = self.collect_passenger(ordinal, &taken)?;
            taken.push(passenger.seat);
            total += pricing::passenger_fare(destination, &passenger);
            passengers.push(passenger);
        }

        let departure = self.choose_departure()?;
        let (total, discount) = self.offer_coupon(total)?;

        let reservation = Reservation {
            reference: self.fresh_reference(),
            created_at: Utc::now(),
            destination,
            departure,
            total_price: total,
            discount,
            passengers,
        };
        self.complete(reservation)
    }

    /// The package menu and flow.
    fn packages(&mut self) -> Result<()> {
        screens::package_menu(&mut self.out)?;
        let key = self.prompt_key(
            "Choose a package (A / B / C), or M for the main menu",
            &['A', 'B', 'C', 'M'],
        )?;
        match Package::from_key(key) {
            Some(package) => self.package_reservation(package),
            None => Ok(()),
        }
    }

    /// Collect passengers for a package, holding the 2-adults-2-kids line.
    fn package_reservation(&mut self, package: Package) -> Result<()> {
        writeln!(
            self.out,
            "\nThis package is for {PACKAGE_ADULTS} adults and {PACKAGE_KIDS} kids, {} to {}.",
            crate::booking::ORIGIN,
            package.destination()
        )?;

        let mut passengers = Vec::with_capacity(PACKAGE_ADULTS + PACKAGE_KIDS);
        let mut taken: Vec<u8> = Vec::new();
        let (mut adults, mut kids) = (0, 0);
        for ordinal in 1..=(PACKAGE_ADULTS + PACKAGE_KIDS) {
            loop {
                let passenger = self.collect_passenger(ordinal, &taken)?;
                if passenger.is_adult() && adults == PACKAGE_ADULTS {
                    self.complain(&format!(
                        "already have {adults} adults; passenger {ordinal} must be a kid"
                    ))?;
                    continue;
                }
                if !passenger.is_adult() && kids == PACKAGE_KIDS {
                    self.complain(&format!(
                        "already have {kids} kids; passenger {ordinal} must be an adult"
                    ))?;
                    continue;
                }
                if passenger.is_adult() {
                    adults += 1;
                } else {
                    kids += 1;
                }
                taken.push(passenger.seat);
                passengers.push(passenger);
                break;
            }
        }

        let departure = self.choose_departure()?;
        let reservation = Reservation {
            reference: self.fresh_reference(),
            created_at: Utc::now(),
            destination: package.destination(),
            departure,
            total_price: package.discounted_price(),
            discount: package.savings(),
            passengers,
        };
        self.complete(reservation)
    }

    /// One passenger's name, age, and seat.
    fn collect_passenger(&mut self, ordinal: usize, taken: &[u8]) -> Result<Passenger> {
        loop {
            let name = self.prompt_nonempty(&format!("Passenger {ordinal} name"))?;
            let age = self.prompt_number(&format!("Passenger {ordinal} age"), 0, 255)?;
            let seat = self.choose_seat(taken)?;
            match Passenger::new(name, u8::try_from(age).unwrap_or(u8::MAX), seat) {
                Ok(passenger) => return Ok(passenger),
                Err(err) => self.complain(&err.to_string())?,
            }
        }
    }

    /// Show the seat map and take a free seat.
    fn choose_seat(&mut self, taken: &[u8]) -> Result<u8> {
        screens::seat_map(&mut self.out, taken)?;
        loop {
            let choice =
                self.prompt_number(&format!("Choose a seat (1-{SEAT_COUNT})"), 1, SEAT_COUNT.into())?;
            let seat = u8::try_from(choice).unwrap_or(SEAT_COUNT);
            if taken.contains(&seat) {
                self.complain(&Error::SeatTaken { seat }.to_string())?;
            } else {
                return Ok(seat);
            }
        }
    }

    /// Pick one of the four departure slots.
    fn choose_departure(&mut self) -> Result<DepartureTime> {
        screens::departure_menu(&mut self.out)?;
        let keys: Vec<char> = DepartureTime::ALL.iter().map(|slot| slot.key()).collect();
        loop {
            let key = self.prompt_key("Choose a departure time", &keys)?;
            if let Some(slot) = DepartureTime::from_key(key) {
                return Ok(slot);
            }
        }
    }

    /// Offer a single coupon against the running total.
    ///
    /// Returns `(total_after, discount)`.
    fn offer_coupon(&mut self, total: f64) -> Result<(f64, f64)> {
        writeln!(self.out, "\nTotal amount is RM{total:.2}")?;
        let wants = self.prompt_number("Apply a coupon? (1. Yes  2. No)", 1, 2)?;
        if wants == 2 {
            return Ok((total, 0.0));
        }
        loop {
            let code = self.prompt_nonempty("Enter your coupon code")?;
            if let Some(rate) = self.coupons.discount_rate(&code) {
                let discount = total * rate;
                writeln!(self.out, "Success, {:.0}% off applied!", rate * 100.0)?;
                return Ok((total - discount, discount));
            }
            let retry =
                self.prompt_number("Invalid coupon. (1. Try again  2. Continue without)", 1, 2)?;
            if retry == 2 {
                return Ok((total, 0.0));
            }
        }
    }

    /// Generate a reference number no stored reservation already uses.
    fn fresh_reference(&mut self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let reference = generate_reference(&mut rng);
            if self.store.find(&reference).is_none() {
                return reference;
            }
        }
    }

    /// Record a finished booking: boarding pass, store, save.
    fn complete(&mut self, reservation: Reservation) -> Result<()> {
        writeln!(
            self.out,
            "\n===== PAYMENT SUCCESSFUL =====  Total: RM{:.2}",
            reservation.total_price
        )?;
        screens::boarding_pass(&mut self.out, &reservation)?;
        info!(
            reference = %reservation.reference,
            destination = %reservation.destination,
            "booking completed"
        );
        self.store.add(reservation);
        self.store.save()
    }

    /// The coupon catalog screen.
    fn coupon_catalog(&mut self) -> Result<()> {
        screens::coupons(&mut self.out, &self.coupons)?;
        Ok(())
    }

    /// The report screen and its sort/search sub-menu.
    fn report(&mut self) -> Result<()> {
        let totals = Summary::from_reservations(self.store.reservations());
        screens::summary(&mut self.out, &totals)?;
        screens::report_menu(&mut self.out)?;
        let choice = self.prompt_number("Choose an option", 1, 6)?;
        if choice == 6 {
            return Ok(());
        }
        if self.store.is_empty() {
            writeln!(self.out, "\nNo reservations yet.")?;
            return Ok(());
        }
        match choice {
            1 => self.sorted_by_price(SortAlgorithm::Bubble),
            2 => self.sorted_by_price(SortAlgorithm::Merge),
            3 => self.search_report(SearchAlgorithm::Linear),
            4 => self.search_report(SearchAlgorithm::Binary),
            _ => self.view_all(),
        }
    }

    /// Sort a copy of the list by total price and show it, with timing.
    fn sorted_by_price(&mut self, algorithm: SortAlgorithm) -> Result<()> {
        let mut copy = self.store.reservations().to_vec();
        let compare =
            |a: &Reservation, b: &Reservation| a.total_price.total_cmp(&b.total_price);
        let (label, elapsed) = match algorithm {
            SortAlgorithm::Bubble => {
                let ((), elapsed) = algo::timed(|| algo::bubble_sort_by(&mut copy, compare));
                ("Bubble sort", elapsed)
            }
            SortAlgorithm::Merge => {
                let ((), elapsed) = algo::timed(|| algo::merge_sort_by(&mut copy, compare));
                ("Merge sort", elapsed)
            }
        };
        writeln!(
            self.out,
            "\n{label} completed in {:.6}s",
            elapsed.as_secs_f64()
        )?;
        writeln!(self.out, "\nReservations by price:")?;
        for reservation in &copy {
            screens::reservation_line(&mut self.out, reservation)?;
        }
        Ok(())
    }

    /// Look up a reference with the chosen algorithm, with timing.
    fn search_report(&mut self, algorithm: SearchAlgorithm) -> Result<()> {
        let reference = self.prompt_nonempty("Enter the reference number")?;
        let (label, found, elapsed) = match algorithm {
            SearchAlgorithm::Linear => {
                let (index, elapsed) = algo::timed(|| {
                    algo::linear_search_by(self.store.reservations(), |r| {
                        r.reference == reference
                    })
                });
                let found = index.map(|i| self.store.reservations()[i].clone());
                ("Linear search", found, elapsed)
            }
            SearchAlgorithm::Binary => {
                // Binary search needs the list ordered by reference first.
                let mut sorted = self.store.reservations().to_vec();
                sorted.sort_by(|a, b| a.reference.cmp(&b.reference));
                let (index, elapsed) = algo::timed(|| {
                    algo::binary_search_by(&sorted, |r| r.reference.as_str().cmp(&reference))
                });
                let found = index.map(|i| sorted[i].clone());
                ("Binary search", found, elapsed)
            }
        };
        writeln!(
            self.out,
            "\n{label} completed in {:.6}s",
            elapsed.as_secs_f64()
        )?;
        match found {
            Some(reservation) => screens::boarding_pass(&mut self.out, &reservation)?,
            None => writeln!(
                self.out,
                "No reservation found with reference {reference}."
            )?,
        }
        Ok(())
    }

    /// Print every boarding pass.
    fn view_all(&mut self) -> Result<()> {
        let store: &Store = self.store;
        for reservation in store.reservations() {
            screens::boarding_pass(&mut self.out, reservation)?;
        }
        Ok(())
    }
}
