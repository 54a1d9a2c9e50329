//! The line-oriented reservation file format.
//!
//! Each reservation is written as a run of `KEY:value` lines followed by an
//! `END_RESERVATION` sentinel. One `PASSENGER:` line is written per
//! passenger, carrying `name,age,seat,class`. The format matches what the
//! system has always written; `CREATED:` is newer and optional on read, and
//! unknown keys are skipped so the format can keep growing.

use std::io::{BufRead, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::booking::{DepartureTime, Destination, Passenger, Reservation, TravelClass};
use crate::error::{Error, Result};

/// Key prefixes, including the trailing colon.
const KEY_REF: &str = "REF:";
const KEY_CREATED: &str = "CREATED:";
const KEY_DEST: &str = "DEST:";
const KEY_TIME: &str = "TIME:";
const KEY_PRICE: &str = "PRICE:";
const KEY_DISCOUNT: &str = "DISCOUNT:";
const KEY_NUM_ADULTS: &str = "NUM_ADULTS:";
const KEY_NUM_KIDS: &str = "NUM_KIDS:";
const KEY_NUM_PASSENGERS: &str = "NUM_PASSENGERS:";
const KEY_PASSENGER: &str = "PASSENGER:";

/// Marks the end of one reservation record.
const SENTINEL: &str = "END_RESERVATION";

/// Write one reservation record, sentinel included.
///
/// The adult/kid/passenger counts are derived from the passenger list at
/// write time; they exist for compatibility with files produced by older
/// versions and are not read back.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_record<W: Write>(out: &mut W, reservation: &Reservation) -> std::io::Result<()> {
    writeln!(out, "{KEY_REF}{}", reservation.reference)?;
    writeln!(out, "{KEY_CREATED}{}", reservation.created_at.to_rfc3339())?;
    writeln!(out, "{KEY_DEST}{}", reservation.destination)?;
    writeln!(out, "{KEY_TIME}{}", reservation.departure)?;
    writeln!(out, "{KEY_PRICE}{:.2}", reservation.total_price)?;
    writeln!(out, "{KEY_DISCOUNT}{:.2}", reservation.discount)?;
    writeln!(out, "{KEY_NUM_ADULTS}{}", reservation.adults())?;
    writeln!(out, "{KEY_NUM_KIDS}{}", reservation.kids())?;
    writeln!(out, "{KEY_NUM_PASSENGERS}{}", reservation.tickets())?;
    for passenger in &reservation.passengers {
        writeln!(
            out,
            "{KEY_PASSENGER}{},{},{},{}",
            passenger.name, passenger.age, passenger.seat, passenger.class
        )?;
    }
    writeln!(out, "{SENTINEL}")?;
    Ok(())
}

/// Read every reservation record from the reader.
///
/// `path` is only used to label parse errors.
///
/// # Errors
///
/// Returns an error on I/O failure, on any malformed field, or when the
/// input ends in the middle of a record (no sentinel).
pub fn read_records<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Reservation>> {
    let mut reservations = Vec::new();
    let mut partial: Option<PartialRecord> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(reference) = line.strip_prefix(KEY_REF) {
            if partial.is_some() {
                return Err(Error::parse(
                    path,
                    line_no,
                    "new record started before END_RESERVATION",
                ));
            }
            partial = Some(PartialRecord::new(reference.to_string()));
            continue;
        }

        if line == SENTINEL {
            let record = partial.take().ok_or_else(|| {
                Error::parse(path, line_no, "END_RESERVATION without a record")
            })?;
            reservations.push(record.finish(path, line_no)?);
            continue;
        }

        let Some(record) = partial.as_mut() else {
            return Err(Error::parse(
                path,
                line_no,
                format!("expected REF: to start a record, got {line:?}"),
            ));
        };
        record.apply_line(line, path, line_no)?;
    }

    if partial.is_some() {
        return Err(Error::parse(
            path,
            0,
            "file ends in the middle of a record (missing END_RESERVATION)",
        ));
    }

    Ok(reservations)
}

/// A record being assembled while its lines stream in.
#[derive(Debug)]
struct PartialRecord {
    reference: String,
    created_at: Option<DateTime<Utc>>,
    destination: Option<Destination>,
    departure: Option<DepartureTime>,
    total_price: Option<f64>,
    discount: Option<f64>,
    passengers: Vec<Passenger>,
}

impl PartialRecord {
    fn new(reference: String) -> Self {
        Self {
            reference,
            created_at: None,
            destination: None,
            departure: None,
            total_price: None,
            discount: None,
            passengers: Vec::new(),
        }
    }

    fn apply_line(&mut self, line: &str, path: &Path, line_no: usize) -> Result<()> {
        if let Some(value) = line.strip_prefix(KEY_CREATED) {
            let parsed = DateTime::parse_from_rfc3339(value.trim())
                .map_err(|e| Error::parse(path, line_no, format!("bad CREATED timestamp: {e}")))?;
            self.created_at = Some(parsed.with_timezone(&Utc));
        } else if let Some(value) = line.strip_prefix(KEY_DEST) {
            self.destination = Some(
                Destination::parse(value)
                    .map_err(|e| Error::parse(path, line_no, e.to_string()))?,
            );
        } else if let Some(value) = line.strip_prefix(KEY_TIME) {
            self.departure = Some(
                DepartureTime::parse(value)
                    .map_err(|e| Error::parse(path, line_no, e.to_string()))?,
            );
        } else if let Some(value) = line.strip_prefix(KEY_PRICE) {
            self.total_price = Some(parse_amount(value, "PRICE", path, line_no)?);
        } else if let Some(value) = line.strip_prefix(KEY_DISCOUNT) {
            self.discount = Some(parse_amount(value, "DISCOUNT", path, line_no)?);
        } else if let Some(value) = line.strip_prefix(KEY_PASSENGER) {
            let passenger = parse_passenger(value, path, line_no)?;
            if self.passengers.iter().any(|p| p.seat == passenger.seat) {
                return Err(Error::parse(
                    path,
                    line_no,
                    format!("seat {} assigned twice in one record", passenger.seat),
                ));
            }
            self.passengers.push(passenger);
        } else if line.starts_with(KEY_NUM_ADULTS)
            || line.starts_with(KEY_NUM_KIDS)
            || line.starts_with(KEY_NUM_PASSENGERS)
        {
            // Derived counts; the passenger lines are authoritative.
        } else {
            warn!(line_no, "skipping unknown key in data file: {line:?}");
        }
        Ok(())
    }

    fn finish(self, path: &Path, line_no: usize) -> Result<Reservation> {
        let missing = |field: &str| Error::parse(path, line_no, format!("record missing {field}"));
        Ok(Reservation {
            reference: self.reference,
            // Legacy files predate CREATED; stamp them at load time.
            created_at: self.created_at.unwrap_or_else(Utc::now),
            destination: self.destination.ok_or_else(|| missing("DEST"))?,
            departure: self.departure.ok_or_else(|| missing("TIME"))?,
            total_price: self.total_price.ok_or_else(|| missing("PRICE"))?,
            discount: self.discount.ok_or_else(|| missing("DISCOUNT"))?,
            passengers: self.passengers,
        })
    }
}

fn parse_amount(value: &str, field: &str, path: &Path, line_no: usize) -> Result<f64> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::parse(path, line_no, format!("bad {field} amount: {value:?}")))?;
    if amount < 0.0 || !amount.is_finite() {
        return Err(Error::parse(
            path,
            line_no,
            format!("negative or non-finite {field} amount: {value:?}"),
        ));
    }
    Ok(amount)
}

/// Parse a `name,age,seat,class` passenger line. The name runs to the
/// first comma, as it always has in this format.
fn parse_passenger(value: &str, path: &Path, line_no: usize) -> Result<Passenger> {
    let mut parts = value.splitn(4, ',');
    let name = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::parse(path, line_no, "passenger line missing name"))?;
    let age: u8 = parts
        .next()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| Error::parse(path, line_no, "passenger line has a bad age"))?;
    let seat: u8 = parts
        .next()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| Error::parse(path, line_no, "passenger line has a bad seat"))?;
    let class_label = parts
        .next()
        .ok_or_else(|| Error::parse(path, line_no, "passenger line missing class"))?;

    let class = TravelClass::from_label(class_label)
        .ok_or_else(|| Error::parse(path, line_no, format!("unknown class {class_label:?}")))?;

    let passenger =
        Passenger::new(name, age, seat).map_err(|e| Error::parse(path, line_no, e.to_string()))?;
    if passenger.class != class {
        return Err(Error::parse(
            path,
            line_no,
            format!("seat {seat} is not in {class_label}"),
        ));
    }
    Ok(passenger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn test_path() -> PathBuf {
        PathBuf::from("/tmp/reservations.txt")
    }

    fn sample_reservation() -> Reservation {
        Reservation {
            reference: "RB3F9K2A".to_string(),
            created_at: DateTime::parse_from_rfc3339("2026-08-30T10:15:00+00:00")
                .unwrap()
                .with_timezone(&Utc),
            destination: Destination::London,
            departure: DepartureTime::Morning,
            total_price: 3150.0,
            discount: 1350.0,
            passengers: vec![
                Passenger::new("Alice Tan", 34, 3).unwrap(),
                Passenger::new("Ben Tan", 36, 4).unwrap(),
                Passenger::new("Cara Tan", 10, 16).unwrap(),
                Passenger::new("Dina Tan", 8, 17).unwrap(),
            ],
        }
    }

    fn parse(text: &str) -> Result<Vec<Reservation>> {
        read_records(Cursor::new(text), &test_path())
    }

    #[test]
    fn test_write_record_layout() {
        let mut buffer = Vec::new();
        write_record(&mut buffer, &sample_reservation()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("REF:RB3F9K2A\n"));
        assert!(text.contains("DEST:LONDON\n"));
        assert!(text.contains("TIME:8.00AM\n"));
        assert!(text.contains("PRICE:3150.00\n"));
        assert!(text.contains("DISCOUNT:1350.00\n"));
        assert!(text.contains("NUM_ADULTS:2\n"));
        assert!(text.contains("NUM_KIDS:2\n"));
        assert!(text.contains("NUM_PASSENGERS:4\n"));
        assert!(text.contains("PASSENGER:Alice Tan,34,3,Business Class\n"));
        assert!(text.contains("PASSENGER:Cara Tan,10,16,Economy Class\n"));
        assert!(text.ends_with("END_RESERVATION\n"));
    }

    #[test]
    fn test_write_then_read() {
        let mut buffer = Vec::new();
        let original = sample_reservation();
        write_record(&mut buffer, &original).unwrap();

        let loaded = read_records(Cursor::new(buffer), &test_path()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], original);
    }

    #[test]
    fn test_read_multiple_records() {
        let mut buffer = Vec::new();
        let first = sample_reservation();
        let mut second = sample_reservation();
        second.reference = "RB000002".to_string();
        second.destination = Destination::Tokyo;
        write_record(&mut buffer, &first).unwrap();
        write_record(&mut buffer, &second).unwrap();

        let loaded = read_records(Cursor::new(buffer), &test_path()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].reference, "RB3F9K2A");
        assert_eq!(loaded[1].destination, Destination::Tokyo);
    }

    #[test]
    fn test_read_legacy_record_without_created() {
        let text = "\
REF:RB7Q2M1X
DEST:BANGKOK
TIME:1.30PM
PRICE:1100.00
DISCOUNT:0.00
NUM_ADULTS:1
NUM_KIDS:0
NUM_PASSENGERS:1
PASSENGER:Farid,29,30,Economy Class
END_RESERVATION
";
        let loaded = parse(text).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].destination, Destination::Bangkok);
        assert_eq!(loaded[0].passengers[0].name, "Farid");
    }

    #[test]
    fn test_read_ignores_unknown_keys() {
        let text = "\
REF:RB7Q2M1X
DEST:PARIS
TIME:5.00PM
PRICE:1400.00
DISCOUNT:0.00
MEAL_PREFERENCE:halal
PASSENGER:Farid,29,30,Economy Class
END_RESERVATION
";
        let loaded = parse(text).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_read_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_sentinel_is_error() {
        let text = "REF:RB7Q2M1X\nDEST:PARIS\nTIME:5.00PM\nPRICE:1400.00\nDISCOUNT:0.00\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("END_RESERVATION"));
    }

    #[test]
    fn test_read_record_restart_is_error() {
        let text = "REF:RB000001\nDEST:PARIS\nREF:RB000002\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_read_bad_price_is_error() {
        let text = "REF:RB000001\nDEST:PARIS\nTIME:5.00PM\nPRICE:lots\nDISCOUNT:0.00\nEND_RESERVATION\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("PRICE"));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_read_negative_price_is_error() {
        let text =
            "REF:RB000001\nDEST:PARIS\nTIME:5.00PM\nPRICE:-5.00\nDISCOUNT:0.00\nEND_RESERVATION\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn test_read_unknown_destination_is_error() {
        let text = "REF:RB000001\nDEST:ATLANTIS\nTIME:5.00PM\nPRICE:1.00\nDISCOUNT:0.00\nEND_RESERVATION\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("ATLANTIS"));
    }

    #[test]
    fn test_read_missing_field_is_error() {
        let text = "REF:RB000001\nDEST:PARIS\nPRICE:1.00\nDISCOUNT:0.00\nEND_RESERVATION\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("TIME"));
    }

    #[test]
    fn test_read_class_must_match_seat() {
        let text = "\
REF:RB000001
DEST:PARIS
TIME:5.00PM
PRICE:2300.00
DISCOUNT:0.00
PASSENGER:Farid,29,3,Economy Class
END_RESERVATION
";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("not in"));
    }

    #[test]
    fn test_read_duplicate_seat_is_error() {
        let text = "\
REF:RB000001
DEST:BANGKOK
TIME:1.30PM
PRICE:2200.00
DISCOUNT:0.00
PASSENGER:Farid,29,30,Economy Class
PASSENGER:Aina,28,30,Economy Class
END_RESERVATION
";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("seat 30 assigned twice"));
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_read_bad_passenger_age_is_error() {
        let text = "\
REF:RB000001
DEST:PARIS
TIME:5.00PM
PRICE:1400.00
DISCOUNT:0.00
PASSENGER:Farid,old,30,Economy Class
END_RESERVATION
";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_read_stray_sentinel_is_error() {
        let err = parse("END_RESERVATION\n").unwrap_err();
        assert!(err.to_string().contains("without a record"));
    }

    #[test]
    fn test_read_stray_field_is_error() {
        let err = parse("DEST:PARIS\n").unwrap_err();
        assert!(err.to_string().contains("expected REF:"));
    }
}
