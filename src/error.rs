//! Error types for raubair.
//!
//! This module defines all error types used throughout the raubair crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for raubair operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open the reservations data file.
    #[error("failed to open data file at {path}: {source}")]
    DataFileOpen {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the reservations data file.
    #[error("failed to write data file at {path}: {source}")]
    DataFileWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file contains a record that cannot be parsed.
    #[error("malformed record at line {line} of {path}: {message}")]
    DataFileParse {
        /// Path to the data file.
        path: PathBuf,
        /// Line number (1-based) where the problem was found.
        line: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Booking Errors ===
    /// A seat number outside the cabin was requested.
    #[error("seat {seat} does not exist (seats run 1-{max})")]
    SeatOutOfRange {
        /// The requested seat number.
        seat: u32,
        /// The highest valid seat number.
        max: u8,
    },

    /// A seat already assigned within the same reservation was requested.
    #[error("seat {seat} has already been taken in this reservation")]
    SeatTaken {
        /// The requested seat number.
        seat: u8,
    },

    /// A passenger name cannot be represented in the data file.
    #[error("passenger name {name:?} cannot be stored (commas and line breaks are not allowed)")]
    InvalidPassengerName {
        /// The offending name.
        name: String,
    },

    /// An unrecognized destination name.
    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    /// An unrecognized departure time.
    #[error("unknown departure time: {0}")]
    UnknownDeparture(String),

    /// No reservation matches the given reference number.
    #[error("no reservation found with reference {reference}")]
    ReservationNotFound {
        /// The reference number that was searched for.
        reference: String,
    },

    // === Shell Errors ===
    /// The interactive input stream ended.
    #[error("input stream closed")]
    InputClosed,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for raubair operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a data file parse error.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::DataFileParse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a reservation-not-found error.
    #[must_use]
    pub fn not_found(reference: impl Into<String>) -> Self {
        Self::ReservationNotFound {
            reference: reference.into(),
        }
    }

    /// Check if this error means the interactive input stream ended.
    #[must_use]
    pub fn is_input_closed(&self) -> bool {
        matches!(self, Self::InputClosed)
    }

    /// Check if this error is a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ReservationNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InputClosed;
        assert_eq!(err.to_string(), "input stream closed");

        let err = Error::SeatTaken { seat: 12 };
        assert_eq!(
            err.to_string(),
            "seat 12 has already been taken in this reservation"
        );
    }

    #[test]
    fn test_seat_out_of_range_display() {
        let err = Error::SeatOutOfRange { seat: 99, max: 81 };
        let msg = err.to_string();
        assert!(msg.contains("99"));
        assert!(msg.contains("1-81"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("/tmp/reservations.txt", 7, "bad price");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("/tmp/reservations.txt"));
        assert!(msg.contains("bad price"));
    }

    #[test]
    fn test_not_found() {
        let err = Error::not_found("RB123456");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("RB123456"));
        assert!(!Error::InputClosed.is_not_found());
    }

    #[test]
    fn test_is_input_closed() {
        assert!(Error::InputClosed.is_input_closed());
        assert!(!Error::not_found("RB000000").is_input_closed());
    }

    #[test]
    fn test_invalid_passenger_name_display() {
        let err = Error::InvalidPassengerName {
            name: "a,b".to_string(),
        };
        assert!(err.to_string().contains("a,b"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "bad coupon rate".to_string(),
        };
        assert!(err.to_string().contains("bad coupon rate"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_unknown_destination_display() {
        let err = Error::UnknownDestination("ATLANTIS".to_string());
        assert_eq!(err.to_string(), "unknown destination: ATLANTIS");
    }
}
