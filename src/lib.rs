//! raubair: a single-terminal airline reservation desk.
//!
//! The crate records bookings for one fixed flight, prices them from a
//! per-destination fare table, applies coupon and package discounts, and
//! persists everything to a human-readable flat text file. An interactive
//! shell drives the day-to-day flow; `list`, `search`, and `report`
//! subcommands expose the same data non-interactively.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod algo;
pub mod booking;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod report;
pub mod shell;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use storage::Store;
