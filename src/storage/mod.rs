//! Flat-file storage for reservations.
//!
//! The whole data set lives in memory and is rewritten to a single text
//! file on save. See [`format`] for the record layout.

pub mod format;

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::algo;
use crate::booking::Reservation;
use crate::error::{Error, Result};

/// The reservation store: an in-memory list bound to a data file.
#[derive(Debug)]
pub struct Store {
    /// Path to the data file.
    path: PathBuf,
    /// All reservations, in the order they were made.
    reservations: Vec<Reservation>,
}

impl Store {
    /// Open the store at the given path, loading any existing records.
    ///
    /// A missing file is not an error; it loads as an empty store and is
    /// created on the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let reservations = match File::open(&path) {
            Ok(file) => format::read_records(BufReader::new(file), &path)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no data file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(source) => return Err(Error::DataFileOpen { path, source }),
        };

        info!(
            "loaded {} reservation(s) from {}",
            reservations.len(),
            path.display()
        );
        Ok(Self { path, reservations })
    }

    /// Create an empty store bound to a path, without touching the disk.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reservations: Vec::new(),
        }
    }

    /// Path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored reservations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    /// Whether the store holds no reservations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// All reservations, oldest first.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Append a reservation. The caller decides when to [`save`](Self::save).
    pub fn add(&mut self, reservation: Reservation) {
        debug!("adding reservation {}", reservation.reference);
        self.reservations.push(reservation);
    }

    /// Find a reservation by reference number.
    #[must_use]
    pub fn find(&self, reference: &str) -> Option<&Reservation> {
        algo::linear_search_by(&self.reservations, |r| r.reference == reference)
            .map(|index| &self.reservations[index])
    }

    /// Rewrite the data file with the current state.
    ///
    /// Writes to a sibling temporary file and renames it into place, so a
    /// crash mid-save never leaves a half-written data file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        let write = || -> std::io::Result<()> {
            let mut out = BufWriter::new(File::create(&tmp_path)?);
            for reservation in &self.reservations {
                format::write_record(&mut out, reservation)?;
            }
            out.flush()?;
            std::fs::rename(&tmp_path, &self.path)
        };
        write().map_err(|source| Error::DataFileWrite {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "saved {} reservation(s) to {}",
            self.reservations.len(),
            self.path.display()
        );
        Ok(())
    }
}
