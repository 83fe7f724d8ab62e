//! Synchronous group loading
//!
//! Provides a streaming iterator over CSV records and the functions that
//! load a whole group from disk. Delegates CSV format concerns to the
//! csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding the line number and
//! the deserialized record for each CSV row:
//!
//! ```no_run
//! use tinynotie_settlement::io::csv_format::CsvMemberRecord;
//! use tinynotie_settlement::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::<CsvMemberRecord>::new(Path::new("group/members.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok((line, record)) => println!("line {:?}: {:?}", line, record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable header) are returned from `new()`
//! - Individual record errors are yielded as Err variants; loaders log and
//!   skip them

use crate::core::ledger::GroupLedger;
use crate::io::csv_format::{
    convert_member_record, convert_trip_record, dedupe_members, CsvMemberRecord, CsvTripRecord,
    MEMBERS_FILE, TRIPS_FILE,
};
use crate::types::{GroupData, Member, SettleError, Trip};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one record at a time; memory use does not grow with the file.
#[derive(Debug)]
pub struct SyncReader<T> {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> SyncReader<T> {
    /// Open a CSV file and read its header
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for optional trailing fields)
    pub fn new(path: &Path) -> Result<Self, SettleError> {
        if !path.exists() {
            return Err(SettleError::file_not_found(path));
        }
        let file = File::open(path)?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            _marker: PhantomData,
        })
    }
}

impl<T: DeserializeOwned> Iterator for SyncReader<T> {
    type Item = Result<(Option<u64>, T), SettleError>;

    /// Get the next record with its line number
    ///
    /// # Returns
    ///
    /// * `Some(Ok((line, record)))` - Successfully deserialized record
    /// * `Some(Err(SettleError))` - Read or deserialization error
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line());
                Some(
                    self.record
                        .deserialize::<T>(Some(&self.headers))
                        .map(|record| (line, record))
                        .map_err(SettleError::from),
                )
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Load a group from a directory or a ledger snapshot
///
/// A directory must contain `members.csv`; `trips.csv` is optional. The
/// group is named after the directory. Any other path is read as a JSON
/// ledger snapshot.
pub fn load_group(path: &Path) -> Result<GroupData, SettleError> {
    if path.is_dir() {
        load_group_dir(path)
    } else {
        Ok(GroupLedger::load(path)?.into())
    }
}

fn load_group_dir(dir: &Path) -> Result<GroupData, SettleError> {
    let members = read_members(&dir.join(MEMBERS_FILE))?;

    let trips_path = dir.join(TRIPS_FILE);
    let trips = if trips_path.exists() {
        read_trips(&trips_path)?
    } else {
        tracing::debug!(dir = %dir.display(), "no trips file, settling without trips");
        Vec::new()
    };

    Ok(GroupData {
        name: group_name(dir),
        currency: None,
        members,
        trips,
    })
}

/// Read every valid record of a members file
pub fn read_members(path: &Path) -> Result<Vec<Member>, SettleError> {
    let reader = SyncReader::<CsvMemberRecord>::new(path)?;

    let mut members = Vec::new();
    for result in reader {
        match result {
            Ok((line, record)) => members.push(convert_member_record(record, line)),
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "skipping member record"),
        }
    }

    Ok(dedupe_members(members))
}

/// Read every valid record of a trips file
pub fn read_trips(path: &Path) -> Result<Vec<Trip>, SettleError> {
    let reader = SyncReader::<CsvTripRecord>::new(path)?;

    let mut trips = Vec::new();
    for result in reader {
        match result {
            Ok((line, record)) => trips.push(convert_trip_record(record, line)),
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "skipping trip record"),
        }
    }

    Ok(trips)
}

/// Group name derived from its directory
pub fn group_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
