//! Asynchronous group loading with stream interface
//!
//! Mirrors `sync_reader` on top of csv-async and tokio so several groups
//! can be loaded concurrently.
//!
//! # Architecture
//!
//! ```text
//! tokio File → compat → AsyncReader → CsvMemberRecord / CsvTripRecord
//!                            ↓
//!                    csv_format module
//!            (convert_member_record, convert_trip_record)
//! ```
//!
//! csv-async does not report record positions through its deserializer, so
//! records loaded here carry no line number in log output.

use crate::core::ledger::GroupLedger;
use crate::io::csv_format::{
    convert_member_record, convert_trip_record, dedupe_members, CsvMemberRecord, CsvTripRecord,
    MEMBERS_FILE, TRIPS_FILE,
};
use crate::io::sync_reader::group_name;
use crate::types::{GroupData, Member, SettleError, Trip};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read every record of the stream
    ///
    /// Records that fail to deserialize are logged and skipped.
    pub async fn read_all<T: DeserializeOwned + 'static>(&mut self) -> Vec<T> {
        let mut records = self.csv_reader.deserialize::<T>();
        let mut parsed = Vec::new();

        while let Some(result) = records.next().await {
            match result {
                Ok(record) => parsed.push(record),
                Err(e) => tracing::warn!(error = %e, "skipping CSV record"),
            }
        }

        parsed
    }
}

/// Load a group from a directory or a ledger snapshot
///
/// Same layout rules as [`crate::io::sync_reader::load_group`].
pub async fn load_group(path: PathBuf) -> Result<GroupData, SettleError> {
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SettleError::file_not_found(&path));
        }
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        load_group_dir(&path).await
    } else {
        let json = tokio::fs::read_to_string(&path).await?;
        Ok(GroupLedger::from_json(&json)?.into())
    }
}

async fn load_group_dir(dir: &Path) -> Result<GroupData, SettleError> {
    let members = read_members(&dir.join(MEMBERS_FILE)).await?;

    let trips_path = dir.join(TRIPS_FILE);
    let trips = if tokio::fs::try_exists(&trips_path).await? {
        read_trips(&trips_path).await?
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

async fn open(path: &Path) -> Result<AsyncReader<Compat<File>>, SettleError> {
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SettleError::file_not_found(path));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(AsyncReader::new(file.compat()))
}

/// Read every valid record of a members file
pub async fn read_members(path: &Path) -> Result<Vec<Member>, SettleError> {
    let mut reader = open(path).await?;
    let members = reader
        .read_all::<CsvMemberRecord>()
        .await
        .into_iter()
        .map(|record| convert_member_record(record, None))
        .collect();

    Ok(dedupe_members(members))
}

/// Read every valid record of a trips file
pub async fn read_trips(path: &Path) -> Result<Vec<Trip>, SettleError> {
    let mut reader = open(path).await?;
    Ok(reader
        .read_all::<CsvTripRecord>()
        .await
        .into_iter()
        .map(|record| convert_trip_record(record, None))
        .collect())
}
