//! I/O module
//!
//! Handles group loading and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, report serialization)
//! - `json_format` - JSON report serialization
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with stream interface

pub mod async_reader;
pub mod csv_format;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_member_record, convert_trip_record, write_reports_csv, CsvMemberRecord, CsvTripRecord,
};
pub use json_format::write_reports_json;
pub use sync_reader::{load_group, SyncReader};
