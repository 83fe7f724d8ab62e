//! Error types for TinyNotie settlement
//!
//! The settlement calculation itself never fails. These errors cover
//! everything around it: reading group data, ledger mutations and
//! writing reports.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Parsing Errors**: Malformed CSV or JSON
//! - **Ledger Errors**: Unknown members or trips, invalid amounts, duplicate names
//! - **Arithmetic Errors**: Overflow while adjusting a paid amount

use super::member::MemberId;
use super::trip::TripId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the settlement crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettleError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents the group from being loaded.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable while reading records (the record is skipped), fatal
    /// when it happens on the header or while writing.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// JSON could not be read or written
    #[error("JSON error: {message}")]
    JsonError {
        /// Description of the JSON error
        message: String,
    },

    /// A member name was empty after trimming
    #[error("Member name must not be empty")]
    EmptyMemberName,

    /// A member with the same name already exists in the group
    #[error("Member '{name}' already exists")]
    DuplicateMember {
        /// The duplicated name
        name: String,
    },

    /// No member with the given id
    #[error("Member {member} not found")]
    MemberNotFound {
        /// Member id that was not found
        member: MemberId,
    },

    /// No trip with the given id
    #[error("Trip {trip} not found")]
    TripNotFound {
        /// Trip id that was not found
        trip: TripId,
    },

    /// A trip names a participant that is not a member of the group
    #[error("Trip '{trip}' references unknown member {member}")]
    UnknownParticipant {
        /// Trip name
        trip: String,
        /// Unknown member id
        member: MemberId,
    },

    /// Negative amount given where only non-negative amounts make sense
    #[error("Invalid amount {amount} for {operation}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
        /// Operation that was attempted
        operation: String,
    },

    /// Reducing a member's paid amount below zero
    #[error("Insufficient paid amount for member {member}: paid {paid}, requested {requested}")]
    InsufficientPaid {
        /// Member id
        member: MemberId,
        /// Current paid amount
        paid: Decimal,
        /// Requested reduction
        requested: Decimal,
    },

    /// Two members, or two trips, of a ledger snapshot share an id
    #[error("Duplicate {kind} id {id}")]
    DuplicateId {
        /// `member` or `trip`
        kind: String,
        /// The repeated id
        id: u32,
    },

    /// Every id of a kind has been handed out
    #[error("No {kind} ids left")]
    IdsExhausted {
        /// `member` or `trip`
        kind: String,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for member {member}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Member id
        member: MemberId,
    },
}

impl From<std::io::Error> for SettleError {
    fn from(error: std::io::Error) -> Self {
        SettleError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for SettleError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SettleError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for SettleError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SettleError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for SettleError {
    fn from(error: serde_json::Error) -> Self {
        SettleError::JsonError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SettleError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        SettleError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a DuplicateMember error
    pub fn duplicate_member(name: &str) -> Self {
        SettleError::DuplicateMember {
            name: name.to_string(),
        }
    }

    /// Create a MemberNotFound error
    pub fn member_not_found(member: MemberId) -> Self {
        SettleError::MemberNotFound { member }
    }

    /// Create a TripNotFound error
    pub fn trip_not_found(trip: TripId) -> Self {
        SettleError::TripNotFound { trip }
    }

    /// Create an UnknownParticipant error
    pub fn unknown_participant(trip: &str, member: MemberId) -> Self {
        SettleError::UnknownParticipant {
            trip: trip.to_string(),
            member,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal, operation: &str) -> Self {
        SettleError::InvalidAmount {
            amount,
            operation: operation.to_string(),
        }
    }

    /// Create an InsufficientPaid error
    pub fn insufficient_paid(member: MemberId, paid: Decimal, requested: Decimal) -> Self {
        SettleError::InsufficientPaid {
            member,
            paid,
            requested,
        }
    }

    /// Create a DuplicateId error
    pub fn duplicate_id(kind: &str, id: u32) -> Self {
        SettleError::DuplicateId {
            kind: kind.to_string(),
            id,
        }
    }

    /// Create an IdsExhausted error
    pub fn ids_exhausted(kind: &str) -> Self {
        SettleError::IdsExhausted {
            kind: kind.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, member: MemberId) -> Self {
        SettleError::ArithmeticOverflow {
            operation: operation.to_string(),
            member,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::file_not_found(
        SettleError::FileNotFound { path: "group/members.csv".to_string() },
        "File not found: group/members.csv"
    )]
    #[case::io_error(
        SettleError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        SettleError::ParseError { line: Some(7), message: "Invalid field".to_string() },
        "CSV parse error at line 7: Invalid field"
    )]
    #[case::parse_error_without_line(
        SettleError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::empty_member_name(SettleError::EmptyMemberName, "Member name must not be empty")]
    #[case::duplicate_member(
        SettleError::DuplicateMember { name: "Alice".to_string() },
        "Member 'Alice' already exists"
    )]
    #[case::unknown_participant(
        SettleError::UnknownParticipant { trip: "Dinner".to_string(), member: 9 },
        "Trip 'Dinner' references unknown member 9"
    )]
    #[case::invalid_amount(
        SettleError::InvalidAmount { amount: Decimal::new(-500, 2), operation: "add_trip".to_string() },
        "Invalid amount -5.00 for add_trip"
    )]
    #[case::insufficient_paid(
        SettleError::InsufficientPaid { member: 1, paid: Decimal::new(1000, 2), requested: Decimal::new(2000, 2) },
        "Insufficient paid amount for member 1: paid 10.00, requested 20.00"
    )]
    #[case::arithmetic_overflow(
        SettleError::ArithmeticOverflow { operation: "add_paid".to_string(), member: 3 },
        "Arithmetic overflow in add_paid for member 3"
    )]
    #[case::duplicate_id(
        SettleError::DuplicateId { kind: "member".to_string(), id: 1 },
        "Duplicate member id 1"
    )]
    #[case::ids_exhausted(
        SettleError::IdsExhausted { kind: "trip".to_string() },
        "No trip ids left"
    )]
    fn test_error_display(#[case] error: SettleError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::member_not_found(
        SettleError::member_not_found(4),
        SettleError::MemberNotFound { member: 4 }
    )]
    #[case::trip_not_found(SettleError::trip_not_found(2), SettleError::TripNotFound { trip: 2 })]
    #[case::duplicate_member(
        SettleError::duplicate_member("Bob"),
        SettleError::DuplicateMember { name: "Bob".to_string() }
    )]
    #[case::file_not_found(
        SettleError::file_not_found(std::path::Path::new("missing.csv")),
        SettleError::FileNotFound { path: "missing.csv".to_string() }
    )]
    fn test_helper_functions(#[case] result: SettleError, #[case] expected: SettleError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: SettleError = io_error.into();
        assert!(matches!(error, SettleError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let error: SettleError = json_error.into();
        assert!(matches!(error, SettleError::JsonError { .. }));
    }
}
