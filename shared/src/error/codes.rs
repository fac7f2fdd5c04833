//! Unified error codes for the booking platform
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Venue / capacity errors
//! - 4xxx: Reservation errors
//! - 5xxx: Review errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Principal does not own the mutated resource
    AccessDenied = 2004,

    // ==================== 3xxx: Venue / Capacity ====================
    /// Venue not found
    VenueNotFound = 3001,
    /// Venue name already exists for this partner
    VenueNameExists = 3002,
    /// Requested units exceed current availability
    CapacityExceeded = 3003,
    /// Debit would drop availability below zero
    InsufficientCapacity = 3004,
    /// Credit would push availability above total (double-credit defect)
    CapacityOverflow = 3005,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// State machine rejected the transition
    InvalidTransition = 4002,
    /// Cancellation requires more advance notice
    CancellationWindowClosed = 4003,
    /// Arrived past the check-in cutoff
    TooLateToUse = 4004,
    /// Reservation is not in a usable state for this operation
    InvalidReservationState = 4005,
    /// Reservation belongs to a different venue than the kiosk
    KioskVenueMismatch = 4006,
    /// Unknown reservation status in a search filter
    InvalidSearchStatus = 4007,
    /// Visit time must be in the future
    VisitTimeNotFuture = 4008,

    // ==================== 5xxx: Review ====================
    /// Review not found
    ReviewNotFound = 5001,
    /// Reservation has already been reviewed
    AlreadyReviewed = 5002,
    /// Reservation has not been confirmed by check-in
    ReviewNotEligible = 5003,
    /// Review belongs to a different user
    ReviewAccessDenied = 5004,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered
    EmailExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::AccessDenied => "Resource belongs to a different user",

            // Venue / Capacity
            ErrorCode::VenueNotFound => "Venue not found",
            ErrorCode::VenueNameExists => "Venue name already exists",
            ErrorCode::CapacityExceeded => "Requested slot units exceed current availability",
            ErrorCode::InsufficientCapacity => "Insufficient capacity to approve reservation",
            ErrorCode::CapacityOverflow => "Capacity credit would exceed venue total",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidTransition => "Reservation state transition is not allowed",
            ErrorCode::CancellationWindowClosed => {
                "Reservations can only be cancelled with at least 8 hours of notice"
            }
            ErrorCode::TooLateToUse => "Check-in closes 10 minutes before the visit time",
            ErrorCode::InvalidReservationState => "Reservation is not in a usable state",
            ErrorCode::KioskVenueMismatch => "Reservation belongs to a different venue",
            ErrorCode::InvalidSearchStatus => "Unknown reservation status filter",
            ErrorCode::VisitTimeNotFuture => "Visit time must be in the future",

            // Review
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::AlreadyReviewed => "Reservation has already been reviewed",
            ErrorCode::ReviewNotEligible => "Only checked-in reservations can be reviewed",
            ErrorCode::ReviewAccessDenied => "Review belongs to a different user",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "Email is already registered",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::AccessDenied),

            // Venue / Capacity
            3001 => Ok(ErrorCode::VenueNotFound),
            3002 => Ok(ErrorCode::VenueNameExists),
            3003 => Ok(ErrorCode::CapacityExceeded),
            3004 => Ok(ErrorCode::InsufficientCapacity),
            3005 => Ok(ErrorCode::CapacityOverflow),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::InvalidTransition),
            4003 => Ok(ErrorCode::CancellationWindowClosed),
            4004 => Ok(ErrorCode::TooLateToUse),
            4005 => Ok(ErrorCode::InvalidReservationState),
            4006 => Ok(ErrorCode::KioskVenueMismatch),
            4007 => Ok(ErrorCode::InvalidSearchStatus),
            4008 => Ok(ErrorCode::VisitTimeNotFuture),

            // Review
            5001 => Ok(ErrorCode::ReviewNotFound),
            5002 => Ok(ErrorCode::AlreadyReviewed),
            5003 => Ok(ErrorCode::ReviewNotEligible),
            5004 => Ok(ErrorCode::ReviewAccessDenied),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::EmailExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
