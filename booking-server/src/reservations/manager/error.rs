use super::super::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use shared::models::{CapacityError, InvalidTransition, ReservationStatus};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Venue not found: {0}")]
    VenueNotFound(i64),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(i64),

    #[error("Review not found: {0}")]
    ReviewNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Requested {requested} slot units, only {available} available")]
    CapacityExceeded { requested: u32, available: u32 },

    #[error("Requested {requested} slot units, only {available} available")]
    InsufficientCapacity { requested: u32, available: u32 },

    #[error("Capacity overflow: crediting {credited} onto {available}/{total}")]
    CapacityOverflow {
        credited: u32,
        available: u32,
        total: u32,
    },

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("Cancellation window has closed")]
    CancellationWindowClosed,

    #[error("Too late to check in")]
    TooLateToUse,

    #[error("Reservation is {0}, expected allowed")]
    InvalidReservationState(ReservationStatus),

    #[error("Reservation does not belong to this venue")]
    KioskVenueMismatch,

    #[error("Reservation {0} already has a review")]
    AlreadyReviewed(i64),

    #[error("Reservation is {0}, only confirmed reservations can be reviewed")]
    ReviewNotEligible(ReservationStatus),

    #[error("Review belongs to another requester")]
    ReviewAccessDenied,

    #[error("Access denied")]
    AccessDenied,

    #[error("Visit time must be in the future")]
    VisitTimeNotFuture,

    #[error("At least one slot unit must be requested")]
    ZeroSlotUnits,

    #[error("Review content must not be empty")]
    EmptyReviewContent,

    #[error("Unknown reservation status: {0}")]
    InvalidSearchStatus(String),

    #[error("Cannot set reservation status to {0} directly")]
    UnsupportedStatusChange(ReservationStatus),

    #[error("No approved reservation for {0} at this venue")]
    NoAllowedReservation(String),
}

impl From<CapacityError> for ManagerError {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::Insufficient {
                requested,
                available,
            } => ManagerError::InsufficientCapacity {
                requested,
                available,
            },
            CapacityError::Overflow {
                credited,
                available,
                total,
            } => {
                // A credit that exceeds the total means units were released
                // twice somewhere; surface it loudly
                tracing::error!(credited, available, total, "Capacity account overflow");
                ManagerError::CapacityOverflow {
                    credited,
                    available,
                    total,
                }
            }
        }
    }
}

/// Classify storage failures into error codes (clients handle localization)
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::InternalError;
    }

    // redb errors are classified by string matching
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    // Default: transient (redb Database/Transaction/Table/Storage/Commit errors)
    ErrorCode::SystemBusy
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                AppError::new(code)
            }
            ManagerError::VenueNotFound(id) => {
                AppError::with_message(ErrorCode::VenueNotFound, format!("Venue not found: {}", id))
            }
            ManagerError::ReservationNotFound(id) => AppError::with_message(
                ErrorCode::ReservationNotFound,
                format!("Reservation not found: {}", id),
            ),
            ManagerError::ReviewNotFound(id) => AppError::with_message(
                ErrorCode::ReviewNotFound,
                format!("Review not found: {}", id),
            ),
            ManagerError::UserNotFound(email) => AppError::with_message(
                ErrorCode::UserNotFound,
                format!("No user with email: {}", email),
            ),
            ManagerError::CapacityExceeded {
                requested,
                available,
            } => AppError::new(ErrorCode::CapacityExceeded)
                .with_detail("requested", requested)
                .with_detail("available", available),
            ManagerError::InsufficientCapacity {
                requested,
                available,
            } => AppError::new(ErrorCode::InsufficientCapacity)
                .with_detail("requested", requested)
                .with_detail("available_slot_units", available),
            ManagerError::CapacityOverflow { .. } => AppError::new(ErrorCode::CapacityOverflow),
            ManagerError::InvalidTransition(e) => {
                AppError::with_message(ErrorCode::InvalidTransition, e.to_string())
            }
            ManagerError::CancellationWindowClosed => {
                AppError::new(ErrorCode::CancellationWindowClosed)
            }
            ManagerError::TooLateToUse => AppError::new(ErrorCode::TooLateToUse),
            ManagerError::InvalidReservationState(status) => AppError::with_message(
                ErrorCode::InvalidReservationState,
                format!("Reservation is {}, expected allowed", status),
            ),
            ManagerError::KioskVenueMismatch => AppError::new(ErrorCode::KioskVenueMismatch),
            ManagerError::AlreadyReviewed(id) => AppError::with_message(
                ErrorCode::AlreadyReviewed,
                format!("Reservation {} already has a review", id),
            ),
            ManagerError::ReviewNotEligible(status) => AppError::with_message(
                ErrorCode::ReviewNotEligible,
                format!("Reservation is {}, only confirmed reservations can be reviewed", status),
            ),
            ManagerError::ReviewAccessDenied => AppError::new(ErrorCode::ReviewAccessDenied),
            ManagerError::AccessDenied => AppError::new(ErrorCode::AccessDenied),
            ManagerError::VisitTimeNotFuture => AppError::new(ErrorCode::VisitTimeNotFuture),
            ManagerError::ZeroSlotUnits => {
                AppError::validation("At least one slot unit must be requested")
            }
            ManagerError::EmptyReviewContent => {
                AppError::validation("Review content must not be empty")
            }
            ManagerError::InvalidSearchStatus(s) => AppError::with_message(
                ErrorCode::InvalidSearchStatus,
                format!("Unknown reservation status: {}", s),
            ),
            ManagerError::UnsupportedStatusChange(status) => AppError::with_message(
                ErrorCode::InvalidTransition,
                format!("Cannot set reservation status to {} directly", status),
            ),
            ManagerError::NoAllowedReservation(email) => AppError::with_message(
                ErrorCode::ReservationNotFound,
                format!("No approved reservation for {} at this venue", email),
            ),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
