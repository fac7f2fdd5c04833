//! Reservation model and status state machine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reservation lifecycle status
///
/// ```text
/// PENDING ──approve──▶ ALLOWED ──check_in──▶ CONFIRMED ──review──▶ REVIEWED
///    │                    │
///  reject              cancel
///    ▼                    ▼
/// REJECTED            CANCELLED
/// ```
///
/// `REJECTED`, `CANCELLED` and `REVIEWED` are terminal. No transition is
/// reversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Allowed,
    Rejected,
    Confirmed,
    Cancelled,
    Reviewed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Allowed => "allowed",
            Self::Rejected => "rejected",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Reviewed => "reviewed",
        }
    }

    /// Terminal states accept no further events
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Reviewed)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string in a search filter or payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "allowed" => Ok(Self::Allowed),
            "rejected" => Ok(Self::Rejected),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "reviewed" => Ok(Self::Reviewed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Events that drive the reservation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationEvent {
    Approve,
    Reject,
    Cancel,
    CheckIn,
    Review,
}

impl fmt::Display for ReservationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::CheckIn => "check_in",
            Self::Review => "review",
        };
        f.write_str(s)
    }
}

/// A (state, event) pair the state machine does not allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {event} a {from} reservation")]
pub struct InvalidTransition {
    pub from: ReservationStatus,
    pub event: ReservationEvent,
}

impl ReservationStatus {
    /// Apply an event, returning the next status.
    ///
    /// This is the single source of truth for the lifecycle: every pair not
    /// listed here fails with [`InvalidTransition`] carrying the attempted
    /// event and the current status.
    pub fn apply(self, event: ReservationEvent) -> Result<Self, InvalidTransition> {
        use ReservationEvent as E;
        use ReservationStatus as S;
        match (self, event) {
            (S::Pending, E::Approve) => Ok(S::Allowed),
            (S::Pending, E::Reject) => Ok(S::Rejected),
            (S::Allowed, E::Cancel) => Ok(S::Cancelled),
            (S::Allowed, E::CheckIn) => Ok(S::Confirmed),
            (S::Confirmed, E::Review) => Ok(S::Reviewed),
            (from, event) => Err(InvalidTransition { from, event }),
        }
    }
}

/// Reservation entity
///
/// Capacity is not debited at creation; only approval debits and only
/// cancellation or check-in credits back, so across one reservation's
/// lifetime there is at most one debit followed by at most one credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub requester_id: i64,
    pub venue_id: i64,
    /// Booked visit time, Unix milliseconds
    pub visit_time: i64,
    pub slot_units: u32,
    pub status: ReservationStatus,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}
