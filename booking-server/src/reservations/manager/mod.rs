//! BookingManager - Reservation lifecycle and capacity accounting
//!
//! This module handles:
//! - Venue creation and capacity accounts
//! - Reservation requests, partner decisions, cancellation and check-in
//! - Time-window policy enforcement
//! - Persistence to redb (transactional)
//!
//! # Operation Flow
//!
//! ```text
//! cancel_reservation(requester, id)
//!     ├─ 1. Begin write transaction
//!     ├─ 2. Load reservation + venue
//!     ├─ 3. Guard checks (ownership, state, time window)
//!     ├─ 4. Apply state transition
//!     ├─ 5. Credit the venue's capacity account
//!     ├─ 6. Persist both records
//!     └─ 7. Commit transaction
//! ```
//!
//! Every mutating operation follows the same shape: all guards and writes
//! run inside a single write transaction, so the capacity account and the
//! reservation status can never diverge.

mod error;
pub use error::*;

use super::policy;
use super::storage::{BookingStorage, StorageError};
use shared::models::{
    Reservation, ReservationEvent, ReservationStatus, Venue, VenueCreate,
};
use shared::util::{now_millis, snowflake_id};
use std::path::Path;

/// BookingManager for reservation processing
#[derive(Clone)]
pub struct BookingManager {
    storage: BookingStorage,
}

impl BookingManager {
    /// Create a new manager with persistent storage
    pub fn new(db_path: impl AsRef<Path>) -> ManagerResult<Self> {
        let storage = BookingStorage::open(db_path)?;
        Ok(Self { storage })
    }

    /// Create a manager from existing storage (for testing)
    pub fn with_storage(storage: BookingStorage) -> Self {
        Self { storage }
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &BookingStorage {
        &self.storage
    }

    // ========== Venue Operations ==========

    /// Create a venue with a full capacity account
    pub fn create_venue(&self, partner_id: i64, payload: VenueCreate) -> ManagerResult<Venue> {
        let venue = Venue {
            id: snowflake_id(),
            partner_id,
            name: payload.name,
            address: payload.address,
            description: payload.description,
            total_slot_units: payload.total_slot_units,
            available_slot_units: payload.total_slot_units,
            review_count: 0,
            created_at: now_millis(),
        };

        let txn = self.storage.begin_write()?;
        self.storage.put_venue(&txn, &venue)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(venue_id = venue.id, partner_id, "Venue created");
        Ok(venue)
    }

    /// Get a venue by id
    pub fn get_venue(&self, venue_id: i64) -> ManagerResult<Venue> {
        self.storage
            .get_venue(venue_id)?
            .ok_or(ManagerError::VenueNotFound(venue_id))
    }

    /// List all venues owned by a partner
    pub fn list_venues(&self, partner_id: i64) -> ManagerResult<Vec<Venue>> {
        Ok(self.storage.list_venues_by_partner(partner_id)?)
    }

    // ========== Reservation Operations ==========

    /// Request a reservation. The reservation starts as `pending` and does
    /// NOT debit the venue's capacity account; pending requests may in
    /// aggregate exceed availability, and the partner resolves the
    /// oversubscription when approving.
    pub fn request_reservation(
        &self,
        requester_id: i64,
        venue_id: i64,
        visit_time: i64,
        slot_units: u32,
    ) -> ManagerResult<Reservation> {
        self.request_reservation_at(requester_id, venue_id, visit_time, slot_units, now_millis())
    }

    pub fn request_reservation_at(
        &self,
        requester_id: i64,
        venue_id: i64,
        visit_time: i64,
        slot_units: u32,
        now: i64,
    ) -> ManagerResult<Reservation> {
        if visit_time <= now {
            return Err(ManagerError::VisitTimeNotFuture);
        }
        if slot_units == 0 {
            return Err(ManagerError::ZeroSlotUnits);
        }

        let txn = self.storage.begin_write()?;
        let venue = self
            .storage
            .get_venue_txn(&txn, venue_id)?
            .ok_or(ManagerError::VenueNotFound(venue_id))?;

        // Checked against current availability, but no hold is taken;
        // the debit happens at approval
        if !venue.has_available(slot_units) {
            return Err(ManagerError::CapacityExceeded {
                requested: slot_units,
                available: venue.available_slot_units,
            });
        }

        let reservation = Reservation {
            id: snowflake_id(),
            requester_id,
            venue_id,
            visit_time,
            slot_units,
            status: ReservationStatus::Pending,
            created_at: now,
        };
        self.storage.put_reservation(&txn, &reservation)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            reservation_id = reservation.id,
            venue_id,
            slot_units,
            "Reservation requested"
        );
        Ok(reservation)
    }

    /// Partner decision on a pending reservation. Approving debits the
    /// venue's capacity account; rejecting leaves it untouched. On
    /// insufficient capacity the reservation stays `pending`.
    pub fn change_status(
        &self,
        partner_id: i64,
        reservation_id: i64,
        target: ReservationStatus,
    ) -> ManagerResult<Reservation> {
        let event = match target {
            ReservationStatus::Allowed => ReservationEvent::Approve,
            ReservationStatus::Rejected => ReservationEvent::Reject,
            other => return Err(ManagerError::UnsupportedStatusChange(other)),
        };

        let txn = self.storage.begin_write()?;
        let mut reservation = self
            .storage
            .get_reservation_txn(&txn, reservation_id)?
            .ok_or(ManagerError::ReservationNotFound(reservation_id))?;
        let mut venue = self
            .storage
            .get_venue_txn(&txn, reservation.venue_id)?
            .ok_or(ManagerError::VenueNotFound(reservation.venue_id))?;

        if venue.partner_id != partner_id {
            return Err(ManagerError::AccessDenied);
        }

        reservation.status = reservation.status.apply(event)?;

        if event == ReservationEvent::Approve {
            venue.debit(reservation.slot_units)?;
            self.storage.put_venue(&txn, &venue)?;
        }
        self.storage.put_reservation(&txn, &reservation)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            reservation_id,
            status = %reservation.status,
            available = venue.available_slot_units,
            "Reservation decided"
        );
        Ok(reservation)
    }

    /// Requester-initiated cancellation of an approved reservation.
    /// Only open while more than the notice period remains before the
    /// visit; releases the held slot units back to the venue.
    pub fn cancel_reservation(
        &self,
        requester_id: i64,
        reservation_id: i64,
    ) -> ManagerResult<Reservation> {
        self.cancel_reservation_at(requester_id, reservation_id, now_millis())
    }

    pub fn cancel_reservation_at(
        &self,
        requester_id: i64,
        reservation_id: i64,
        now: i64,
    ) -> ManagerResult<Reservation> {
        let txn = self.storage.begin_write()?;
        let mut reservation = self
            .storage
            .get_reservation_txn(&txn, reservation_id)?
            .ok_or(ManagerError::ReservationNotFound(reservation_id))?;

        if reservation.requester_id != requester_id {
            return Err(ManagerError::AccessDenied);
        }
        // State check before time check: a pending reservation gets
        // InvalidTransition, not a window error
        let next = reservation.status.apply(ReservationEvent::Cancel)?;
        if !policy::cancellation_window_open(reservation.visit_time, now) {
            return Err(ManagerError::CancellationWindowClosed);
        }
        reservation.status = next;

        let mut venue = self
            .storage
            .get_venue_txn(&txn, reservation.venue_id)?
            .ok_or(ManagerError::VenueNotFound(reservation.venue_id))?;
        venue.credit(reservation.slot_units)?;
        self.storage.put_venue(&txn, &venue)?;
        self.storage.put_reservation(&txn, &reservation)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            reservation_id,
            available = venue.available_slot_units,
            "Reservation cancelled"
        );
        Ok(reservation)
    }

    /// Kiosk check-in by reservation id. The reservation must be approved,
    /// belong to the kiosk's venue, and the check-in window must still be
    /// open. Confirms the reservation and releases the held slot units.
    pub fn check_in(
        &self,
        venue_id: i64,
        reservation_id: i64,
    ) -> ManagerResult<Reservation> {
        self.check_in_at(venue_id, reservation_id, now_millis())
    }

    pub fn check_in_at(
        &self,
        venue_id: i64,
        reservation_id: i64,
        now: i64,
    ) -> ManagerResult<Reservation> {
        let txn = self.storage.begin_write()?;
        let reservation = self
            .storage
            .get_reservation_txn(&txn, reservation_id)?
            .ok_or(ManagerError::ReservationNotFound(reservation_id))?;
        self.confirm_in_txn(txn, reservation, venue_id, now)
    }

    /// Kiosk check-in by requester email, for guests without their
    /// reservation id at hand. Resolves the requester's approved
    /// reservation at the kiosk's venue.
    pub fn check_in_by_email(&self, venue_id: i64, email: &str) -> ManagerResult<Reservation> {
        self.check_in_by_email_at(venue_id, email, now_millis())
    }

    pub fn check_in_by_email_at(
        &self,
        venue_id: i64,
        email: &str,
        now: i64,
    ) -> ManagerResult<Reservation> {
        let txn = self.storage.begin_write()?;
        let user = self
            .storage
            .get_user_by_email_txn(&txn, email)?
            .ok_or_else(|| ManagerError::UserNotFound(email.to_string()))?;
        let reservation = self
            .storage
            .find_reservation_txn(&txn, venue_id, user.id, ReservationStatus::Allowed)?
            .ok_or_else(|| ManagerError::NoAllowedReservation(email.to_string()))?;
        self.confirm_in_txn(txn, reservation, venue_id, now)
    }

    fn confirm_in_txn(
        &self,
        txn: redb::WriteTransaction,
        mut reservation: Reservation,
        venue_id: i64,
        now: i64,
    ) -> ManagerResult<Reservation> {
        if reservation.venue_id != venue_id {
            return Err(ManagerError::KioskVenueMismatch);
        }
        if reservation.status != ReservationStatus::Allowed {
            return Err(ManagerError::InvalidReservationState(reservation.status));
        }
        if !policy::check_in_window_open(reservation.visit_time, now) {
            return Err(ManagerError::TooLateToUse);
        }
        reservation.status = reservation.status.apply(ReservationEvent::CheckIn)?;

        let mut venue = self
            .storage
            .get_venue_txn(&txn, venue_id)?
            .ok_or(ManagerError::VenueNotFound(venue_id))?;
        // The guest is seated; the hold on the capacity account is released
        venue.credit(reservation.slot_units)?;
        self.storage.put_venue(&txn, &venue)?;
        self.storage.put_reservation(&txn, &reservation)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            reservation_id = reservation.id,
            venue_id,
            available = venue.available_slot_units,
            "Reservation checked in"
        );
        Ok(reservation)
    }

    /// List a requester's reservations ordered by creation time ascending,
    /// optionally filtered by status
    pub fn list_reservations(
        &self,
        requester_id: i64,
        status: Option<&str>,
    ) -> ManagerResult<Vec<Reservation>> {
        let status = match status {
            Some(s) => Some(
                s.parse::<ReservationStatus>()
                    .map_err(|_| ManagerError::InvalidSearchStatus(s.to_string()))?,
            ),
            None => None,
        };
        Ok(self
            .storage
            .list_reservations_by_requester(requester_id, status)?)
    }

    /// List pending reservations across all venues a partner owns,
    /// ordered by creation time ascending
    pub fn list_pending_for_partner(&self, partner_id: i64) -> ManagerResult<Vec<Reservation>> {
        let venue_ids: Vec<i64> = self
            .storage
            .list_venues_by_partner(partner_id)?
            .into_iter()
            .map(|v| v.id)
            .collect();
        Ok(self
            .storage
            .list_reservations_by_venues(&venue_ids, Some(ReservationStatus::Pending))?)
    }

    /// Get a reservation by id, checking requester ownership
    pub fn get_reservation(
        &self,
        requester_id: i64,
        reservation_id: i64,
    ) -> ManagerResult<Reservation> {
        let reservation = self
            .storage
            .get_reservation(reservation_id)?
            .ok_or(ManagerError::ReservationNotFound(reservation_id))?;
        if reservation.requester_id != requester_id {
            return Err(ManagerError::AccessDenied);
        }
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests;
