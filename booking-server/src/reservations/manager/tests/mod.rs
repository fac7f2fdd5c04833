use super::*;
use crate::reservations::storage::BookingStorage;
use shared::models::{Reservation, ReservationStatus, User, UserRole, Venue, VenueCreate};

const PARTNER_ID: i64 = 100;
const REQUESTER_ID: i64 = 200;

const HOUR: i64 = 60 * 60 * 1000;
const MINUTE: i64 = 60 * 1000;

/// Fixed reference instant for window tests
const NOW: i64 = 1_750_000_000_000;

fn create_test_manager() -> BookingManager {
    let storage = BookingStorage::open_in_memory().unwrap();
    BookingManager::with_storage(storage)
}

fn create_test_venue(manager: &BookingManager, total: u32) -> Venue {
    manager
        .create_venue(
            PARTNER_ID,
            VenueCreate {
                name: "Test Venue".to_string(),
                address: "1 Test St".to_string(),
                description: String::new(),
                total_slot_units: total,
            },
        )
        .unwrap()
}

fn create_test_user(manager: &BookingManager, id: i64, email: &str) {
    let user = User {
        id,
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role: UserRole::User,
        created_at: NOW,
    };
    let txn = manager.storage().begin_write().unwrap();
    manager.storage().put_user(&txn, &user).unwrap();
    txn.commit().unwrap();
}

// ========================================================================
// Helper: request and optionally approve a reservation
// ========================================================================

fn request_reservation(
    manager: &BookingManager,
    venue_id: i64,
    visit_time: i64,
    slot_units: u32,
) -> Reservation {
    manager
        .request_reservation_at(REQUESTER_ID, venue_id, visit_time, slot_units, NOW)
        .unwrap()
}

fn approved_reservation(
    manager: &BookingManager,
    venue_id: i64,
    visit_time: i64,
    slot_units: u32,
) -> Reservation {
    let reservation = request_reservation(manager, venue_id, visit_time, slot_units);
    manager
        .change_status(PARTNER_ID, reservation.id, ReservationStatus::Allowed)
        .unwrap()
}

fn venue_available(manager: &BookingManager, venue_id: i64) -> u32 {
    manager.get_venue(venue_id).unwrap().available_slot_units
}

mod test_reviews;
mod test_transitions;
