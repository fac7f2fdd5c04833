//! Committed state must survive a database reopen

use booking_server::BookingManager;
use shared::models::{ReservationStatus, VenueCreate};

const PARTNER_ID: i64 = 1;
const REQUESTER_ID: i64 = 2;
const HOUR: i64 = 3_600_000;
const NOW: i64 = 1_750_000_000_000;

#[test]
fn approved_reservation_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("booking.redb");

    let (venue_id, reservation_id) = {
        let manager = BookingManager::new(&db_path).unwrap();
        let venue = manager
            .create_venue(
                PARTNER_ID,
                VenueCreate {
                    name: "Harbor House".to_string(),
                    address: "3 Pier Rd".to_string(),
                    description: String::new(),
                    total_slot_units: 8,
                },
            )
            .unwrap();
        let reservation = manager
            .request_reservation_at(REQUESTER_ID, venue.id, NOW + 24 * HOUR, 3, NOW)
            .unwrap();
        manager
            .change_status(PARTNER_ID, reservation.id, ReservationStatus::Allowed)
            .unwrap();
        (venue.id, reservation.id)
    };

    let manager = BookingManager::new(&db_path).unwrap();
    let venue = manager.get_venue(venue_id).unwrap();
    assert_eq!(venue.available_slot_units, 5);

    let reservation = manager
        .get_reservation(REQUESTER_ID, reservation_id)
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Allowed);
    assert_eq!(reservation.slot_units, 3);
}
