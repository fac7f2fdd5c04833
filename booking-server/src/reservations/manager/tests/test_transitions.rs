//! State machine enforcement through manager operations

use super::*;

#[test]
fn test_cancel_pending_is_invalid_transition() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);

    let reservation = request_reservation(&manager, venue.id, NOW + 24 * HOUR, 1);
    let err = manager
        .cancel_reservation_at(REQUESTER_ID, reservation.id, NOW)
        .unwrap_err();
    assert!(matches!(err, ManagerError::InvalidTransition(_)));
}

#[test]
fn test_check_in_pending_is_invalid_state() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);

    let reservation = request_reservation(&manager, venue.id, NOW + HOUR, 1);
    let err = manager
        .check_in_at(venue.id, reservation.id, NOW)
        .unwrap_err();
    assert!(matches!(
        err,
        ManagerError::InvalidReservationState(ReservationStatus::Pending)
    ));
}

#[test]
fn test_approve_twice_is_invalid_transition() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);

    let reservation = approved_reservation(&manager, venue.id, NOW + 24 * HOUR, 1);
    let err = manager
        .change_status(PARTNER_ID, reservation.id, ReservationStatus::Allowed)
        .unwrap_err();
    assert!(matches!(err, ManagerError::InvalidTransition(_)));
    // A second approval must not double-debit
    assert_eq!(venue_available(&manager, venue.id), 4);
}

#[test]
fn test_reject_after_approve_is_invalid_transition() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);

    let reservation = approved_reservation(&manager, venue.id, NOW + 24 * HOUR, 1);
    let err = manager
        .change_status(PARTNER_ID, reservation.id, ReservationStatus::Rejected)
        .unwrap_err();
    assert!(matches!(err, ManagerError::InvalidTransition(_)));
}

#[test]
fn test_cancel_after_check_in_is_invalid_transition() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);

    let reservation = approved_reservation(&manager, venue.id, NOW + 24 * HOUR, 1);
    manager
        .check_in_at(venue.id, reservation.id, NOW)
        .unwrap();

    let err = manager
        .cancel_reservation_at(REQUESTER_ID, reservation.id, NOW)
        .unwrap_err();
    assert!(matches!(err, ManagerError::InvalidTransition(_)));
    // Cancel after check-in must not double-credit
    assert_eq!(venue_available(&manager, venue.id), 5);
}

#[test]
fn test_check_in_twice_is_invalid_state() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);

    let reservation = approved_reservation(&manager, venue.id, NOW + 24 * HOUR, 1);
    manager
        .check_in_at(venue.id, reservation.id, NOW)
        .unwrap();

    let err = manager
        .check_in_at(venue.id, reservation.id, NOW)
        .unwrap_err();
    assert!(matches!(
        err,
        ManagerError::InvalidReservationState(ReservationStatus::Confirmed)
    ));
    assert_eq!(venue_available(&manager, venue.id), 5);
}

#[test]
fn test_cancelled_is_terminal() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);

    let reservation = approved_reservation(&manager, venue.id, NOW + 24 * HOUR, 1);
    manager
        .cancel_reservation_at(REQUESTER_ID, reservation.id, NOW)
        .unwrap();

    let err = manager
        .cancel_reservation_at(REQUESTER_ID, reservation.id, NOW)
        .unwrap_err();
    assert!(matches!(err, ManagerError::InvalidTransition(_)));

    let err = manager
        .check_in_at(venue.id, reservation.id, NOW)
        .unwrap_err();
    assert!(matches!(
        err,
        ManagerError::InvalidReservationState(ReservationStatus::Cancelled)
    ));
}
