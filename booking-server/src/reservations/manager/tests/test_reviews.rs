//! Review gate behavior

use super::*;

fn confirmed_reservation(manager: &BookingManager, venue_id: i64) -> Reservation {
    let reservation = approved_reservation(manager, venue_id, NOW + HOUR, 2);
    manager
        .check_in_at(venue_id, reservation.id, NOW)
        .unwrap()
}

#[test]
fn test_add_review_moves_to_reviewed() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let review = manager
        .add_review(REQUESTER_ID, reservation.id, 4, "Lovely spot".to_string())
        .unwrap();

    assert_eq!(review.rating, 4);
    assert_eq!(review.venue_id, venue.id);

    let reloaded = manager.get_reservation(REQUESTER_ID, reservation.id).unwrap();
    assert_eq!(reloaded.status, ReservationStatus::Reviewed);
    assert_eq!(manager.get_venue(venue.id).unwrap().review_count, 1);
}

#[test]
fn test_second_review_rejected() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    manager
        .add_review(REQUESTER_ID, reservation.id, 4, "fine".to_string())
        .unwrap();
    let err = manager
        .add_review(REQUESTER_ID, reservation.id, 5, "fine".to_string())
        .unwrap_err();

    assert!(matches!(err, ManagerError::AlreadyReviewed(_)));
    assert_eq!(manager.get_venue(venue.id).unwrap().review_count, 1);
}

#[test]
fn test_review_requires_confirmed_state() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = approved_reservation(&manager, venue.id, NOW + HOUR, 2);

    let err = manager
        .add_review(REQUESTER_ID, reservation.id, 4, "fine".to_string())
        .unwrap_err();
    assert!(matches!(
        err,
        ManagerError::ReviewNotEligible(ReservationStatus::Allowed)
    ));
}

#[test]
fn test_review_requires_ownership() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let err = manager
        .add_review(REQUESTER_ID + 1, reservation.id, 4, "fine".to_string())
        .unwrap_err();
    assert!(matches!(err, ManagerError::AccessDenied));
}

#[test]
fn test_update_own_review() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let review = manager
        .add_review(REQUESTER_ID, reservation.id, 3, "okay".to_string())
        .unwrap();
    let updated = manager
        .update_review(REQUESTER_ID, review.id, 5, "changed my mind".to_string())
        .unwrap();

    assert_eq!(updated.rating, 5);
    assert_eq!(updated.content, "changed my mind");
}

#[test]
fn test_update_foreign_review_denied() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let review = manager
        .add_review(REQUESTER_ID, reservation.id, 3, "fine".to_string())
        .unwrap();
    let err = manager
        .update_review(REQUESTER_ID + 1, review.id, 1, "fine".to_string())
        .unwrap_err();
    assert!(matches!(err, ManagerError::ReviewAccessDenied));
}

#[test]
fn test_delete_own_review_decrements_count() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let review = manager
        .add_review(REQUESTER_ID, reservation.id, 4, "fine".to_string())
        .unwrap();
    manager.delete_review(REQUESTER_ID, review.id).unwrap();

    assert_eq!(manager.get_venue(venue.id).unwrap().review_count, 0);
    assert!(manager.list_reviews_for_venue(venue.id).unwrap().is_empty());

    // Deleting the review does not reopen the gate
    let err = manager
        .add_review(REQUESTER_ID, reservation.id, 4, "fine".to_string())
        .unwrap_err();
    assert!(matches!(err, ManagerError::AlreadyReviewed(_)));
}

#[test]
fn test_delete_foreign_review_denied() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let review = manager
        .add_review(REQUESTER_ID, reservation.id, 4, "fine".to_string())
        .unwrap();
    let err = manager
        .delete_review(REQUESTER_ID + 1, review.id)
        .unwrap_err();
    assert!(matches!(err, ManagerError::ReviewAccessDenied));
}

#[test]
fn test_admin_delete_bypasses_ownership() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let review = manager
        .add_review(REQUESTER_ID, reservation.id, 4, "fine".to_string())
        .unwrap();
    manager.delete_review_admin(review.id).unwrap();

    assert!(matches!(
        manager.delete_review_admin(review.id).unwrap_err(),
        ManagerError::ReviewNotFound(_)
    ));
    assert_eq!(manager.get_venue(venue.id).unwrap().review_count, 0);
}

#[test]
fn test_empty_content_rejected() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let err = manager
        .add_review(REQUESTER_ID, reservation.id, 4, String::new())
        .unwrap_err();
    assert!(matches!(err, ManagerError::EmptyReviewContent));

    // Whitespace-only content counts as empty
    let err = manager
        .add_review(REQUESTER_ID, reservation.id, 4, "   ".to_string())
        .unwrap_err();
    assert!(matches!(err, ManagerError::EmptyReviewContent));

    // The reservation is untouched, so a real review still goes through
    let reloaded = manager
        .get_reservation(REQUESTER_ID, reservation.id)
        .unwrap();
    assert_eq!(reloaded.status, ReservationStatus::Confirmed);
    manager
        .add_review(REQUESTER_ID, reservation.id, 4, "fine".to_string())
        .unwrap();
}

#[test]
fn test_update_to_empty_content_rejected() {
    let manager = create_test_manager();
    let venue = create_test_venue(&manager, 5);
    let reservation = confirmed_reservation(&manager, venue.id);

    let review = manager
        .add_review(REQUESTER_ID, reservation.id, 3, "okay".to_string())
        .unwrap();
    let err = manager
        .update_review(REQUESTER_ID, review.id, 5, String::new())
        .unwrap_err();
    assert!(matches!(err, ManagerError::EmptyReviewContent));

    let listed = manager.list_reviews_for_venue(venue.id).unwrap();
    assert_eq!(listed[0].content, "okay");
}

#[test]
fn test_list_reviews_unknown_venue() {
    let manager = create_test_manager();
    let err = manager.list_reviews_for_venue(999).unwrap_err();
    assert!(matches!(err, ManagerError::VenueNotFound(999)));
}
