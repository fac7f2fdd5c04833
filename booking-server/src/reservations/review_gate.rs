//! Review operations gated on reservation state
//!
//! A review is only accepted for a reservation the requester completed:
//! the reservation must be `confirmed` (checked in), and reviewing moves
//! it to the terminal `reviewed` state so each visit yields at most one
//! review. The venue's `review_count` mirrors the number of live reviews.

use super::manager::{BookingManager, ManagerError, ManagerResult};
use super::storage::StorageError;
use shared::models::{ReservationEvent, ReservationStatus, Review};
use shared::util::{now_millis, snowflake_id};

impl BookingManager {
    /// Add a review for a confirmed reservation. Moves the reservation to
    /// `reviewed` and increments the venue's review count, all in one
    /// transaction.
    pub fn add_review(
        &self,
        requester_id: i64,
        reservation_id: i64,
        rating: u8,
        content: String,
    ) -> ManagerResult<Review> {
        if content.trim().is_empty() {
            return Err(ManagerError::EmptyReviewContent);
        }

        let txn = self.storage().begin_write()?;
        let mut reservation = self
            .storage()
            .get_reservation_txn(&txn, reservation_id)?
            .ok_or(ManagerError::ReservationNotFound(reservation_id))?;

        if reservation.requester_id != requester_id {
            return Err(ManagerError::AccessDenied);
        }
        match reservation.status {
            ReservationStatus::Confirmed => {}
            ReservationStatus::Reviewed => {
                return Err(ManagerError::AlreadyReviewed(reservation_id));
            }
            other => return Err(ManagerError::ReviewNotEligible(other)),
        }
        reservation.status = reservation.status.apply(ReservationEvent::Review)?;

        let mut venue = self
            .storage()
            .get_venue_txn(&txn, reservation.venue_id)?
            .ok_or(ManagerError::VenueNotFound(reservation.venue_id))?;
        venue.review_count += 1;

        let review = Review {
            id: snowflake_id(),
            reservation_id,
            venue_id: venue.id,
            requester_id,
            rating,
            content,
            created_at: now_millis(),
        };
        self.storage().put_review(&txn, &review)?;
        self.storage().put_venue(&txn, &venue)?;
        self.storage().put_reservation(&txn, &reservation)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            review_id = review.id,
            reservation_id,
            venue_id = venue.id,
            rating,
            "Review added"
        );
        Ok(review)
    }

    /// Update the rating or content of the requester's own review
    pub fn update_review(
        &self,
        requester_id: i64,
        review_id: i64,
        rating: u8,
        content: String,
    ) -> ManagerResult<Review> {
        if content.trim().is_empty() {
            return Err(ManagerError::EmptyReviewContent);
        }

        let txn = self.storage().begin_write()?;
        let mut review = self
            .storage()
            .get_review_txn(&txn, review_id)?
            .ok_or(ManagerError::ReviewNotFound(review_id))?;

        if review.requester_id != requester_id {
            return Err(ManagerError::ReviewAccessDenied);
        }
        review.rating = rating;
        review.content = content;
        self.storage().put_review(&txn, &review)?;
        txn.commit().map_err(StorageError::from)?;

        Ok(review)
    }

    /// Delete the requester's own review and decrement the venue's review
    /// count. The reservation stays `reviewed`; deleting a review does not
    /// reopen the gate.
    pub fn delete_review(&self, requester_id: i64, review_id: i64) -> ManagerResult<()> {
        self.delete_review_inner(Some(requester_id), review_id)
    }

    /// Administrative deletion, bypassing the ownership check
    pub fn delete_review_admin(&self, review_id: i64) -> ManagerResult<()> {
        self.delete_review_inner(None, review_id)
    }

    fn delete_review_inner(&self, requester_id: Option<i64>, review_id: i64) -> ManagerResult<()> {
        let txn = self.storage().begin_write()?;
        let review = self
            .storage()
            .get_review_txn(&txn, review_id)?
            .ok_or(ManagerError::ReviewNotFound(review_id))?;

        if let Some(requester_id) = requester_id
            && review.requester_id != requester_id
        {
            return Err(ManagerError::ReviewAccessDenied);
        }

        let mut venue = self
            .storage()
            .get_venue_txn(&txn, review.venue_id)?
            .ok_or(ManagerError::VenueNotFound(review.venue_id))?;
        venue.review_count = venue.review_count.saturating_sub(1);

        self.storage().remove_review(&txn, review_id)?;
        self.storage().put_venue(&txn, &venue)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(review_id, venue_id = venue.id, "Review deleted");
        Ok(())
    }

    /// List a venue's reviews ordered by creation time ascending
    pub fn list_reviews_for_venue(&self, venue_id: i64) -> ManagerResult<Vec<Review>> {
        // Venue existence check keeps an unknown id a 404, not an empty list
        self.storage()
            .get_venue(venue_id)?
            .ok_or(ManagerError::VenueNotFound(venue_id))?;
        Ok(self.storage().list_reviews_by_venue(venue_id)?)
    }
}
