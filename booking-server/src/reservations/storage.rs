//! redb-based storage layer for venues, reservations, reviews and users
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `venues` | `venue_id` | `Venue` | Venue + capacity account |
//! | `reservations` | `reservation_id` | `Reservation` | Reservation records |
//! | `reviews` | `review_id` | `Review` | Reviews |
//! | `users` | `user_id` | `User` | Principals |
//! | `user_emails` | `email` | `user_id` | Email lookup index |
//!
//! # Concurrency
//!
//! redb write transactions are single-writer: each mutating operation runs
//! its load, guard checks and writes inside one `begin_write()` scope, so a
//! capacity mutation and its state transition commit atomically and
//! concurrent operations against the same venue serialize.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{Reservation, ReservationStatus, Review, User, Venue};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for venues: key = venue_id, value = JSON-serialized Venue
const VENUES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("venues");

/// Table for reservations: key = reservation_id, value = JSON-serialized Reservation
const RESERVATIONS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("reservations");

/// Table for reviews: key = review_id, value = JSON-serialized Review
const REVIEWS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("reviews");

/// Table for users: key = user_id, value = JSON-serialized User
const USERS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("users");

/// Table for email lookup: key = email, value = user_id
const USER_EMAILS_TABLE: TableDefinition<&str, i64> = TableDefinition::new("user_emails");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Booking storage backed by redb
#[derive(Clone)]
pub struct BookingStorage {
    db: Arc<Database>,
}

impl BookingStorage {
    /// Open or create the database at the given path
    ///
    /// redb uses `Durability::Immediate` by default: commits are persistent
    /// as soon as `commit()` returns and the file is always in a consistent
    /// state, so an unclean shutdown never loses a committed reservation.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(db)
    }

    fn init_tables(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(VENUES_TABLE)?;
            let _ = write_txn.open_table(RESERVATIONS_TABLE)?;
            let _ = write_txn.open_table(REVIEWS_TABLE)?;
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USER_EMAILS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Venue Operations ==========

    /// Store a venue (within transaction)
    pub fn put_venue(&self, txn: &WriteTransaction, venue: &Venue) -> StorageResult<()> {
        let mut table = txn.open_table(VENUES_TABLE)?;
        let value = serde_json::to_vec(venue)?;
        table.insert(venue.id, value.as_slice())?;
        Ok(())
    }

    /// Get a venue by id (read-only)
    pub fn get_venue(&self, venue_id: i64) -> StorageResult<Option<Venue>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VENUES_TABLE)?;

        match table.get(venue_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a venue by id (within transaction)
    pub fn get_venue_txn(
        &self,
        txn: &WriteTransaction,
        venue_id: i64,
    ) -> StorageResult<Option<Venue>> {
        let table = txn.open_table(VENUES_TABLE)?;

        match table.get(venue_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all venues owned by a partner
    pub fn list_venues_by_partner(&self, partner_id: i64) -> StorageResult<Vec<Venue>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VENUES_TABLE)?;

        let mut venues = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let venue: Venue = serde_json::from_slice(value.value())?;
            if venue.partner_id == partner_id {
                venues.push(venue);
            }
        }

        venues.sort_by_key(|v| (v.created_at, v.id));
        Ok(venues)
    }

    // ========== Reservation Operations ==========

    /// Store a reservation (within transaction)
    pub fn put_reservation(
        &self,
        txn: &WriteTransaction,
        reservation: &Reservation,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(RESERVATIONS_TABLE)?;
        let value = serde_json::to_vec(reservation)?;
        table.insert(reservation.id, value.as_slice())?;
        Ok(())
    }

    /// Get a reservation by id (read-only)
    pub fn get_reservation(&self, reservation_id: i64) -> StorageResult<Option<Reservation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVATIONS_TABLE)?;

        match table.get(reservation_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a reservation by id (within transaction)
    pub fn get_reservation_txn(
        &self,
        txn: &WriteTransaction,
        reservation_id: i64,
    ) -> StorageResult<Option<Reservation>> {
        let table = txn.open_table(RESERVATIONS_TABLE)?;

        match table.get(reservation_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all reservations for a requester, optionally filtered by status,
    /// ordered by creation time ascending (ties broken by id)
    pub fn list_reservations_by_requester(
        &self,
        requester_id: i64,
        status: Option<ReservationStatus>,
    ) -> StorageResult<Vec<Reservation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVATIONS_TABLE)?;

        let mut reservations = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let reservation: Reservation = serde_json::from_slice(value.value())?;
            if reservation.requester_id != requester_id {
                continue;
            }
            if let Some(wanted) = status
                && reservation.status != wanted
            {
                continue;
            }
            reservations.push(reservation);
        }

        reservations.sort_by_key(|r| (r.created_at, r.id));
        Ok(reservations)
    }

    /// Get all reservations with a given status across a set of venues,
    /// ordered by creation time ascending (ties broken by id)
    pub fn list_reservations_by_venues(
        &self,
        venue_ids: &[i64],
        status: Option<ReservationStatus>,
    ) -> StorageResult<Vec<Reservation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVATIONS_TABLE)?;

        let mut reservations = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let reservation: Reservation = serde_json::from_slice(value.value())?;
            if !venue_ids.contains(&reservation.venue_id) {
                continue;
            }
            if let Some(wanted) = status
                && reservation.status != wanted
            {
                continue;
            }
            reservations.push(reservation);
        }

        reservations.sort_by_key(|r| (r.created_at, r.id));
        Ok(reservations)
    }

    /// Find a requester's reservation at a venue with the given status,
    /// within a transaction. Used by the kiosk email flow.
    pub fn find_reservation_txn(
        &self,
        txn: &WriteTransaction,
        venue_id: i64,
        requester_id: i64,
        status: ReservationStatus,
    ) -> StorageResult<Option<Reservation>> {
        let table = txn.open_table(RESERVATIONS_TABLE)?;

        for result in table.iter()? {
            let (_key, value) = result?;
            let reservation: Reservation = serde_json::from_slice(value.value())?;
            if reservation.venue_id == venue_id
                && reservation.requester_id == requester_id
                && reservation.status == status
            {
                return Ok(Some(reservation));
            }
        }

        Ok(None)
    }

    // ========== Review Operations ==========

    /// Store a review (within transaction)
    pub fn put_review(&self, txn: &WriteTransaction, review: &Review) -> StorageResult<()> {
        let mut table = txn.open_table(REVIEWS_TABLE)?;
        let value = serde_json::to_vec(review)?;
        table.insert(review.id, value.as_slice())?;
        Ok(())
    }

    /// Get a review by id (read-only)
    pub fn get_review(&self, review_id: i64) -> StorageResult<Option<Review>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVIEWS_TABLE)?;

        match table.get(review_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a review by id (within transaction)
    pub fn get_review_txn(
        &self,
        txn: &WriteTransaction,
        review_id: i64,
    ) -> StorageResult<Option<Review>> {
        let table = txn.open_table(REVIEWS_TABLE)?;

        match table.get(review_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Remove a review (within transaction)
    pub fn remove_review(&self, txn: &WriteTransaction, review_id: i64) -> StorageResult<()> {
        let mut table = txn.open_table(REVIEWS_TABLE)?;
        table.remove(review_id)?;
        Ok(())
    }

    /// Get all reviews for a venue, ordered by creation time ascending
    pub fn list_reviews_by_venue(&self, venue_id: i64) -> StorageResult<Vec<Review>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVIEWS_TABLE)?;

        let mut reviews = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let review: Review = serde_json::from_slice(value.value())?;
            if review.venue_id == venue_id {
                reviews.push(review);
            }
        }

        reviews.sort_by_key(|r| (r.created_at, r.id));
        Ok(reviews)
    }

    // ========== User Operations ==========

    /// Store a user and index its email (within transaction)
    pub fn put_user(&self, txn: &WriteTransaction, user: &User) -> StorageResult<()> {
        {
            let mut table = txn.open_table(USERS_TABLE)?;
            let value = serde_json::to_vec(user)?;
            table.insert(user.id, value.as_slice())?;
        }
        let mut emails = txn.open_table(USER_EMAILS_TABLE)?;
        emails.insert(user.email.as_str(), user.id)?;
        Ok(())
    }

    /// Get a user by id (read-only)
    pub fn get_user(&self, user_id: i64) -> StorageResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;

        match table.get(user_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Look up a user by email (read-only)
    pub fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(USER_EMAILS_TABLE)?;

        let user_id = match emails.get(email)? {
            Some(guard) => guard.value(),
            None => return Ok(None),
        };

        let table = read_txn.open_table(USERS_TABLE)?;
        match table.get(user_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Look up a user by email (within transaction)
    pub fn get_user_by_email_txn(
        &self,
        txn: &WriteTransaction,
        email: &str,
    ) -> StorageResult<Option<User>> {
        let user_id = {
            let emails = txn.open_table(USER_EMAILS_TABLE)?;
            match emails.get(email)? {
                Some(guard) => guard.value(),
                None => return Ok(None),
            }
        };

        let table = txn.open_table(USERS_TABLE)?;
        match table.get(user_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRole;
    use shared::util::{now_millis, snowflake_id};

    fn create_test_venue(id: i64, total: u32) -> Venue {
        Venue {
            id,
            partner_id: 100,
            name: format!("Venue {}", id),
            address: "1 Test St".to_string(),
            description: String::new(),
            total_slot_units: total,
            available_slot_units: total,
            review_count: 0,
            created_at: now_millis(),
        }
    }

    fn create_test_reservation(id: i64, venue_id: i64, requester_id: i64) -> Reservation {
        Reservation {
            id,
            requester_id,
            venue_id,
            visit_time: now_millis() + 86_400_000,
            slot_units: 2,
            status: ReservationStatus::Pending,
            created_at: now_millis(),
        }
    }

    #[test]
    fn test_venue_roundtrip() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let venue = create_test_venue(1, 5);

        let txn = storage.begin_write().unwrap();
        storage.put_venue(&txn, &venue).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_venue(1).unwrap().unwrap();
        assert_eq!(loaded.name, "Venue 1");
        assert_eq!(loaded.available_slot_units, 5);

        assert!(storage.get_venue(999).unwrap().is_none());
    }

    #[test]
    fn test_venue_txn_read_sees_uncommitted_write() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let venue = create_test_venue(1, 5);

        let txn = storage.begin_write().unwrap();
        storage.put_venue(&txn, &venue).unwrap();
        let loaded = storage.get_venue_txn(&txn, 1).unwrap();
        assert!(loaded.is_some());
        txn.commit().unwrap();
    }

    #[test]
    fn test_list_reservations_by_requester_ordering() {
        let storage = BookingStorage::open_in_memory().unwrap();

        let mut r1 = create_test_reservation(10, 1, 7);
        r1.created_at = 1000;
        let mut r2 = create_test_reservation(11, 1, 7);
        r2.created_at = 500;
        let mut r3 = create_test_reservation(12, 2, 8);
        r3.created_at = 100;

        let txn = storage.begin_write().unwrap();
        storage.put_reservation(&txn, &r1).unwrap();
        storage.put_reservation(&txn, &r2).unwrap();
        storage.put_reservation(&txn, &r3).unwrap();
        txn.commit().unwrap();

        let listed = storage.list_reservations_by_requester(7, None).unwrap();
        assert_eq!(listed.len(), 2);
        // Creation-time ascending, not id order
        assert_eq!(listed[0].id, 11);
        assert_eq!(listed[1].id, 10);
    }

    #[test]
    fn test_list_reservations_status_filter() {
        let storage = BookingStorage::open_in_memory().unwrap();

        let mut pending = create_test_reservation(1, 1, 7);
        pending.status = ReservationStatus::Pending;
        let mut allowed = create_test_reservation(2, 1, 7);
        allowed.status = ReservationStatus::Allowed;

        let txn = storage.begin_write().unwrap();
        storage.put_reservation(&txn, &pending).unwrap();
        storage.put_reservation(&txn, &allowed).unwrap();
        txn.commit().unwrap();

        let listed = storage
            .list_reservations_by_requester(7, Some(ReservationStatus::Allowed))
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 2);
    }

    #[test]
    fn test_list_reservations_by_venues() {
        let storage = BookingStorage::open_in_memory().unwrap();

        let r1 = create_test_reservation(1, 10, 7);
        let r2 = create_test_reservation(2, 11, 8);
        let r3 = create_test_reservation(3, 12, 9);

        let txn = storage.begin_write().unwrap();
        storage.put_reservation(&txn, &r1).unwrap();
        storage.put_reservation(&txn, &r2).unwrap();
        storage.put_reservation(&txn, &r3).unwrap();
        txn.commit().unwrap();

        let listed = storage
            .list_reservations_by_venues(&[10, 11], Some(ReservationStatus::Pending))
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| r.venue_id == 10 || r.venue_id == 11));
    }

    #[test]
    fn test_user_email_lookup() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let user = User {
            id: snowflake_id(),
            email: "guest@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::User,
            created_at: now_millis(),
        };

        let txn = storage.begin_write().unwrap();
        storage.put_user(&txn, &user).unwrap();
        txn.commit().unwrap();

        let found = storage.get_user_by_email("guest@example.com").unwrap();
        assert_eq!(found.unwrap().id, user.id);

        assert!(storage.get_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_review_roundtrip_and_remove() {
        let storage = BookingStorage::open_in_memory().unwrap();
        let review = Review {
            id: 1,
            reservation_id: 2,
            venue_id: 3,
            requester_id: 4,
            rating: 5,
            content: "great".to_string(),
            created_at: now_millis(),
        };

        let txn = storage.begin_write().unwrap();
        storage.put_review(&txn, &review).unwrap();
        txn.commit().unwrap();

        assert!(storage.get_review(1).unwrap().is_some());
        let by_venue = storage.list_reviews_by_venue(3).unwrap();
        assert_eq!(by_venue.len(), 1);

        let txn = storage.begin_write().unwrap();
        storage.remove_review(&txn, 1).unwrap();
        txn.commit().unwrap();

        assert!(storage.get_review(1).unwrap().is_none());
    }
}
