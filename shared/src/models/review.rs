//! Review model

use serde::{Deserialize, Serialize};

/// Review entity
///
/// Created at most once per reservation, only after the reservation has been
/// confirmed by check-in. Ownership follows the reservation's requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub reservation_id: i64,
    pub venue_id: i64,
    pub requester_id: i64,
    /// 0-5 inclusive
    pub rating: u8,
    pub content: String,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}
