//! Venue model and capacity account

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capacity mutation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// Debit would drop availability below zero
    #[error("insufficient capacity: requested {requested}, available {available}")]
    Insufficient { requested: u32, available: u32 },
    /// Credit would push availability above the venue total.
    /// Signals a double-credit bug upstream, never a user error.
    #[error("capacity overflow: crediting {credited} onto {available}/{total}")]
    Overflow {
        credited: u32,
        available: u32,
        total: u32,
    },
}

/// Venue entity
///
/// Owns the capacity account: `total_slot_units` is fixed at creation,
/// `available_slot_units` moves between 0 and the total as reservations
/// are approved (debit) and cancelled or checked in (credit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub partner_id: i64,
    pub name: String,
    pub address: String,
    pub description: String,
    pub total_slot_units: u32,
    pub available_slot_units: u32,
    pub review_count: u32,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}

impl Venue {
    /// Whether `units` could be debited right now. No side effect and no
    /// hold: two callers can both observe availability before either debits.
    pub fn has_available(&self, units: u32) -> bool {
        units <= self.available_slot_units
    }

    /// Remove `units` from the available pool.
    pub fn debit(&mut self, units: u32) -> Result<(), CapacityError> {
        if units > self.available_slot_units {
            return Err(CapacityError::Insufficient {
                requested: units,
                available: self.available_slot_units,
            });
        }
        self.available_slot_units -= units;
        Ok(())
    }

    /// Return `units` to the available pool.
    pub fn credit(&mut self, units: u32) -> Result<(), CapacityError> {
        let next = self.available_slot_units.saturating_add(units);
        if next > self.total_slot_units {
            return Err(CapacityError::Overflow {
                credited: units,
                available: self.available_slot_units,
                total: self.total_slot_units,
            });
        }
        self.available_slot_units = next;
        Ok(())
    }
}

/// Create venue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueCreate {
    pub name: String,
    pub address: String,
    pub description: String,
    pub total_slot_units: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(total: u32, available: u32) -> Venue {
        Venue {
            id: 1,
            partner_id: 10,
            name: "Test Venue".to_string(),
            address: "1 Test St".to_string(),
            description: String::new(),
            total_slot_units: total,
            available_slot_units: available,
            review_count: 0,
            created_at: 0,
        }
    }

    #[test]
    fn test_has_available() {
        let v = venue(5, 3);
        assert!(v.has_available(0));
        assert!(v.has_available(3));
        assert!(!v.has_available(4));
    }

    #[test]
    fn test_has_available_does_not_mutate() {
        let v = venue(5, 3);
        assert!(v.has_available(3));
        assert_eq!(v.available_slot_units, 3);
    }

    #[test]
    fn test_debit_success() {
        let mut v = venue(5, 5);
        v.debit(3).unwrap();
        assert_eq!(v.available_slot_units, 2);
        v.debit(2).unwrap();
        assert_eq!(v.available_slot_units, 0);
    }

    #[test]
    fn test_debit_insufficient() {
        let mut v = venue(5, 2);
        let err = v.debit(3).unwrap_err();
        assert_eq!(
            err,
            CapacityError::Insufficient {
                requested: 3,
                available: 2,
            }
        );
        // Failed debit leaves the pool untouched
        assert_eq!(v.available_slot_units, 2);
    }

    #[test]
    fn test_credit_success() {
        let mut v = venue(5, 2);
        v.credit(3).unwrap();
        assert_eq!(v.available_slot_units, 5);
    }

    #[test]
    fn test_credit_overflow() {
        let mut v = venue(5, 4);
        let err = v.credit(2).unwrap_err();
        assert_eq!(
            err,
            CapacityError::Overflow {
                credited: 2,
                available: 4,
                total: 5,
            }
        );
        assert_eq!(v.available_slot_units, 4);
    }

    #[test]
    fn test_debit_credit_roundtrip_preserves_invariant() {
        let mut v = venue(5, 5);
        v.debit(3).unwrap();
        v.credit(3).unwrap();
        assert_eq!(v.available_slot_units, 5);
        assert!(v.available_slot_units <= v.total_slot_units);
    }
}
