//! Reservation Module for Booking Server
//!
//! This module implements table-slot reservation management:
//!
//! - **manager**: Core BookingManager for the reservation lifecycle
//! - **storage**: redb-based persistence layer for venues, reservations, reviews and users
//! - **policy**: Time-window checks for cancellation and check-in
//! - **review_gate**: Review operations gated on reservation state
//!
//! # Data Flow
//!
//! 1. A requester submits a reservation (`pending`, no capacity held)
//! 2. The venue's partner approves or rejects it; approval debits the
//!    venue's capacity account
//! 3. The requester may cancel while the notice window is open (credit),
//!    or check in at the venue kiosk before the visit (credit)
//! 4. A checked-in reservation can be reviewed exactly once

pub mod manager;
pub mod policy;
pub mod review_gate;
pub mod storage;

// Re-exports
pub use manager::{BookingManager, ManagerError, ManagerResult};
pub use storage::{BookingStorage, StorageError, StorageResult};

// Re-export shared types for convenience
pub use shared::models::{
    Reservation, ReservationEvent, ReservationStatus, Review, Venue, VenueCreate,
};
