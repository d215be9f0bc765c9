//! # Nailbook core
//!
//! Domain types and pure logic for the salon booking assistant: the service
//! catalog and booking models, `HH:MM` time handling, the slot availability
//! calculator, the per-user dialogue state machine and the storage trait the
//! outer crates implement or consume.

pub mod errors;
pub mod models;
pub mod session;
pub mod slots;
pub mod store;
pub mod time;

pub use errors::{BookingError, BookingResult, SlotError};
pub use slots::{
    check_booking_date, compute_available_slots, is_slot_available, DEFAULT_STEP_MINUTES,
    MAX_STEP_MINUTES,
};
pub use store::BookingStore;
