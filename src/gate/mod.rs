//! PIN gate in front of the vault.
//!
//! A small state machine that counts failed attempts and enforces a timed
//! lockout. It knows nothing about vault content; it only decides whether
//! the caller may reach the store.

pub mod pin;
pub mod ticker;

pub use pin::{GateStatus, PinGate, SubmitOutcome};
pub use ticker::LockoutTicker;
