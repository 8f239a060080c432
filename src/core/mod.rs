//! Application root: ties the ledger to its storage and clock.

pub mod clock;
pub mod tracker;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use tracker::ExpenseTracker;
