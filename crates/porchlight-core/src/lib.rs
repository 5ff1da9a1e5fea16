//! Leasing assistant core for Porchlight.
//!
//! This crate owns per-session conversations, prospect intake validation,
//! the rental inventory store, and tour booking with confirmation delivery.
//! The HTTP server is a thin veneer over [`FrontDesk::respond`].

pub mod error;
pub mod intake;
pub mod notify;

mod desk;
mod dialogue;
mod inventory;

pub use desk::FrontDesk;
pub use error::{DeskError, StoreError};
pub use inventory::{Inventory, Property, Slot};
pub use notify::{Confirmation, ConfirmationNotifier, LogNotifier, NotifyError};
