//! Persisted record kinds: review applications and whitelist entries.

pub mod application;
pub mod whitelist_entry;

pub use application::{Application, ApplicationStatus, Edition, NewApplication};
pub use whitelist_entry::{NewEntry, WhitelistEntry};
