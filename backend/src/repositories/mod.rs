//! Store repositories
//!
//! Provides the data access layer over the key-value store.

pub mod session;

pub use session::{SessionRepository, SessionWrite};
