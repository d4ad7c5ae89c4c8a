//! Session domain module.
//!
//! The signed-in user and credential, plus the lifecycle status of the store
//! that owns them.

mod aggregate;
mod status;

pub use aggregate::{Session, SessionState};
pub use status::SessionStatus;
