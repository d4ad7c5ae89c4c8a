//! Portal Core - client-side session and request lifecycle for the club portal
//!
//! This crate holds the non-visual core of the portal client: executors
//! that track the lifecycle of backend calls, and the session store that
//! keeps the signed-in user, persisted storage and the API client's
//! credential in step.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
