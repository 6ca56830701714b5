//! # dreamteam-api: Data Service Client
//!
//! Typed access to the remote service that owns the player catalog, the
//! themes and the saved formations:
//!   - **Reads**: players (server-side filtered), themes, today's theme,
//!     saved formations by theme
//!   - **Writes**: create a saved formation, vote for one
//!   - **Seeding**: the fire-once `init-data` call
//!
//! Everything goes through the [`DataService`] trait so the session layer
//! can run against a fake in tests. [`DataClient`] is the `reqwest`
//! implementation. One attempt per call; failures come back as [`ApiError`]
//! and it is up to the caller to tell the user.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DataClient, DataService};
pub use error::ApiError;
pub use types::{NewFormation, PlayerQuery, Receipt};
