//! # dreamteam-session: Builder Session
//!
//! Ties the pure lineup engine in `dreamteam-core` to the data service in
//! `dreamteam-api`. The interface layer sends [`Action`]s; the session keeps
//! one [`AppState`] and performs the remote calls each action implies.
//!
//! ```text
//!   UI ──Action──▶ update(state) ──Command──▶ DataService
//!    ▲                  ▲                          │
//!    └──── AppState ────┴────── completion Action ◀┘
//! ```
//!
//! ## Modules
//!
//! - `state`: the serializable application state and notices
//! - `actions`: user and completion actions, remote commands
//! - `update`: the action handler
//! - `session`: runs commands against a [`dreamteam_api::DataService`]

pub mod actions;
pub mod error;
pub mod session;
pub mod state;
pub mod update;

pub use actions::{Action, Command, FilterChange};
pub use error::{SaveRejection, SessionError};
pub use session::Session;
pub use state::{AppState, Notice, NoticeKind, View};
