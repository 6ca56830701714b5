//! # Dream Team Core Library
//!
//! Everything needed to build a fantasy lineup of football players, minus the
//! network and the UI:
//!
//! - **Types**: players, themes, saved formations as the data service sends them
//! - **Formations**: compiled-in tactical templates and the slot classifier
//! - **Assignment**: placing, moving and randomizing players in slots
//! - **Catalog**: the split between server-side and client-side filters
//! - **Ranking**: ordering saved formations by votes
//!
//! All lineup operations are pure: they take the current [`Assignment`] and
//! return the next one.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assignment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod formation;
pub mod ranking;
pub mod types;

pub use crate::assignment::Assignment;
pub use crate::catalog::PlayerFilters;
pub use crate::config::DreamTeamConfig;
pub use crate::error::{DreamTeamError, Result};
pub use crate::formation::FormationTemplate;
pub use crate::types::*;
