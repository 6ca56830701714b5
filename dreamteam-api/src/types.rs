//! Request and response bodies that only exist on the wire.

use serde::{Deserialize, Serialize};

use dreamteam_core::PlayerFilters;
use dreamteam_core::types::{FormationPlayer, Position};

/// The server-side part of a catalog query. Unset fields are left out of the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerQuery {
    /// Only this position.
    pub position: Option<Position>,
    /// Only this club.
    pub club: Option<String>,
    /// Only this era.
    pub era: Option<String>,
}

impl PlayerQuery {
    /// The server-side fields of `filters`.
    #[must_use]
    pub fn from_filters(filters: &PlayerFilters) -> Self {
        Self {
            position: filters.position,
            club: filters.club.clone(),
            era: filters.era.clone(),
        }
    }

    /// Query-string pairs, in a fixed order, skipping empty values.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(position) = self.position {
            pairs.push(("position", position.code().to_string()));
        }
        if let Some(club) = self.club.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("club", club.to_string()));
        }
        if let Some(era) = self.era.as_deref().filter(|e| !e.is_empty()) {
            pairs.push(("era", era.to_string()));
        }
        pairs
    }
}

/// Body of `POST /formations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFormation {
    /// Name typed by the author.
    pub user_name: String,
    /// Template name, e.g. "4-3-3".
    pub formation_name: String,
    /// Theme the lineup was built under.
    pub theme: String,
    /// The lineup, in template slot order.
    pub players: Vec<FormationPlayer>,
}

/// `{"message": ...}` acknowledgement returned by seeding and voting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Human-readable status from the service.
    #[serde(default)]
    pub message: String,
}
