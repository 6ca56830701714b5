//! Player catalog filtering.
//!
//! Position, club and era are filtered by the data service; minimum rating
//! and country are applied here after the fetch.

use serde::{Deserialize, Serialize};

use crate::types::{FilterCriteria, Player, Position};

/// The active catalog filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFilters {
    /// Server-side: only this position.
    pub position: Option<Position>,
    /// Server-side: only this club.
    pub club: Option<String>,
    /// Server-side: only this era.
    pub era: Option<String>,
    /// Client-side: only this country.
    pub country: Option<String>,
    /// Client-side: minimum rating (inclusive).
    pub min_rating: u8,
}

impl PlayerFilters {
    /// Overlay a theme's criteria: every field the criteria set replaces the
    /// current value, everything else is kept.
    #[must_use]
    pub fn with_criteria(&self, criteria: &FilterCriteria) -> Self {
        let mut next = self.clone();
        if let Some(position) = criteria.position {
            next.position = Some(position);
        }
        if let Some(club) = &criteria.club {
            next.club = Some(club.clone());
        }
        if let Some(country) = &criteria.country {
            next.country = Some(country.clone());
        }
        if let Some(era) = &criteria.era {
            next.era = Some(era.clone());
        }
        next
    }

    /// Whether `player` passes the client-side filters.
    #[must_use]
    pub fn admits(&self, player: &Player) -> bool {
        player.rating >= self.min_rating
            && self
                .country
                .as_deref()
                .is_none_or(|country| player.country == country)
    }

    /// Whether the server-side part of two filter sets differs, i.e. whether
    /// switching from `self` to `other` needs a fresh fetch.
    #[must_use]
    pub fn needs_refetch(&self, other: &Self) -> bool {
        self.position != other.position || self.club != other.club || self.era != other.era
    }
}

/// Players from `fetched` that pass the client-side filters, in order.
#[must_use]
pub fn apply_client_side(fetched: &[Player], filters: &PlayerFilters) -> Vec<Player> {
    fetched.iter().filter(|p| filters.admits(p)).cloned().collect()
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

/// Distinct non-empty clubs, in first-seen order.
#[must_use]
pub fn distinct_clubs(players: &[Player]) -> Vec<&str> {
    distinct(players.iter().map(|p| p.club.as_str()).filter(|c| !c.is_empty()))
}

/// Distinct non-empty eras, in first-seen order.
#[must_use]
pub fn distinct_eras(players: &[Player]) -> Vec<&str> {
    distinct(players.iter().map(|p| p.era.as_str()).filter(|e| !e.is_empty()))
}

/// Distinct positions, in first-seen order.
#[must_use]
pub fn distinct_positions(players: &[Player]) -> Vec<Position> {
    distinct(players.iter().map(|p| p.position))
}
