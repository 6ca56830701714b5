//! Core type definitions for the dream-team builder.
//!
//! Everything here mirrors what the remote data service sends and receives,
//! so all records are serializable and use the service's field names.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier of a player, assigned by the data service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a player ID from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier of a saved formation, assigned by the data service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormationId(pub String);

impl FormationId {
    /// Create a formation ID from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A player's primary position. Travels on the wire as its short code.
///
/// Wingers are split by side (`LW` / `RW`); both count as "winger" wherever
/// a slot accepts wingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// Goalkeeper.
    #[serde(rename = "GK")]
    Goalkeeper,
    /// Center-back.
    #[serde(rename = "CB")]
    CenterBack,
    /// Left-back.
    #[serde(rename = "LB")]
    LeftBack,
    /// Right-back.
    #[serde(rename = "RB")]
    RightBack,
    /// Central midfielder.
    #[serde(rename = "CM")]
    CenterMid,
    /// Defensive midfielder.
    #[serde(rename = "DM")]
    DefensiveMid,
    /// Attacking midfielder.
    #[serde(rename = "AM")]
    AttackingMid,
    /// Left midfielder.
    #[serde(rename = "LM")]
    LeftMid,
    /// Right midfielder.
    #[serde(rename = "RM")]
    RightMid,
    /// Striker.
    #[serde(rename = "ST")]
    Striker,
    /// Left winger.
    #[serde(rename = "LW")]
    LeftWing,
    /// Right winger.
    #[serde(rename = "RW")]
    RightWing,
}

impl Position {
    /// Every position, in back-to-front order.
    pub const ALL: [Self; 12] = [
        Self::Goalkeeper,
        Self::CenterBack,
        Self::LeftBack,
        Self::RightBack,
        Self::CenterMid,
        Self::DefensiveMid,
        Self::AttackingMid,
        Self::LeftMid,
        Self::RightMid,
        Self::Striker,
        Self::LeftWing,
        Self::RightWing,
    ];

    /// Short wire code (`GK`, `CB`, ...).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::CenterBack => "CB",
            Self::LeftBack => "LB",
            Self::RightBack => "RB",
            Self::CenterMid => "CM",
            Self::DefensiveMid => "DM",
            Self::AttackingMid => "AM",
            Self::LeftMid => "LM",
            Self::RightMid => "RM",
            Self::Striker => "ST",
            Self::LeftWing => "LW",
            Self::RightWing => "RW",
        }
    }

    /// Parse a short wire code. Case-sensitive, like the service.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Primary position.
    pub position: Position,
    /// Club the player is associated with.
    pub club: String,
    /// National team.
    #[serde(default)]
    pub country: String,
    /// Overall rating, 0–100.
    pub rating: u8,
    /// Image reference (URL).
    #[serde(default)]
    pub image_url: String,
    /// Titles and honours.
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Era tag, e.g. "1990s".
    pub era: String,
    /// Free-text blurb.
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

/// Filter criteria attached to a theme. Every field is optional; an empty
/// criteria set means "no narrowing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Restrict to one position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Restrict to one club.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    /// Restrict to one country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Restrict to one era.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
}

impl FilterCriteria {
    /// True when no field narrows the catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.club.is_none() && self.country.is_none() && self.era.is_none()
    }
}

/// A named filter/ruleset that narrows the player pool and groups saved
/// formations for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Unique identifier.
    pub id: String,
    /// Display name; saved formations reference themes by this name.
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Catalog narrowing for this theme.
    #[serde(default)]
    pub filter_criteria: FilterCriteria,
    /// Whether this is a "theme of the day".
    #[serde(default)]
    pub is_daily: bool,
    /// When the theme was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Saved formations
// ---------------------------------------------------------------------------

/// One (player, slot) pair of a saved formation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationPlayer {
    /// Player occupying the slot.
    pub player_id: PlayerId,
    /// Slot identifier within the formation template, e.g. "CB1".
    pub position_slot: String,
}

/// A lineup saved by some user, as returned by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFormation {
    /// Unique identifier.
    pub id: FormationId,
    /// Name the author typed when saving.
    pub user_name: String,
    /// Formation template name, e.g. "4-3-3".
    pub formation_name: String,
    /// Theme name the formation was built under.
    pub theme: String,
    /// Slot assignments.
    pub players: Vec<FormationPlayer>,
    /// Vote count.
    #[serde(default)]
    pub votes: u32,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl SavedFormation {
    /// Number of filled slots.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

// ---------------------------------------------------------------------------
// Pitch geometry
// ---------------------------------------------------------------------------

/// A normalized on-pitch coordinate, both axes in `[0, 100]`.
///
/// `y = 0` is the opponent's goal line, `y = 100` our own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchPoint {
    /// Horizontal position, left to right.
    pub x: f32,
    /// Vertical position, attack to defence.
    pub y: f32,
}

impl PitchPoint {
    /// Create a point, clamping both axes to `[0, 100]`.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
        }
    }
}

impl fmt::Display for PitchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.0}, {:.0})", self.x, self.y)
    }
}
