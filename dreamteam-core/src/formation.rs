//! Formation templates and the slot classifier.
//!
//! A template is a fixed tactical shape: an ordered list of named slots, each
//! with an on-pitch coordinate and a display label. Templates are compiled
//! in; there is no way to create one at runtime from the data service.
//!
//! The classifier maps a slot identifier to the set of positions allowed to
//! fill it. It is a lookup table of substring patterns, checked in order;
//! the first rule whose pattern occurs in the slot id wins. Slot ids that no
//! rule matches are an error.

use serde::Serialize;

use crate::error::{DreamTeamError, Result};
use crate::types::{PitchPoint, Position};

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// One named position in a formation template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    /// Slot identifier, unique within its template (e.g. "CB1").
    pub id: &'static str,
    /// Label shown on an empty slot (e.g. "CB").
    pub label: &'static str,
    /// Where the slot sits on the pitch.
    pub point: PitchPoint,
}

/// A tactical shape: name plus ordered slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormationTemplate {
    /// Template name, e.g. "4-3-3".
    pub name: &'static str,
    /// Slots in display order. Randomization walks them in this order.
    pub slots: &'static [Slot],
}

impl FormationTemplate {
    /// Look up a slot by id.
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<&'static Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Whether `id` names a slot of this template.
    #[must_use]
    pub fn contains_slot(&self, id: &str) -> bool {
        self.slot(id).is_some()
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the template has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot ids in display order.
    pub fn slot_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.id)
    }

    /// Check that every slot id is recognized by the classifier and unique.
    ///
    /// # Errors
    /// Returns `UnrecognizedSlot` for the first slot no rule matches, or
    /// `Config` if two slots share an id.
    pub fn validate(&self) -> Result<()> {
        for (i, slot) in self.slots.iter().enumerate() {
            accepted_positions(slot.id)?;
            if self.slots[..i].iter().any(|s| s.id == slot.id) {
                return Err(DreamTeamError::Config(format!(
                    "formation {} declares slot `{}` twice",
                    self.name, slot.id
                )));
            }
        }
        Ok(())
    }
}

const fn slot(id: &'static str, label: &'static str, x: f32, y: f32) -> Slot {
    Slot {
        id,
        label,
        point: PitchPoint { x, y },
    }
}

/// Classic 4-3-3.
pub const FOUR_THREE_THREE: FormationTemplate = FormationTemplate {
    name: "4-3-3",
    slots: &[
        slot("GK", "GK", 50.0, 90.0),
        slot("CB1", "CB", 35.0, 75.0),
        slot("CB2", "CB", 65.0, 75.0),
        slot("LB", "LB", 15.0, 70.0),
        slot("RB", "RB", 85.0, 70.0),
        slot("CM1", "CM", 30.0, 50.0),
        slot("CM2", "CM", 50.0, 55.0),
        slot("CM3", "CM", 70.0, 50.0),
        slot("LW", "LW", 20.0, 25.0),
        slot("RW", "RW", 80.0, 25.0),
        slot("ST", "ST", 50.0, 15.0),
    ],
};

/// Flat 4-4-2.
pub const FOUR_FOUR_TWO: FormationTemplate = FormationTemplate {
    name: "4-4-2",
    slots: &[
        slot("GK", "GK", 50.0, 90.0),
        slot("CB1", "CB", 35.0, 75.0),
        slot("CB2", "CB", 65.0, 75.0),
        slot("LB", "LB", 15.0, 70.0),
        slot("RB", "RB", 85.0, 70.0),
        slot("LM", "LM", 15.0, 45.0),
        slot("CM1", "CM", 40.0, 50.0),
        slot("CM2", "CM", 60.0, 50.0),
        slot("RM", "RM", 85.0, 45.0),
        slot("ST1", "ST", 40.0, 20.0),
        slot("ST2", "ST", 60.0, 20.0),
    ],
};

/// 4-2-3-1 with a double pivot.
pub const FOUR_TWO_THREE_ONE: FormationTemplate = FormationTemplate {
    name: "4-2-3-1",
    slots: &[
        slot("GK", "GK", 50.0, 90.0),
        slot("CB1", "CB", 35.0, 75.0),
        slot("CB2", "CB", 65.0, 75.0),
        slot("LB", "LB", 15.0, 70.0),
        slot("RB", "RB", 85.0, 70.0),
        slot("DM1", "DM", 40.0, 58.0),
        slot("DM2", "DM", 60.0, 58.0),
        slot("AM", "AM", 50.0, 38.0),
        slot("LW", "LW", 20.0, 30.0),
        slot("RW", "RW", 80.0, 30.0),
        slot("ST", "ST", 50.0, 15.0),
    ],
};

/// Every built-in template, in menu order.
pub const TEMPLATES: &[FormationTemplate] = &[FOUR_THREE_THREE, FOUR_FOUR_TWO, FOUR_TWO_THREE_ONE];

/// Name of the template selected when nothing else is configured.
pub const DEFAULT_TEMPLATE: &str = "4-3-3";

/// Find a built-in template by name.
///
/// # Errors
/// Returns `UnknownTemplate` if no built-in template has that name.
pub fn template(name: &str) -> Result<&'static FormationTemplate> {
    TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| DreamTeamError::UnknownTemplate(name.to_string()))
}

// ---------------------------------------------------------------------------
// Slot classifier
// ---------------------------------------------------------------------------

/// One classifier rule: if any pattern occurs in the slot id, the slot
/// accepts exactly `accepts`.
#[derive(Debug, Clone, Copy)]
pub struct SlotRule {
    /// Substrings that select this rule.
    pub patterns: &'static [&'static str],
    /// Positions allowed in a matching slot.
    pub accepts: &'static [Position],
}

/// The classifier table. Order matters: first match wins.
pub const SLOT_RULES: &[SlotRule] = &[
    SlotRule {
        patterns: &["GK"],
        accepts: &[Position::Goalkeeper],
    },
    SlotRule {
        patterns: &["CB", "LB", "RB"],
        accepts: &[Position::CenterBack, Position::LeftBack, Position::RightBack],
    },
    SlotRule {
        patterns: &["CM", "DM", "AM"],
        accepts: &[Position::CenterMid, Position::DefensiveMid, Position::AttackingMid],
    },
    SlotRule {
        patterns: &["LM", "RM"],
        accepts: &[
            Position::LeftMid,
            Position::RightMid,
            Position::Striker,
            Position::LeftWing,
            Position::RightWing,
        ],
    },
    SlotRule {
        patterns: &["ST", "CF", "LW", "RW"],
        accepts: &[Position::Striker, Position::LeftWing, Position::RightWing],
    },
];

/// Positions allowed to fill the slot with this id.
///
/// # Errors
/// Returns `UnrecognizedSlot` if no rule matches.
pub fn accepted_positions(slot_id: &str) -> Result<&'static [Position]> {
    SLOT_RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| slot_id.contains(p)))
        .map(|rule| rule.accepts)
        .ok_or_else(|| DreamTeamError::UnrecognizedSlot(slot_id.to_string()))
}

/// Whether a player in `position` may fill slot `slot_id`.
///
/// # Errors
/// Returns `UnrecognizedSlot` if no rule matches the slot id.
pub fn accepts(slot_id: &str, position: Position) -> Result<bool> {
    Ok(accepted_positions(slot_id)?.contains(&position))
}
