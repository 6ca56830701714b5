//! Formation assignment engine.
//!
//! An [`Assignment`] maps slot ids of one formation template to players. The
//! one invariant it carries: a player id appears in at most one slot. All
//! operations here are pure functions that take the current assignment and
//! return the next one; the caller decides what to keep.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DreamTeamError, Result};
use crate::formation::{FormationTemplate, accepted_positions};
use crate::types::{FormationPlayer, Player, PlayerId};

/// The in-progress lineup: slot id → player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    slots: BTreeMap<String, Player>,
}

impl Assignment {
    /// Create an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Player in `slot_id`, if any.
    #[must_use]
    pub fn get(&self, slot_id: &str) -> Option<&Player> {
        self.slots.get(slot_id)
    }

    /// Filled slots as `(slot id, player)`, ordered by slot id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Player)> {
        self.slots.iter().map(|(slot, player)| (slot.as_str(), player))
    }

    /// Ids of every assigned player.
    #[must_use]
    pub fn player_ids(&self) -> HashSet<&PlayerId> {
        self.slots.values().map(|p| &p.id).collect()
    }

    /// The slot currently holding `player_id`.
    #[must_use]
    pub fn slot_of(&self, player_id: &PlayerId) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, p)| &p.id == player_id)
            .map(|(slot, _)| slot.as_str())
    }

    /// Whether `player_id` occupies any slot.
    #[must_use]
    pub fn contains_player(&self, player_id: &PlayerId) -> bool {
        self.slot_of(player_id).is_some()
    }

    /// The lineup as `(player id, slot)` pairs in the template's slot order,
    /// ready to send to the data service.
    #[must_use]
    pub fn formation_players(&self, template: &FormationTemplate) -> Vec<FormationPlayer> {
        template
            .slot_ids()
            .filter_map(|slot| {
                self.slots.get(slot).map(|player| FormationPlayer {
                    player_id: player.id.clone(),
                    position_slot: slot.to_string(),
                })
            })
            .collect()
    }
}

fn ensure_slot(template: &FormationTemplate, slot_id: &str) -> Result<()> {
    if template.contains_slot(slot_id) {
        Ok(())
    } else {
        Err(DreamTeamError::UnknownSlot {
            template: template.name.to_string(),
            slot: slot_id.to_string(),
        })
    }
}

/// Put `player_id` into `slot_id`.
///
/// The player is looked up in `pool` first, then among the players already
/// assigned (so a player can be moved after the catalog filter changed). If
/// the player already sits in another slot, that slot is vacated. Whoever
/// occupied `slot_id` before is dropped from the lineup.
///
/// # Errors
/// `UnknownSlot` if the template has no such slot, `UnknownPlayer` if the
/// player is neither in the pool nor in the lineup.
pub fn assign(
    assignment: &Assignment,
    template: &FormationTemplate,
    pool: &[Player],
    slot_id: &str,
    player_id: &PlayerId,
) -> Result<Assignment> {
    ensure_slot(template, slot_id)?;

    let player = pool
        .iter()
        .find(|p| &p.id == player_id)
        .or_else(|| assignment.slots.values().find(|p| &p.id == player_id))
        .cloned()
        .ok_or_else(|| DreamTeamError::UnknownPlayer(player_id.clone()))?;

    let mut next = assignment.clone();
    next.slots.retain(|_, p| &p.id != player_id);
    next.slots.insert(slot_id.to_string(), player);
    Ok(next)
}

/// Empty `slot_id`. A no-op if the slot is already empty.
///
/// # Errors
/// `UnknownSlot` if the template has no such slot.
pub fn unassign(
    assignment: &Assignment,
    template: &FormationTemplate,
    slot_id: &str,
) -> Result<Assignment> {
    ensure_slot(template, slot_id)?;
    let mut next = assignment.clone();
    next.slots.remove(slot_id);
    Ok(next)
}

/// Empty every slot.
#[must_use]
pub fn clear(_assignment: &Assignment) -> Assignment {
    Assignment::new()
}

/// Build a random lineup for `template` from `pool`.
///
/// Slots are filled in template order. Each slot picks uniformly among the
/// pool players whose position the slot accepts and who were not picked for
/// an earlier slot in this pass. Slots with no such player stay empty.
///
/// # Errors
/// `UnrecognizedSlot` if the template contains a slot the classifier has no
/// rule for. No partial lineup is returned in that case.
pub fn randomize<R: Rng + ?Sized>(
    template: &FormationTemplate,
    pool: &[Player],
    rng: &mut R,
) -> Result<Assignment> {
    let rules = template
        .slots
        .iter()
        .map(|slot| accepted_positions(slot.id).map(|accepts| (slot.id, accepts)))
        .collect::<Result<Vec<_>>>()?;

    let mut next = Assignment::new();
    let mut used: HashSet<&PlayerId> = HashSet::new();

    for (slot_id, accepts) in rules {
        let compatible: Vec<&Player> = pool
            .iter()
            .filter(|p| accepts.contains(&p.position) && !used.contains(&p.id))
            .collect();

        match compatible.choose(rng) {
            Some(&player) => {
                used.insert(&player.id);
                next.slots.insert(slot_id.to_string(), player.clone());
            }
            None => debug!("No compatible player left for slot {slot_id} in {}", template.name),
        }
    }

    Ok(next)
}

/// Pool players not present in `assignment`, in pool order.
#[must_use]
pub fn available_players<'a>(pool: &'a [Player], assignment: &Assignment) -> Vec<&'a Player> {
    let taken = assignment.player_ids();
    pool.iter().filter(|p| !taken.contains(&p.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::{FOUR_FOUR_TWO, FOUR_THREE_THREE};
    use crate::types::Position;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn player(id: &str, position: Position) -> Player {
        Player {
            id: PlayerId::new(id),
            name: format!("Player {id}"),
            position,
            club: "Club".to_string(),
            country: "Country".to_string(),
            rating: 80,
            image_url: String::new(),
            achievements: vec![],
            era: "2000s".to_string(),
            description: String::new(),
        }
    }

    fn pool() -> Vec<Player> {
        vec![
            player("P1", Position::Goalkeeper),
            player("P2", Position::CenterBack),
            player("P42", Position::CenterMid),
            player("P7", Position::Striker),
        ]
    }

    #[test]
    fn moving_a_player_vacates_the_old_slot() {
        let pool = pool();
        let id = PlayerId::new("P42");
        let a = assign(&Assignment::new(), &FOUR_THREE_THREE, &pool, "CM1", &id).expect("assign");
        let b = assign(&a, &FOUR_THREE_THREE, &pool, "ST", &id).expect("reassign");

        assert_eq!(b.get("ST").map(|p| &p.id), Some(&id));
        assert!(b.get("CM1").is_none());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn assigning_to_an_occupied_slot_replaces_the_occupant() {
        let pool = pool();
        let a = assign(&Assignment::new(), &FOUR_THREE_THREE, &pool, "ST", &"P7".into()).expect("assign");
        let b = assign(&a, &FOUR_THREE_THREE, &pool, "ST", &"P42".into()).expect("assign");
        assert_eq!(b.get("ST").map(|p| p.id.as_str()), Some("P42"));
        assert!(!b.contains_player(&"P7".into()));
    }

    #[test]
    fn assigned_player_can_move_after_leaving_the_pool() {
        let full = pool();
        let a = assign(&Assignment::new(), &FOUR_THREE_THREE, &full, "GK", &"P1".into()).expect("assign");
        let b = assign(&a, &FOUR_THREE_THREE, &[], "CB1", &"P1".into()).expect("move");
        assert_eq!(b.slot_of(&"P1".into()), Some("CB1"));
    }

    #[test]
    fn invalid_references_are_rejected() {
        let pool = pool();
        let empty = Assignment::new();
        assert!(matches!(
            assign(&empty, &FOUR_THREE_THREE, &pool, "LM", &"P1".into()),
            Err(DreamTeamError::UnknownSlot { .. })
        ));
        assert!(matches!(
            assign(&empty, &FOUR_THREE_THREE, &pool, "GK", &"nobody".into()),
            Err(DreamTeamError::UnknownPlayer(_))
        ));
        assert!(matches!(
            unassign(&empty, &FOUR_FOUR_TWO, "CM3"),
            Err(DreamTeamError::UnknownSlot { .. })
        ));
    }

    #[test]
    fn unassign_empty_slot_is_noop() {
        let a = unassign(&Assignment::new(), &FOUR_THREE_THREE, "GK").expect("unassign");
        assert!(a.is_empty());
    }

    #[test]
    fn clear_empties_everything() {
        let pool = pool();
        let a = assign(&Assignment::new(), &FOUR_THREE_THREE, &pool, "GK", &"P1".into()).expect("assign");
        assert!(clear(&a).is_empty());
    }

    #[test]
    fn randomize_respects_slot_categories() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(7);
        let lineup = randomize(&FOUR_THREE_THREE, &pool, &mut rng).expect("randomize");

        assert_eq!(lineup.get("GK").map(|p| p.id.as_str()), Some("P1"));
        for (slot, player) in lineup.iter() {
            assert!(crate::formation::accepts(slot, player.position).expect("rule"));
        }
        // One striker for ST/LW/RW; one CB for four back slots; one CM for three.
        assert_eq!(lineup.len(), 4);
    }

    #[test]
    fn formation_players_follow_template_order() {
        let pool = pool();
        let mut a = Assignment::new();
        for (slot, id) in [("ST", "P7"), ("GK", "P1"), ("CM2", "P42")] {
            a = assign(&a, &FOUR_THREE_THREE, &pool, slot, &id.into()).expect("assign");
        }
        let slots: Vec<_> = a
            .formation_players(&FOUR_THREE_THREE)
            .into_iter()
            .map(|fp| fp.position_slot)
            .collect();
        assert_eq!(slots, vec!["GK", "CM2", "ST"]);
    }

    #[test]
    fn available_players_preserves_pool_order() {
        let pool = pool();
        let a = assign(&Assignment::new(), &FOUR_THREE_THREE, &pool, "CB1", &"P2".into()).expect("assign");
        let ids: Vec<_> = available_players(&pool, &a).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P42", "P7"]);
    }
}
