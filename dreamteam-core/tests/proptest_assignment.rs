//! Property-Based Tests for the assignment engine.
//!
//! Uses `proptest` to check the lineup invariants under random pools and
//! random sequences of user actions: no player ever holds two slots, and
//! the available list never overlaps the lineup.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use dreamteam_core::assignment::{self, Assignment};
use dreamteam_core::formation::{self, TEMPLATES};
use dreamteam_core::types::{Player, PlayerId, Position};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn player(index: usize, position: Position) -> Player {
    Player {
        id: PlayerId::new(format!("P{index}")),
        name: format!("Player {index}"),
        position,
        club: "Club".to_string(),
        country: "Country".to_string(),
        rating: 75,
        image_url: String::new(),
        achievements: vec![],
        era: "2010s".to_string(),
        description: String::new(),
    }
}

fn arb_pool() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(0..Position::ALL.len(), 0..40).prop_map(|positions| {
        positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| player(i, Position::ALL[p]))
            .collect()
    })
}

/// (template index, pool, list of (slot index, player index) moves)
fn arb_session() -> impl Strategy<Value = (usize, Vec<Player>, Vec<(usize, usize)>)> {
    (
        0..TEMPLATES.len(),
        arb_pool(),
        prop::collection::vec((0..11usize, 0..40usize), 0..60),
    )
}

fn assert_no_duplicates(lineup: &Assignment) {
    let ids: Vec<_> = lineup.iter().map(|(_, p)| &p.id).collect();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len(), "a player holds two slots");
}

// ---------------------------------------------------------------------------
// Property: assign never duplicates a player
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn assign_sequences_never_duplicate((t, pool, moves) in arb_session()) {
        let template = &TEMPLATES[t];
        let mut lineup = Assignment::new();
        for (slot, who) in moves {
            if pool.is_empty() {
                break;
            }
            let slot_id = template.slots[slot % template.len()].id;
            let id = &pool[who % pool.len()].id;
            lineup = assignment::assign(&lineup, template, &pool, slot_id, id)
                .expect("slot and player come from the template and pool");
            assert_no_duplicates(&lineup);
            prop_assert_eq!(lineup.slot_of(id), Some(slot_id));
        }
        prop_assert!(lineup.len() <= template.len());
    }
}

// ---------------------------------------------------------------------------
// Property: assign then unassign leaves the prior lineup minus the occupant
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn assign_then_unassign_removes_only_the_touched_slot(
        (t, pool, moves) in arb_session(),
        target in 0..11usize,
        who in 0..40usize,
    ) {
        prop_assume!(!pool.is_empty());
        let template = &TEMPLATES[t];
        let mut before = Assignment::new();
        for (slot, p) in moves {
            let slot_id = template.slots[slot % template.len()].id;
            before = assignment::assign(&before, template, &pool, slot_id, &pool[p % pool.len()].id)
                .expect("valid move");
        }

        let slot_id = template.slots[target % template.len()].id;
        let id = pool[who % pool.len()].id.clone();
        let placed = assignment::assign(&before, template, &pool, slot_id, &id).expect("valid move");
        let after = assignment::unassign(&placed, template, slot_id).expect("valid slot");

        let mut expected: HashSet<PlayerId> =
            before.player_ids().into_iter().cloned().collect();
        expected.remove(&id);
        if let Some(occupant) = before.get(slot_id) {
            expected.remove(&occupant.id);
        }
        let actual: HashSet<PlayerId> = after.player_ids().into_iter().cloned().collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(after.get(slot_id).is_none());
    }
}

// ---------------------------------------------------------------------------
// Property: randomize respects categories and never duplicates
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn randomize_is_category_correct(t in 0..TEMPLATES.len(), pool in arb_pool(), seed in any::<u64>()) {
        let template = &TEMPLATES[t];
        let mut rng = StdRng::seed_from_u64(seed);
        let lineup = assignment::randomize(template, &pool, &mut rng).expect("built-in template");

        assert_no_duplicates(&lineup);
        for (slot, p) in lineup.iter() {
            prop_assert!(template.contains_slot(slot));
            prop_assert!(formation::accepts(slot, p.position).expect("classified slot"));
        }
    }

    #[test]
    fn randomize_is_reproducible_with_a_seed(pool in arb_pool(), seed in any::<u64>()) {
        let template = &TEMPLATES[0];
        let a = assignment::randomize(template, &pool, &mut StdRng::seed_from_u64(seed)).expect("ok");
        let b = assignment::randomize(template, &pool, &mut StdRng::seed_from_u64(seed)).expect("ok");
        prop_assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Property: available players and the lineup are disjoint
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn available_and_assigned_are_disjoint(pool in arb_pool(), seed in any::<u64>()) {
        let template = formation::template("4-4-2").expect("built-in");
        let lineup = assignment::randomize(template, &pool, &mut StdRng::seed_from_u64(seed)).expect("ok");
        let available = assignment::available_players(&pool, &lineup);

        for p in &available {
            prop_assert!(!lineup.contains_player(&p.id));
        }
        prop_assert_eq!(available.len() + lineup.len(), pool.len());
        prop_assert!(assignment::clear(&lineup).is_empty());
    }
}
