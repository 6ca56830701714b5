//! Themed rankings of saved formations.

use crate::types::SavedFormation;

/// Sort formations by votes, most first. Ties keep their incoming order.
pub fn rank_by_votes(formations: &mut [SavedFormation]) {
    formations.sort_by(|a, b| b.votes.cmp(&a.votes));
}

/// One-line message for sharing a saved formation.
#[must_use]
pub fn share_text(formation: &SavedFormation) -> String {
    format!(
        "Check out my dream team! {} - Theme: {}",
        formation.formation_name, formation.theme
    )
}
