//! Shared fixtures for the lineup benchmarks.

use dreamteam_core::types::{Player, PlayerId, Position};

/// A catalog of `size` players cycling through every position.
#[must_use]
pub fn catalog(size: usize) -> Vec<Player> {
    (0..size)
        .map(|i| Player {
            id: PlayerId::new(format!("p{i}")),
            name: format!("Player {i}"),
            position: Position::ALL[i % Position::ALL.len()],
            club: format!("Club {}", i % 20),
            country: format!("Country {}", i % 12),
            rating: u8::try_from(60 + i % 40).unwrap_or(99),
            image_url: String::new(),
            achievements: Vec::new(),
            era: format!("{}s", 1960 + (i % 7) * 10),
            description: String::new(),
        })
        .collect()
}
