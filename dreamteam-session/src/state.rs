//! Application state: one owned, serializable value per session.

use serde::{Deserialize, Serialize};

use dreamteam_core::assignment::{self, Assignment};
use dreamteam_core::catalog::{self, PlayerFilters};
use dreamteam_core::config::BuilderConfig;
use dreamteam_core::formation::{self, FormationTemplate};
use dreamteam_core::ranking;
use dreamteam_core::types::{Player, PlayerId, Position, SavedFormation, Theme};
use dreamteam_core::Result;

/// Fixed user-facing messages.
pub mod messages {
    /// Save refused: no user name.
    pub const ENTER_NAME: &str = "Please enter your name";
    /// Save refused: empty lineup.
    pub const ADD_PLAYERS: &str = "Please add at least one player to your formation";
    /// Save succeeded.
    pub const SAVED: &str = "Formation saved successfully!";
    /// Save failed remotely.
    pub const SAVE_FAILED: &str = "Error saving the formation";
    /// Vote failed remotely.
    pub const VOTE_FAILED: &str = "Error voting";
    /// Seeding failed.
    pub const SEED_FAILED: &str = "Error initializing sample data";
    /// Player load failed.
    pub const PLAYERS_FAILED: &str = "Error loading players";
    /// Theme load failed.
    pub const THEMES_FAILED: &str = "Error loading themes";
    /// Daily theme load failed.
    pub const DAILY_THEME_FAILED: &str = "Error loading the daily theme";
    /// Formation load failed.
    pub const FORMATIONS_FAILED: &str = "Error loading formations";
}

/// Top-level screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Pitch plus player list.
    #[default]
    Builder,
    /// Saved formations ordered by votes.
    Rankings,
    /// Theme browser.
    Themes,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Something worked.
    Success,
    /// Neutral information, e.g. share text.
    Info,
    /// Something failed; prior state was kept.
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Text to show.
    pub message: String,
}

/// Which overlays are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modals {
    /// The save dialog.
    pub save: bool,
    /// The theme picker.
    pub theme_selector: bool,
}

/// Everything the UI renders from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Current screen.
    pub view: View,
    /// Active catalog filters.
    pub filters: PlayerFilters,
    /// Selected formation template name.
    pub formation: String,
    /// The lineup under construction.
    pub assignment: Assignment,
    /// Players as last returned by the service (server-side filters only).
    pub fetched_players: Vec<Player>,
    /// `fetched_players` after client-side filters; the pool lineups use.
    pub players: Vec<Player>,
    /// Every theme.
    pub themes: Vec<Theme>,
    /// Theme the user is building under.
    pub current_theme: Option<Theme>,
    /// Saved formations, as last loaded.
    pub formations: Vec<SavedFormation>,
    /// Name typed into the save dialog.
    pub user_name: String,
    /// Player being dragged, if any.
    pub dragged: Option<PlayerId>,
    /// Overlay visibility.
    pub modals: Modals,
    /// True until the startup loads have finished.
    pub loading: bool,
    /// Messages not yet shown.
    pub notices: Vec<Notice>,
    /// Theme name recorded when saving without a current theme.
    pub fallback_theme: String,
}

impl Default for AppState {
    fn default() -> Self {
        let builder = BuilderConfig::default();
        Self {
            view: View::default(),
            filters: PlayerFilters::default(),
            formation: builder.default_formation,
            assignment: Assignment::new(),
            fetched_players: Vec::new(),
            players: Vec::new(),
            themes: Vec::new(),
            current_theme: None,
            formations: Vec::new(),
            user_name: String::new(),
            dragged: None,
            modals: Modals::default(),
            loading: true,
            notices: Vec::new(),
            fallback_theme: builder.fallback_theme_name,
        }
    }
}

impl AppState {
    /// Fresh state using the builder defaults from configuration.
    ///
    /// # Errors
    /// Returns `UnknownTemplate` if the configured default formation does
    /// not exist.
    pub fn new(config: &BuilderConfig) -> Result<Self> {
        formation::template(&config.default_formation)?;
        Ok(Self {
            formation: config.default_formation.clone(),
            fallback_theme: config.fallback_theme_name.clone(),
            ..Self::default()
        })
    }

    /// The selected formation template.
    ///
    /// # Errors
    /// Returns `UnknownTemplate` if `formation` names no built-in template.
    pub fn template(&self) -> Result<&'static FormationTemplate> {
        formation::template(&self.formation)
    }

    /// Name saved formations are filed under right now.
    #[must_use]
    pub fn theme_name(&self) -> &str {
        self.current_theme
            .as_ref()
            .map_or(self.fallback_theme.as_str(), |t| t.name.as_str())
    }

    /// Pool players not in the lineup.
    #[must_use]
    pub fn available_players(&self) -> Vec<&Player> {
        assignment::available_players(&self.players, &self.assignment)
    }

    /// Saved formations, most votes first.
    #[must_use]
    pub fn ranked_formations(&self) -> Vec<SavedFormation> {
        let mut ranked = self.formations.clone();
        ranking::rank_by_votes(&mut ranked);
        ranked
    }

    /// Club filter choices.
    #[must_use]
    pub fn club_options(&self) -> Vec<&str> {
        catalog::distinct_clubs(&self.fetched_players)
    }

    /// Era filter choices.
    #[must_use]
    pub fn era_options(&self) -> Vec<&str> {
        catalog::distinct_eras(&self.fetched_players)
    }

    /// Position filter choices.
    #[must_use]
    pub fn position_options(&self) -> Vec<Position> {
        catalog::distinct_positions(&self.fetched_players)
    }

    /// Re-run the client-side filters over the cached catalog.
    pub fn refilter(&mut self) {
        self.players = catalog::apply_client_side(&self.fetched_players, &self.filters);
    }

    /// Queue a notice.
    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
        });
    }

    /// Take every queued notice, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_starts_on_the_builder() {
        let state = AppState::default();
        assert_eq!(state.view, View::Builder);
        assert_eq!(state.formation, "4-3-3");
        assert!(state.loading);
        assert_eq!(state.theme_name(), "General");
        assert!(state.template().is_ok());
    }

    #[test]
    fn new_rejects_unknown_default_formation() {
        let config = BuilderConfig {
            default_formation: "3-5-2".to_string(),
            ..BuilderConfig::default()
        };
        assert!(AppState::new(&config).is_err());
    }

    #[test]
    fn notices_drain_in_order() {
        let mut state = AppState::default();
        state.notify(NoticeKind::Error, "first");
        state.notify(NoticeKind::Success, "second");
        let drained = state.take_notices();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert!(state.notices.is_empty());
    }

    #[test]
    fn state_serializes() {
        let state = AppState::default();
        let json = serde_json::to_value(&state).expect("serializes");
        assert_eq!(json["view"], "builder");
        assert_eq!(json["formation"], "4-3-3");
    }
}
