//! Actions: everything that can happen to a session.
//!
//! User actions come from the interface; completion actions carry the result
//! of a remote call back into [`crate::update::update`].

use dreamteam_api::{ApiError, NewFormation, PlayerQuery, Receipt};
use dreamteam_core::types::{FormationId, Player, PlayerId, Position, SavedFormation, Theme};

use crate::state::View;

/// A single catalog filter edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// Server-side position filter.
    Position(Option<Position>),
    /// Server-side club filter.
    Club(Option<String>),
    /// Server-side era filter.
    Era(Option<String>),
    /// Client-side country filter.
    Country(Option<String>),
    /// Client-side minimum rating.
    MinRating(u8),
}

/// A discrete event the session reacts to.
#[derive(Debug)]
pub enum Action {
    // -- Lineup ------------------------------------------------------------
    /// The user picked up a player.
    DragStart(PlayerId),
    /// The user let go of a player outside any slot.
    DragCancel,
    /// The dragged player was dropped on a slot.
    DropOnSlot(String),
    /// The user removed the player from a slot.
    RemoveFromSlot(String),
    /// Empty the pitch.
    ClearFormation,
    /// Fill the pitch at random from the current pool.
    RandomizeFormation,
    /// Switch formation template.
    SelectTemplate(String),

    // -- Catalog and themes -----------------------------------------------
    /// Edit one catalog filter.
    ChangeFilter(FilterChange),
    /// Build under this theme.
    SelectTheme(Theme),
    /// Show the theme picker.
    OpenThemeSelector,
    /// Hide the theme picker.
    CloseThemeSelector,

    // -- Saving, voting, sharing ------------------------------------------
    /// Show the save dialog.
    OpenSaveModal,
    /// Hide the save dialog.
    CloseSaveModal,
    /// The user typed in the name field.
    EditUserName(String),
    /// Save the lineup.
    Save,
    /// Vote for a saved formation.
    Vote(FormationId),
    /// Produce share text for a saved formation.
    Share(FormationId),
    /// Switch screens.
    ChangeView(View),

    // -- Startup -----------------------------------------------------------
    /// Start loading everything the builder needs, seeding first when
    /// `seed` is set. [`crate::Session::bootstrap`] runs the loads
    /// concurrently and follows them with [`Action::BootstrapFinished`].
    Bootstrap {
        /// Call `init-data` before the loads.
        seed: bool,
    },

    // -- Completions -------------------------------------------------------
    /// `init-data` returned.
    DataSeeded(Result<Receipt, ApiError>),
    /// Player list returned.
    PlayersLoaded(Result<Vec<Player>, ApiError>),
    /// Theme list returned.
    ThemesLoaded(Result<Vec<Theme>, ApiError>),
    /// Daily theme returned.
    DailyThemeLoaded(Result<Theme, ApiError>),
    /// Saved formations returned.
    FormationsLoaded(Result<Vec<SavedFormation>, ApiError>),
    /// Create-formation returned.
    FormationSaved(Result<SavedFormation, ApiError>),
    /// Vote returned.
    VoteRecorded(Result<Receipt, ApiError>),
    /// All startup loads have been applied.
    BootstrapFinished,
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DragStart(_) => "drag_start",
            Self::DragCancel => "drag_cancel",
            Self::DropOnSlot(_) => "drop_on_slot",
            Self::RemoveFromSlot(_) => "remove_from_slot",
            Self::ClearFormation => "clear_formation",
            Self::RandomizeFormation => "randomize_formation",
            Self::SelectTemplate(_) => "select_template",
            Self::ChangeFilter(_) => "change_filter",
            Self::SelectTheme(_) => "select_theme",
            Self::OpenThemeSelector => "open_theme_selector",
            Self::CloseThemeSelector => "close_theme_selector",
            Self::OpenSaveModal => "open_save_modal",
            Self::CloseSaveModal => "close_save_modal",
            Self::EditUserName(_) => "edit_user_name",
            Self::Save => "save",
            Self::Vote(_) => "vote",
            Self::Share(_) => "share",
            Self::ChangeView(_) => "change_view",
            Self::Bootstrap { .. } => "bootstrap",
            Self::DataSeeded(_) => "data_seeded",
            Self::PlayersLoaded(_) => "players_loaded",
            Self::ThemesLoaded(_) => "themes_loaded",
            Self::DailyThemeLoaded(_) => "daily_theme_loaded",
            Self::FormationsLoaded(_) => "formations_loaded",
            Self::FormationSaved(_) => "formation_saved",
            Self::VoteRecorded(_) => "vote_recorded",
            Self::BootstrapFinished => "bootstrap_finished",
        }
    }
}

/// A remote call [`crate::update::update`] wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `POST /init-data`.
    SeedData,
    /// `GET /players` with these server-side filters.
    LoadPlayers(PlayerQuery),
    /// `GET /themes`.
    LoadThemes,
    /// `GET /themes/daily`.
    LoadDailyTheme,
    /// `GET /formations`, optionally for one theme.
    LoadFormations(Option<String>),
    /// `POST /formations`.
    CreateFormation(NewFormation),
    /// `PUT /formations/{id}/vote`.
    Vote(FormationId),
}
