//! The action handler.
//!
//! [`update`] applies one [`Action`] to the state and returns the remote
//! calls to make next. It never touches the network itself, so every rule
//! here is testable without a service.

use rand::Rng;
use tracing::{debug, info, warn};

use dreamteam_api::{ApiError, NewFormation, PlayerQuery};
use dreamteam_core::assignment::{self, Assignment};
use dreamteam_core::catalog::PlayerFilters;
use dreamteam_core::formation;
use dreamteam_core::ranking;

use crate::actions::{Action, Command, FilterChange};
use crate::error::{SaveRejection, SessionError};
use crate::state::{AppState, NoticeKind, View, messages};

/// Apply `action` to `state`.
///
/// Returns the commands to run, in order. On error the state has already
/// recorded a notice and kept its previous lineup and data.
///
/// # Errors
/// `Rejected` for a locally refused save, `Core` for an invalid slot,
/// player or template reference, `Api` when a completion carries a failure.
pub fn update<R: Rng + ?Sized>(
    state: &mut AppState,
    action: Action,
    rng: &mut R,
) -> Result<Vec<Command>, SessionError> {
    debug!("Handling action {}", action.name());

    match action {
        // -- Lineup --------------------------------------------------------
        Action::DragStart(id) => state.dragged = Some(id),
        Action::DragCancel => state.dragged = None,
        Action::DropOnSlot(slot) => {
            let Some(id) = state.dragged.take() else {
                return Ok(Vec::new());
            };
            let next = state
                .template()
                .and_then(|t| assignment::assign(&state.assignment, t, &state.players, &slot, &id));
            state.assignment = rejected_reference(state, next)?;
        }
        Action::RemoveFromSlot(slot) => {
            let next = state
                .template()
                .and_then(|t| assignment::unassign(&state.assignment, t, &slot));
            state.assignment = rejected_reference(state, next)?;
        }
        Action::ClearFormation => state.assignment = assignment::clear(&state.assignment),
        Action::RandomizeFormation => {
            let next = state
                .template()
                .and_then(|t| assignment::randomize(t, &state.players, rng));
            state.assignment = rejected_reference(state, next)?;
            debug!("Randomized lineup fills {} slots", state.assignment.len());
        }
        Action::SelectTemplate(name) => {
            let template = rejected_reference(state, formation::template(&name))?;
            info!("Switched formation to {}", template.name);
            state.formation = template.name.to_string();
            state.assignment = Assignment::new();
        }

        // -- Catalog and themes --------------------------------------------
        Action::ChangeFilter(change) => return Ok(change_filter(state, change)),
        Action::SelectTheme(theme) => {
            state.filters = if theme.filter_criteria.is_empty() {
                PlayerFilters::default()
            } else {
                state.filters.with_criteria(&theme.filter_criteria)
            };
            let name = theme.name.clone();
            info!("Selected theme {name}");
            state.current_theme = Some(theme);
            state.modals.theme_selector = false;
            return Ok(vec![
                Command::LoadPlayers(PlayerQuery::from_filters(&state.filters)),
                Command::LoadFormations(Some(name)),
            ]);
        }
        Action::OpenThemeSelector => state.modals.theme_selector = true,
        Action::CloseThemeSelector => state.modals.theme_selector = false,

        // -- Saving, voting, sharing ---------------------------------------
        Action::OpenSaveModal => state.modals.save = true,
        Action::CloseSaveModal => state.modals.save = false,
        Action::EditUserName(name) => state.user_name = name,
        Action::Save => return save(state).map(|body| vec![Command::CreateFormation(body)]),
        Action::Vote(id) => return Ok(vec![Command::Vote(id)]),
        Action::Share(id) => {
            let text = state.formations.iter().find(|f| f.id == id).map(ranking::share_text);
            match text {
                Some(text) => state.notify(NoticeKind::Info, text),
                None => warn!("Cannot share unknown formation {id}"),
            }
        }
        Action::ChangeView(view) => {
            state.view = view;
            if view == View::Rankings {
                return Ok(vec![Command::LoadFormations(None)]);
            }
        }

        // -- Startup -------------------------------------------------------
        Action::Bootstrap { seed } => {
            state.loading = true;
            let mut commands = Vec::with_capacity(5);
            if seed {
                commands.push(Command::SeedData);
            }
            commands.extend([
                Command::LoadPlayers(PlayerQuery::from_filters(&state.filters)),
                Command::LoadThemes,
                Command::LoadFormations(None),
                Command::LoadDailyTheme,
            ]);
            return Ok(commands);
        }

        // -- Completions ---------------------------------------------------
        Action::DataSeeded(result) => match result {
            Ok(receipt) => debug!("Seed: {}", receipt.message),
            Err(err) => return remote_failure(state, messages::SEED_FAILED, err),
        },
        Action::PlayersLoaded(result) => match result {
            Ok(players) => {
                state.fetched_players = players;
                state.refilter();
                debug!(
                    "{} players fetched, {} after local filters",
                    state.fetched_players.len(),
                    state.players.len()
                );
            }
            Err(err) => return remote_failure(state, messages::PLAYERS_FAILED, err),
        },
        Action::ThemesLoaded(result) => match result {
            Ok(themes) => state.themes = themes,
            Err(err) => return remote_failure(state, messages::THEMES_FAILED, err),
        },
        Action::DailyThemeLoaded(result) => match result {
            Ok(theme) => {
                let criteria = theme.filter_criteria.clone();
                state.current_theme = Some(theme);
                if !criteria.is_empty() {
                    state.filters = state.filters.with_criteria(&criteria);
                    return Ok(vec![Command::LoadPlayers(PlayerQuery::from_filters(&state.filters))]);
                }
            }
            Err(err) => return remote_failure(state, messages::DAILY_THEME_FAILED, err),
        },
        Action::FormationsLoaded(result) => match result {
            Ok(formations) => state.formations = formations,
            Err(err) => return remote_failure(state, messages::FORMATIONS_FAILED, err),
        },
        Action::FormationSaved(result) => match result {
            Ok(saved) => {
                info!("Formation {} saved", saved.id);
                state.notify(NoticeKind::Success, messages::SAVED);
                state.modals.save = false;
                state.user_name.clear();
                return Ok(vec![reload_formations(state)]);
            }
            Err(err) => return remote_failure(state, messages::SAVE_FAILED, err),
        },
        Action::VoteRecorded(result) => match result {
            Ok(_) => return Ok(vec![reload_formations(state)]),
            Err(err) => return remote_failure(state, messages::VOTE_FAILED, err),
        },
        Action::BootstrapFinished => state.loading = false,
    }

    Ok(Vec::new())
}

fn change_filter(state: &mut AppState, change: FilterChange) -> Vec<Command> {
    let mut next = state.filters.clone();
    match change {
        FilterChange::Position(position) => next.position = position,
        FilterChange::Club(club) => next.club = club.filter(|c| !c.is_empty()),
        FilterChange::Era(era) => next.era = era.filter(|e| !e.is_empty()),
        FilterChange::Country(country) => next.country = country.filter(|c| !c.is_empty()),
        FilterChange::MinRating(rating) => next.min_rating = rating,
    }

    let refetch = state.filters.needs_refetch(&next);
    state.filters = next;
    if refetch {
        vec![Command::LoadPlayers(PlayerQuery::from_filters(&state.filters))]
    } else {
        state.refilter();
        Vec::new()
    }
}

fn save(state: &mut AppState) -> Result<NewFormation, SessionError> {
    if state.user_name.trim().is_empty() {
        return rejected_save(state, SaveRejection::EmptyUserName, messages::ENTER_NAME);
    }
    if state.assignment.is_empty() {
        return rejected_save(state, SaveRejection::EmptyLineup, messages::ADD_PLAYERS);
    }

    let template = state.template();
    let template = rejected_reference(state, template)?;
    let body = NewFormation {
        user_name: state.user_name.trim().to_string(),
        formation_name: template.name.to_string(),
        theme: state.theme_name().to_string(),
        players: state.assignment.formation_players(template),
    };
    info!(
        "Saving {} with {} players under theme {}",
        body.formation_name,
        body.players.len(),
        body.theme
    );
    Ok(body)
}

fn reload_formations(state: &AppState) -> Command {
    Command::LoadFormations(state.current_theme.as_ref().map(|t| t.name.clone()))
}

fn rejected_save<T>(
    state: &mut AppState,
    reason: SaveRejection,
    message: &str,
) -> Result<T, SessionError> {
    warn!("Save rejected: {reason}");
    state.notify(NoticeKind::Error, message);
    Err(SessionError::Rejected(reason))
}

fn rejected_reference<T>(
    state: &mut AppState,
    result: dreamteam_core::Result<T>,
) -> Result<T, SessionError> {
    result.map_err(|err| {
        warn!("Lineup change rejected: {err}");
        state.notify(NoticeKind::Error, err.to_string());
        SessionError::Core(err)
    })
}

fn remote_failure<T>(state: &mut AppState, message: &str, err: ApiError) -> Result<T, SessionError> {
    warn!("{message}: {err}");
    state.notify(NoticeKind::Error, message);
    Err(SessionError::Api(err))
}
