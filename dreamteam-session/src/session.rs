//! The session driver: owns the state and the data service and runs the
//! commands [`update`] asks for.

use std::collections::VecDeque;

use futures::future::join_all;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use dreamteam_api::{DataClient, DataService};
use dreamteam_core::DreamTeamConfig;

use crate::actions::{Action, Command};
use crate::error::SessionError;
use crate::state::{AppState, Notice};
use crate::update::update;

/// One user's builder session.
///
/// Dispatch takes `&mut self`, so actions are applied one at a time.
pub struct Session<S: DataService> {
    state: AppState,
    service: S,
    rng: StdRng,
    seed_on_startup: bool,
}

impl Session<DataClient> {
    /// Session backed by the HTTP client described in `config`.
    ///
    /// # Errors
    /// `Api` if the client cannot be built, `Core` if the builder defaults
    /// are invalid.
    pub fn connect(config: &DreamTeamConfig) -> Result<Self, SessionError> {
        let client = DataClient::from_config(&config.api)?;
        Self::new(client, config)
    }
}

impl<S: DataService> Session<S> {
    /// Session over any data service.
    ///
    /// # Errors
    /// `Core` if the configured default formation does not exist.
    pub fn new(service: S, config: &DreamTeamConfig) -> Result<Self, SessionError> {
        Ok(Self {
            state: AppState::new(&config.builder)?,
            service,
            rng: StdRng::from_entropy(),
            seed_on_startup: config.api.seed_on_startup,
        })
    }

    /// Use a fixed seed for randomized lineups.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The data service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Take every queued notice.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    /// Seed remote data (if configured), then load players, themes, all
    /// formations and today's theme concurrently.
    ///
    /// Every load is applied even when another fails; the first failure is
    /// returned.
    ///
    /// # Errors
    /// The first [`SessionError`] any startup call produced.
    pub async fn bootstrap(&mut self) -> Result<(), SessionError> {
        info!("Bootstrapping session");
        let start = Action::Bootstrap {
            seed: self.seed_on_startup,
        };
        let (seed, loads): (Vec<Command>, Vec<Command>) = update(&mut self.state, start, &mut self.rng)?
            .into_iter()
            .partition(|command| matches!(command, Command::SeedData));
        let mut first_error = None;

        for command in seed {
            let seeded = self.execute(command).await;
            keep_first(&mut first_error, self.dispatch(seeded).await);
        }

        let completions = join_all(loads.into_iter().map(|command| self.execute(command))).await;
        for action in completions.into_iter().chain([Action::BootstrapFinished]) {
            keep_first(&mut first_error, self.dispatch(action).await);
        }

        info!(
            "Session ready: {} players, {} themes, {} formations",
            self.state.players.len(),
            self.state.themes.len(),
            self.state.formations.len()
        );
        first_error.map_or(Ok(()), Err)
    }

    /// Apply `action`, run the commands it produces and feed each result
    /// back in until nothing is left to do.
    ///
    /// # Errors
    /// The first [`SessionError`] raised along the way. Later commands still
    /// run.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), SessionError> {
        let mut queue = VecDeque::from([action]);
        let mut first_error = None;

        while let Some(action) = queue.pop_front() {
            match update(&mut self.state, action, &mut self.rng) {
                Ok(commands) => {
                    for command in commands {
                        let completion = self.execute(command).await;
                        queue.push_back(completion);
                    }
                }
                Err(err) => keep_first(&mut first_error, Err(err)),
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    async fn execute(&self, command: Command) -> Action {
        debug!("Executing {command:?}");
        match command {
            Command::SeedData => Action::DataSeeded(self.service.init_data().await),
            Command::LoadPlayers(query) => {
                Action::PlayersLoaded(self.service.list_players(&query).await)
            }
            Command::LoadThemes => Action::ThemesLoaded(self.service.list_themes().await),
            Command::LoadDailyTheme => Action::DailyThemeLoaded(self.service.daily_theme().await),
            Command::LoadFormations(theme) => {
                Action::FormationsLoaded(self.service.list_formations(theme.as_deref()).await)
            }
            Command::CreateFormation(body) => {
                Action::FormationSaved(self.service.create_formation(&body).await)
            }
            Command::Vote(id) => Action::VoteRecorded(self.service.vote(&id).await),
        }
    }
}

fn keep_first(slot: &mut Option<SessionError>, result: Result<(), SessionError>) {
    if let Err(err) = result {
        if slot.is_none() {
            *slot = Some(err);
        }
    }
}
