//! Data service client: the `DataService` seam and its HTTP implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use dreamteam_core::config::ApiConfig;
use dreamteam_core::types::{FormationId, Player, PlayerId, SavedFormation, Theme};

use crate::error::ApiError;
use crate::types::{NewFormation, PlayerQuery, Receipt};

/// Everything the application asks of the remote service.
///
/// Each call is a single attempt. Implementations report failures as
/// [`ApiError`] and never retry.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Seed the service with sample data. Safe to call when data exists.
    async fn init_data(&self) -> Result<Receipt, ApiError>;

    /// Players matching the server-side filters.
    async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<Player>, ApiError>;

    /// One player by id.
    async fn get_player(&self, id: &PlayerId) -> Result<Player, ApiError>;

    /// Every theme.
    async fn list_themes(&self) -> Result<Vec<Theme>, ApiError>;

    /// Today's theme.
    async fn daily_theme(&self) -> Result<Theme, ApiError>;

    /// Saved formations, optionally only those built under `theme`.
    async fn list_formations(&self, theme: Option<&str>) -> Result<Vec<SavedFormation>, ApiError>;

    /// Store a new formation and return the created record.
    async fn create_formation(&self, formation: &NewFormation) -> Result<SavedFormation, ApiError>;

    /// Add one vote to a saved formation.
    async fn vote(&self, id: &FormationId) -> Result<Receipt, ApiError>;
}

/// `reqwest`-backed [`DataService`].
#[derive(Debug, Clone)]
pub struct DataClient {
    base: Url,
    http: Client,
    timeout_ms: u64,
}

impl DataClient {
    /// Create a client for the API mounted at `base` (scheme, host, prefix).
    ///
    /// # Errors
    /// Returns `ApiError::Config` if `base` is not an absolute URL or the
    /// HTTP client cannot be built.
    pub fn new(base: impl Into<String>, timeout_ms: u64) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        let raw = base.into();
        let base = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| ApiError::Config(format!("invalid base URL {raw}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{raw} cannot be a base URL")));
        }
        Ok(Self {
            base,
            http,
            timeout_ms,
        })
    }

    /// Create a client from the `[api]` configuration section.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base(), config.request_timeout_ms)
    }

    /// Base URL every endpoint path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Endpoint URL with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Config(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout_ms)
        } else {
            ApiError::from(err)
        }
    }

    /// Send `request`, check the status and decode a JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T, ApiError> {
        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!("{what}: request failed: {e}");
            self.transport_error(e)
        })?;

        let status = response.status();
        debug!("{what}: HTTP {status} in {}ms", start.elapsed().as_millis());

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{what}: service returned HTTP {status}: {body}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("{what}: undecodable response: {e}");
            ApiError::from(e)
        })
    }
}

#[async_trait]
impl DataService for DataClient {
    async fn init_data(&self) -> Result<Receipt, ApiError> {
        let receipt: Receipt = self
            .send(self.http.post(self.url(&["init-data"])?), "init-data")
            .await?;
        info!("Seeded data service: {}", receipt.message);
        Ok(receipt)
    }

    async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<Player>, ApiError> {
        let request = self.http.get(self.url(&["players"])?).query(&query.pairs());
        let players: Vec<Player> = self.send(request, "list players").await?;
        debug!("Fetched {} players", players.len());
        Ok(players)
    }

    async fn get_player(&self, id: &PlayerId) -> Result<Player, ApiError> {
        let request = self.http.get(self.url(&["players", id.as_str()])?);
        self.send(request, &format!("player {id}")).await
    }

    async fn list_themes(&self) -> Result<Vec<Theme>, ApiError> {
        self.send(self.http.get(self.url(&["themes"])?), "list themes").await
    }

    async fn daily_theme(&self) -> Result<Theme, ApiError> {
        self.send(self.http.get(self.url(&["themes", "daily"])?), "daily theme")
            .await
    }

    async fn list_formations(&self, theme: Option<&str>) -> Result<Vec<SavedFormation>, ApiError> {
        let mut request = self.http.get(self.url(&["formations"])?);
        if let Some(theme) = theme.filter(|t| !t.is_empty()) {
            request = request.query(&[("theme", theme)]);
        }
        self.send(request, "list formations").await
    }

    async fn create_formation(&self, formation: &NewFormation) -> Result<SavedFormation, ApiError> {
        let request = self.http.post(self.url(&["formations"])?).json(formation);
        let saved: SavedFormation = self.send(request, "create formation").await?;
        info!(
            "Saved formation {} ({} by {}, {} players)",
            saved.id,
            saved.formation_name,
            saved.user_name,
            saved.player_count()
        );
        Ok(saved)
    }

    async fn vote(&self, id: &FormationId) -> Result<Receipt, ApiError> {
        let request = self.http.put(self.url(&["formations", id.as_str(), "vote"])?);
        let receipt = self.send(request, &format!("formation {id}")).await?;
        info!("Voted for formation {id}");
        Ok(receipt)
    }
}
