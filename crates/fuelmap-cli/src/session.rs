//! One locate-load-rank-render pass and its outcome.

use fuelmap_core::{rank, Catalog, CoreError, Coordinate, RankedStation, Station};
use fuelmap_feed::{load_datasets, DatasetSources, FeedClient, FeedError};
use thiserror::Error;

use crate::geolocation::{locate, GeolocationError, Geolocator, PositionOptions};
use crate::presentation::{MapSurface, Presenter, UiText};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug)]
pub struct RankedView {
    pub reference: Coordinate,
    pub radius_km: f64,
    pub stations: Vec<RankedStation>,
}

#[derive(Debug)]
pub struct UnrankedView {
    pub stations: Vec<Station>,
    /// Why the view is not ranked.
    pub reason: GeolocationError,
}

#[derive(Debug)]
pub struct SessionFailure {
    pub error: SessionError,
    /// Position obtained before the failure, if any.
    pub reference: Option<Coordinate>,
    pub geolocation: Option<GeolocationError>,
}

impl SessionFailure {
    /// Nothing useful can be shown: neither a position nor stations.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.reference.is_none()
    }
}

#[derive(Debug)]
pub enum SessionState {
    Idle,
    Loading,
    Ranked(RankedView),
    Unranked(UnrankedView),
    Failed(SessionFailure),
}

impl SessionState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Ranked(_) => "ranked",
            SessionState::Unranked(_) => "unranked",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// Drives geolocation, dataset loading, ranking and rendering.
#[derive(Debug)]
pub struct Session<G, M, U> {
    client: FeedClient,
    sources: DatasetSources,
    geolocator: G,
    options: PositionOptions,
    radius_km: f64,
    presenter: Presenter<M, U>,
    state: SessionState,
}

impl<G, M, U> Session<G, M, U>
where
    G: Geolocator,
    M: MapSurface,
    U: UiText,
{
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRadius`] unless `radius_km` is finite and
    /// positive.
    pub fn new(
        client: FeedClient,
        sources: DatasetSources,
        geolocator: G,
        options: PositionOptions,
        radius_km: f64,
        presenter: Presenter<M, U>,
    ) -> Result<Self, CoreError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(CoreError::InvalidRadius(radius_km));
        }
        Ok(Self {
            client,
            sources,
            geolocator,
            options,
            radius_km,
            presenter,
            state: SessionState::Idle,
        })
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn presenter(&self) -> &Presenter<M, U> {
        &self.presenter
    }

    /// Locate the user and load both documents concurrently, then rank
    /// and render whichever view the results allow.
    pub async fn run(&mut self) -> &SessionState {
        self.state = SessionState::Loading;
        self.presenter.render_loading();
        tracing::debug!(radius_km = self.radius_km, "session loading");

        let (position, datasets) = tokio::join!(
            locate(&self.geolocator, self.options),
            load_datasets(&self.client, &self.sources),
        );
        let catalog = datasets.into_catalog();

        self.state = match (position, catalog) {
            (Ok(reference), Ok(catalog)) => self.show_ranked(reference, &catalog),
            (Err(reason), Ok(catalog)) => self.show_unranked(reason, catalog),
            (Ok(reference), Err(error)) => self.show_failure(error.into(), Some(reference), None),
            (Err(reason), Err(error)) => self.show_failure(error.into(), None, Some(reason)),
        };

        tracing::info!(state = self.state.name(), "session settled");
        &self.state
    }

    /// Run the whole pipeline again, replacing everything shown.
    pub async fn refresh(&mut self) -> &SessionState {
        self.run().await
    }

    fn show_ranked(&mut self, reference: Coordinate, catalog: &Catalog) -> SessionState {
        match rank(catalog.stations(), reference, self.radius_km) {
            Ok(stations) => {
                self.presenter
                    .render_ranked(&stations, reference, self.radius_km);
                SessionState::Ranked(RankedView {
                    reference,
                    radius_km: self.radius_km,
                    stations,
                })
            }
            Err(error) => self.show_failure(error.into(), Some(reference), None),
        }
    }

    fn show_unranked(&mut self, reason: GeolocationError, catalog: Catalog) -> SessionState {
        tracing::warn!(error = %reason, "no position; showing all stations unranked");
        let stations = catalog.into_stations();
        self.presenter.render_unranked(&stations);
        SessionState::Unranked(UnrankedView { stations, reason })
    }

    fn show_failure(
        &mut self,
        error: SessionError,
        reference: Option<Coordinate>,
        geolocation: Option<GeolocationError>,
    ) -> SessionState {
        tracing::error!(error = %error, has_position = reference.is_some(), "session failed");
        self.presenter
            .render_failure(reference, &error.to_string());
        SessionState::Failed(SessionFailure {
            error,
            reference,
            geolocation,
        })
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
