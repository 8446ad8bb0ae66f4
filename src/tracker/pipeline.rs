//! The lookup-and-render pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use super::state::TrackerState;
use crate::config::{Config, MarkerPolicy};
use crate::error_handling::{InitializationError, LookupError, LookupStats, TrackerError};
use crate::lookup::{GeoClient, LookupResult};
use crate::map::{MapSurface, MapView, TileSource};

/// The lookup currently allowed to publish its result.
#[derive(Debug, Default)]
struct InFlight {
    generation: u64,
    token: Option<CancellationToken>,
}

/// Turns queries into a displayed location and a map update.
///
/// Shared between tasks through `Arc`. Lookups follow last-request-wins:
/// starting a lookup cancels the one in flight, and a response belonging to
/// an older lookup is discarded as [`TrackerError::Superseded`].
///
/// Lock order is `inflight`, then `state`, then `map`; no lock is held across
/// an `.await`.
pub struct Tracker<S: MapSurface> {
    client: GeoClient,
    tiles: TileSource,
    zoom: u8,
    policy: MarkerPolicy,
    state: Mutex<TrackerState>,
    map: Mutex<Option<MapView<S>>>,
    inflight: Mutex<InFlight>,
    initial_started: AtomicBool,
    stats: Arc<LookupStats>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: MapSurface> Tracker<S> {
    /// Creates a tracker using `client` and the map settings from `config`.
    pub fn new(client: GeoClient, config: &Config) -> Self {
        Self {
            client,
            tiles: TileSource::new(config.tile_url.clone()),
            zoom: config.zoom,
            policy: config.marker_policy,
            state: Mutex::new(TrackerState::default()),
            map: Mutex::new(None),
            inflight: Mutex::new(InFlight::default()),
            initial_started: AtomicBool::new(false),
            stats: Arc::new(LookupStats::new()),
        }
    }

    /// Validates `config` and builds the client and tracker from it.
    ///
    /// # Errors
    ///
    /// Fails fast with `InitializationError::ConfigError` when the API base
    /// URL or key is missing.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = GeoClient::new(config)?;
        Ok(Self::new(client, config))
    }

    /// Counters shared with every lookup made by this tracker.
    pub fn stats(&self) -> Arc<LookupStats> {
        Arc::clone(&self.stats)
    }

    /// Snapshot of the user-facing state.
    pub fn state(&self) -> TrackerState {
        lock(&self.state).clone()
    }

    /// Whether the "Invalid input" indicator is showing.
    pub fn error_flag(&self) -> bool {
        lock(&self.state).error
    }

    /// The displayed result, if any lookup has succeeded.
    pub fn result(&self) -> Option<LookupResult> {
        lock(&self.state).result.clone()
    }

    /// Replaces the draft query, as typing into the input box would.
    pub fn set_query(&self, query: &str) {
        lock(&self.state).query = query.to_string();
    }

    /// Mounts the map view on `surface`.
    ///
    /// Only the first call mounts; later calls drop their surface and return
    /// `false`.
    pub fn mount_map(&self, surface: S) -> bool {
        let mut map = lock(&self.map);
        if map.is_some() {
            debug!("Map already mounted, ignoring second mount");
            return false;
        }
        *map = Some(MapView::mount(surface, &self.tiles, self.zoom, self.policy));
        true
    }

    /// Runs `f` against the mounted map view, if any.
    pub fn with_map<R>(&self, f: impl FnOnce(&MapView<S>) -> R) -> Option<R> {
        lock(&self.map).as_ref().map(f)
    }

    /// Re-centers the map on `(lat, lng)` and places a marker.
    ///
    /// Returns `false` without doing anything when no map is mounted.
    pub fn update_map(&self, lat: f64, lng: f64) -> bool {
        match lock(&self.map).as_mut() {
            Some(view) => {
                view.show_location(lat, lng);
                true
            }
            None => {
                debug!("No map mounted, skipping map update");
                false
            }
        }
    }

    /// Submits a query from the input box.
    ///
    /// A blank query raises the error flag without any network call.
    pub async fn submit(&self, query: &str) -> Result<LookupResult, TrackerError> {
        self.set_query(query);

        if query.trim().is_empty() {
            debug!("Rejecting empty submission");
            lock(&self.state).apply_failure();
            return Err(self.counted(TrackerError::EmptyInput));
        }

        self.lookup(query).await
    }

    /// Looks up `input` and publishes the result.
    ///
    /// Cancels any lookup in flight, clears the error flag, then on success
    /// replaces the result, clears the query and updates the map. On failure
    /// the error flag is raised and the previous result is kept.
    pub async fn lookup(&self, input: &str) -> Result<LookupResult, TrackerError> {
        let (generation, token) = self.begin_lookup();
        self.run_lookup(generation, token, input).await
    }

    /// Resolves this machine's public IP and looks it up.
    ///
    /// Runs at most once per tracker and counts as a single lookup from the
    /// moment it starts: a submission made while the own IP is still being
    /// resolved supersedes it. The error flag is left alone until the
    /// resolved IP is actually looked up, so a failure to resolve the IP is
    /// logged and returned without touching it.
    pub async fn load_initial(&self) -> Result<LookupResult, TrackerError> {
        if self.initial_started.swap(true, Ordering::SeqCst) {
            debug!("Initial lookup already started");
            return Err(TrackerError::AlreadyInitialized);
        }

        let (generation, token) = self.begin_lookup();
        let resolved = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            resolved = self.client.resolve_self_ip() => Some(resolved),
        };

        let ip = match resolved {
            Some(Ok(ip)) => ip,
            Some(Err(e)) => {
                warn!("Failed to resolve own public IP: {}", e);
                return Err(self.counted(TrackerError::SelfIpFailed {
                    reason: e.to_string(),
                }));
            }
            None => {
                debug!("Initial lookup cancelled by a submission");
                return Err(self.counted(TrackerError::Superseded));
            }
        };

        info!("Own public IP is {}", ip);
        self.run_lookup(generation, token, &ip).await
    }

    /// Mounts the map on `surface`, then runs the initial lookup.
    pub async fn initialize(&self, surface: S) -> Result<LookupResult, TrackerError> {
        self.mount_map(surface);
        self.load_initial().await
    }

    async fn run_lookup(
        &self,
        generation: u64,
        token: CancellationToken,
        input: &str,
    ) -> Result<LookupResult, TrackerError> {
        {
            let inflight = lock(&self.inflight);
            if inflight.generation == generation {
                lock(&self.state).error = false;
            }
        }

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            outcome = self.client.lookup(input) => Some(outcome),
        };

        match outcome {
            Some(outcome) => self.finish_lookup(generation, input, outcome),
            None => {
                debug!("Lookup for '{}' cancelled by a newer submission", input);
                Err(self.counted(TrackerError::Superseded))
            }
        }
    }

    fn counted(&self, err: TrackerError) -> TrackerError {
        if let Some(kind) = err.kind() {
            self.stats.record_failure(kind);
        }
        err
    }

    fn begin_lookup(&self) -> (u64, CancellationToken) {
        let mut inflight = lock(&self.inflight);
        if let Some(previous) = inflight.token.take() {
            previous.cancel();
        }
        inflight.generation += 1;
        let token = CancellationToken::new();
        inflight.token = Some(token.clone());
        (inflight.generation, token)
    }

    fn finish_lookup(
        &self,
        generation: u64,
        input: &str,
        outcome: Result<LookupResult, LookupError>,
    ) -> Result<LookupResult, TrackerError> {
        let mut inflight = lock(&self.inflight);
        if inflight.generation != generation {
            debug!("Discarding stale response for '{}'", input);
            return Err(self.counted(TrackerError::Superseded));
        }
        inflight.token = None;

        match outcome {
            Ok(result) => {
                info!(
                    "Located {} at {}, {} ({})",
                    result.ip, result.location.city, result.location.region, result.isp
                );
                lock(&self.state).apply_success(result.clone());
                self.update_map(result.location.lat, result.location.lng);
                self.stats.record_success();
                Ok(result)
            }
            Err(e) => {
                warn!("Lookup for '{}' failed: {}", input, e);
                lock(&self.state).apply_failure();
                Err(self.counted(TrackerError::from(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FailureKind;
    use crate::map::{LatLng, RecordingSurface};
    use httptest::{matchers::*, responders::*, Expectation, Server};

    const MOUNTAIN_VIEW: &str = r#"{"ip":"8.8.8.8","isp":"X","location":{"region":"CA","city":"Mountain View","timezone":"-08:00","lat":37.4,"lng":-122.1}}"#;

    fn config_for(server: &Server) -> Config {
        Config {
            api_base_url: format!("{}?apiKey=", server.url_str("/geo")),
            api_key: "k".into(),
            self_ip_url: server.url_str("/self?format=json"),
            ..Default::default()
        }
    }

    fn tracker_for(server: &Server) -> Tracker<RecordingSurface> {
        Tracker::from_config(&config_for(server)).expect("tracker should build")
    }

    #[test]
    fn test_from_config_fails_fast_without_key() {
        let config = Config {
            api_base_url: "https://geo.ipify.org/api/v2/country,city?apiKey=".into(),
            ..Default::default()
        };
        let result = Tracker::<RecordingSurface>::from_config(&config);
        assert!(matches!(result, Err(InitializationError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_blank_submission_sets_error_without_request() {
        // No expectations: any request would fail the server's verification
        let server = Server::run();
        let tracker = tracker_for(&server);

        for query in ["", "   ", "\t\n"] {
            let err = tracker.submit(query).await.unwrap_err();
            assert_eq!(err, TrackerError::EmptyInput);
            assert!(tracker.error_flag());
        }
        assert_eq!(tracker.stats().failure_count(FailureKind::EmptyInput), 3);
    }

    #[tokio::test]
    async fn test_successful_submission_updates_state_and_map() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::query(url_decoded(contains((
                "ipAddress", "8.8.8.8"
            )))))
            .respond_with(status_code(200).body(MOUNTAIN_VIEW)),
        );
        let tracker = tracker_for(&server);
        assert!(tracker.mount_map(RecordingSurface::new()));

        let result = tracker.submit("8.8.8.8").await.unwrap();

        let state = tracker.state();
        assert_eq!(state.result, Some(result));
        assert!(!state.error);
        assert!(state.query.is_empty());
        let center = tracker.with_map(|view| view.surface().center()).flatten();
        assert_eq!(center, Some(LatLng::new(37.4, -122.1)));
        assert_eq!(tracker.stats().succeeded(), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_previous_result() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::query(url_decoded(contains(("domain", "good.example")))))
                .respond_with(status_code(200).body(MOUNTAIN_VIEW)),
        );
        server.expect(
            Expectation::matching(request::query(url_decoded(contains(("domain", "bad.example")))))
                .respond_with(status_code(422)),
        );
        let tracker = tracker_for(&server);

        let first = tracker.submit("good.example").await.unwrap();
        let err = tracker.submit("bad.example").await.unwrap_err();

        assert!(matches!(err, TrackerError::LookupFailed { .. }));
        let state = tracker.state();
        assert!(state.error);
        assert_eq!(state.result, Some(first));
        assert_eq!(state.query, "bad.example");
    }

    #[tokio::test]
    async fn test_error_flag_cleared_by_next_attempt() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/geo"))
                .respond_with(status_code(200).body(MOUNTAIN_VIEW)),
        );
        let tracker = tracker_for(&server);

        let _ = tracker.submit("").await;
        assert!(tracker.error_flag());
        tracker.submit("8.8.8.8").await.unwrap();
        assert!(!tracker.error_flag());
    }

    #[test]
    fn test_update_map_without_mount_is_noop() {
        let server = Server::run();
        let tracker = tracker_for(&server);
        let before = tracker.state();

        assert!(!tracker.update_map(37.4, -122.1));
        assert_eq!(tracker.state(), before);
        assert!(tracker.with_map(|_| ()).is_none());
    }

    #[test]
    fn test_second_mount_ignored() {
        let server = Server::run();
        let tracker = tracker_for(&server);
        assert!(tracker.mount_map(RecordingSurface::new()));
        tracker.update_map(1.0, 1.0);
        assert!(!tracker.mount_map(RecordingSurface::new()));
        assert_eq!(tracker.with_map(|view| view.marker_count()), Some(1));
    }

    #[tokio::test]
    async fn test_initialize_looks_up_own_ip() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/self"))
                .respond_with(status_code(200).body(r#"{"ip":"8.8.8.8"}"#)),
        );
        server.expect(
            Expectation::matching(request::query(url_decoded(contains((
                "ipAddress", "8.8.8.8"
            )))))
            .respond_with(status_code(200).body(MOUNTAIN_VIEW)),
        );
        let tracker = tracker_for(&server);

        let result = tracker.initialize(RecordingSurface::new()).await.unwrap();
        assert_eq!(result.ip, "8.8.8.8");
        assert_eq!(tracker.with_map(|view| view.marker_count()), Some(1));

        // The initial lookup runs once
        assert_eq!(
            tracker.load_initial().await,
            Err(TrackerError::AlreadyInitialized)
        );
    }

    #[tokio::test]
    async fn test_self_ip_failure_does_not_raise_error_flag() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/self"))
                .respond_with(status_code(500)),
        );
        let tracker = tracker_for(&server);

        let err = tracker.initialize(RecordingSurface::new()).await.unwrap_err();
        assert!(matches!(err, TrackerError::SelfIpFailed { .. }));
        assert!(!tracker.error_flag());
        assert_eq!(tracker.with_map(|view| view.marker_count()), Some(0));
    }
}
