//! Keeps the map screen's visible ranks in step with the viewport and the
//! destination search box.
//!
//! Host callbacks (`on_viewport_change`, `on_search_text`, `retry`,
//! `unmount`) are synchronous and may be called from any thread; fetches run
//! on the runtime handed to [`MapController::new`]. State lives behind one
//! lock that is never held across an await.

mod viewport;
mod visible;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rutpoint_transit::{Coordinate, DestinationFilter, MapBounds, Rank};
use tokio::runtime::Handle;

use crate::client::RankClient;
use crate::debounce::Debouncer;
use crate::error::ControllerError;
use crate::location::{LocationError, LocationProvider};

pub use viewport::{SignificanceThresholds, Viewport, is_significant_change};
pub use visible::VisibleRanks;

#[derive(Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    pub debounce: Duration,
    pub thresholds: SignificanceThresholds,
    /// Spans of the first viewport, centered on the user's fix
    pub initial_latitude_delta: f64,
    pub initial_longitude_delta: f64,
    /// Radius of the nearby query behind destination search
    pub search_radius_m: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            thresholds: SignificanceThresholds::default(),
            initial_latitude_delta: 0.0922,
            initial_longitude_delta: 0.0421,
            search_radius_m: 5_000_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    AwaitingLocation,
    Loading,
    Ready,
    Error(ControllerError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Pending {
    Viewport,
    Search,
}

enum Fetch {
    Bounds(MapBounds),
    Destination {
        center: Coordinate,
        filter: DestinationFilter,
    },
}

#[derive(Clone, Copy, Debug)]
enum Apply {
    Merge,
    Replace,
}

#[derive(Debug)]
struct State {
    phase: Phase,
    viewport: Option<Viewport>,
    last_queried: Option<Viewport>,
    user_location: Option<Coordinate>,
    search_text: String,
    visible: VisibleRanks,
    in_flight: usize,
    /// Set once a location fix has seeded the viewport; host callbacks
    /// fetch nothing until then.
    mounted: bool,
    /// Bumped on unmount; responses from an older generation are dropped.
    generation: u64,
}

impl State {
    fn new(generation: u64) -> Self {
        Self {
            phase: Phase::Idle,
            viewport: None,
            last_queried: None,
            user_location: None,
            search_text: String::new(),
            visible: VisibleRanks::default(),
            in_flight: 0,
            mounted: false,
            generation,
        }
    }
}

struct Shared {
    client: Arc<dyn RankClient>,
    config: ControllerConfig,
    state: Mutex<State>,
}

impl Shared {
    async fn run(&self, fetch: Fetch, apply: Apply) -> Result<(), ControllerError> {
        let generation = {
            let mut state = self.state.lock();
            state.in_flight += 1;
            state.phase = Phase::Loading;
            state.generation
        };

        let result = match fetch {
            Fetch::Bounds(bounds) => self.client.ranks_within_bounds(&bounds).await,
            Fetch::Destination { center, filter } => self
                .client
                .ranks_near(center, self.config.search_radius_m)
                .await
                .map(|ranks| {
                    ranks
                        .into_iter()
                        .filter(|rank| filter.matches_rank(rank))
                        .collect::<Vec<_>>()
                }),
        };

        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!("dropping response that arrived after unmount");
            return Ok(());
        }
        state.in_flight -= 1;

        match result {
            Ok(ranks) => {
                tracing::debug!(count = ranks.len(), ?apply, "ranks received");
                match apply {
                    Apply::Merge => state.visible.merge(ranks),
                    Apply::Replace => state.visible.replace(ranks),
                }
                if state.in_flight == 0 {
                    state.phase = Phase::Ready;
                }
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "rank fetch failed");
                let error = ControllerError::Fetch(error);
                state.phase = Phase::Error(error.clone());
                Err(error)
            }
        }
    }

    fn fail(&self, error: ControllerError) -> ControllerError {
        tracing::warn!(%error, "map controller failed");
        self.state.lock().phase = Phase::Error(error.clone());
        error
    }
}

/// Drives the map screen.
///
/// Dropping the controller cancels any debounce that has not fired.
pub struct MapController {
    shared: Arc<Shared>,
    location: Arc<dyn LocationProvider>,
    debouncer: Debouncer<Pending>,
    runtime: Handle,
}

impl MapController {
    pub fn new(
        client: Arc<dyn RankClient>,
        location: Arc<dyn LocationProvider>,
        config: ControllerConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                config,
                state: Mutex::new(State::new(0)),
            }),
            location,
            debouncer: Debouncer::new(runtime.clone()),
            runtime,
        }
    }

    /// Obtain a location fix and load the ranks around it.
    ///
    /// Failures are also reflected in [`MapController::phase`]. Nothing is
    /// retried automatically.
    pub async fn mount(&self) -> Result<(), ControllerError> {
        self.shared.state.lock().phase = Phase::AwaitingLocation;
        tracing::debug!("awaiting location fix");

        let fix = match self.location.current_location().await {
            Ok(fix) => fix,
            Err(LocationError::PermissionDenied) => {
                return Err(self.shared.fail(ControllerError::LocationDenied));
            }
            Err(LocationError::Unavailable) => {
                return Err(self.shared.fail(ControllerError::LocationUnavailable));
            }
        };

        let config = &self.shared.config;
        let viewport = Viewport::centered(
            fix,
            config.initial_latitude_delta,
            config.initial_longitude_delta,
        );
        {
            let mut state = self.shared.state.lock();
            state.user_location = Some(fix);
            state.viewport = Some(viewport);
            state.last_queried = Some(viewport);
            state.mounted = true;
        }

        self.shared
            .run(Fetch::Bounds(viewport.to_bounds()), Apply::Merge)
            .await
    }

    /// Record the map's new region; refetch once it settles if it moved or
    /// zoomed enough since the last query. Before a successful mount the
    /// region is only recorded. A change back within the thresholds drops
    /// any refetch still waiting to fire.
    pub fn on_viewport_change(&self, viewport: Viewport) {
        let significant = {
            let mut state = self.shared.state.lock();
            state.viewport = Some(viewport);
            state.mounted
                && is_significant_change(
                    state.last_queried.as_ref(),
                    &viewport,
                    &self.shared.config.thresholds,
                )
        };
        if !significant {
            self.debouncer.cancel(Pending::Viewport);
            return;
        }

        let shared = Arc::clone(&self.shared);
        self.debouncer
            .schedule(Pending::Viewport, self.shared.config.debounce, async move {
                shared.state.lock().last_queried = Some(viewport);
                let _ = shared
                    .run(Fetch::Bounds(viewport.to_bounds()), Apply::Merge)
                    .await;
            });
    }

    /// Blank text restores the viewport's ranks at once. Other text searches
    /// near the user once typing settles and shows only matching ranks.
    pub fn on_search_text(&self, text: &str) {
        let (viewport, user_location, mounted) = {
            let mut state = self.shared.state.lock();
            state.search_text = text.to_owned();
            (state.viewport, state.user_location, state.mounted)
        };
        self.debouncer.cancel(Pending::Search);

        if text.trim().is_empty() {
            match viewport {
                Some(viewport) if mounted => {
                    self.spawn(Fetch::Bounds(viewport.to_bounds()), Apply::Replace);
                }
                _ => tracing::debug!("cleared search before mount"),
            }
            return;
        }

        let Some(center) = user_location else {
            tracing::debug!("search ignored without a location fix");
            return;
        };

        let shared = Arc::clone(&self.shared);
        let filter = DestinationFilter::new(text);
        self.debouncer
            .schedule(Pending::Search, self.shared.config.debounce, async move {
                let _ = shared
                    .run(Fetch::Destination { center, filter }, Apply::Replace)
                    .await;
            });
    }

    /// Reload the last queried viewport. Returns false if there is none.
    pub fn retry(&self) -> bool {
        let Some(viewport) = self.shared.state.lock().last_queried else {
            return false;
        };
        self.spawn(Fetch::Bounds(viewport.to_bounds()), Apply::Merge);
        true
    }

    /// Cancel pending debounces, forget every rank and return to `Idle`.
    pub fn unmount(&self) {
        self.debouncer.cancel_all();
        let mut state = self.shared.state.lock();
        *state = State::new(state.generation + 1);
        tracing::debug!("map controller unmounted");
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.lock().phase.clone()
    }

    pub fn error(&self) -> Option<ControllerError> {
        match &self.shared.state.lock().phase {
            Phase::Error(error) => Some(error.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.shared.state.lock().phase,
            Phase::AwaitingLocation | Phase::Loading
        )
    }

    pub fn visible_ranks(&self) -> Vec<Arc<Rank>> {
        self.shared.state.lock().visible.as_slice().to_vec()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.shared.state.lock().viewport
    }

    pub fn search_text(&self) -> String {
        self.shared.state.lock().search_text.clone()
    }

    pub fn user_location(&self) -> Option<Coordinate> {
        self.shared.state.lock().user_location
    }

    fn spawn(&self, fetch: Fetch, apply: Apply) {
        let shared = Arc::clone(&self.shared);
        self.runtime.spawn(async move {
            let _ = shared.run(fetch, apply).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, Ordering};

    use rutpoint_transit::provider::fixture;
    use rutpoint_transit::{QueryEngine, RankIdentifier};
    use tokio::sync::oneshot;

    use super::*;
    use crate::client::FetchResult;
    use crate::error::{FetchError, FetchErrorKind};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Bounds(MapBounds),
        Near(f64),
    }

    /// Serves the reference ranks in-process and records every request.
    ///
    /// While `holding` is set each response waits until [`FakeClient::release`]
    /// is called with its call index.
    struct FakeClient {
        engine: QueryEngine,
        failing: AtomicBool,
        holding: AtomicBool,
        calls: Mutex<Vec<Call>>,
        gates: Mutex<Vec<Option<oneshot::Sender<()>>>>,
    }

    impl FakeClient {
        fn new() -> Arc<Self> {
            let provider = fixture::reference_provider().unwrap();
            Arc::new(Self {
                engine: QueryEngine::new(Arc::new(provider)),
                failing: AtomicBool::new(false),
                holding: AtomicBool::new(false),
                calls: Mutex::new(Vec::new()),
                gates: Mutex::new(Vec::new()),
            })
        }

        fn release(&self, call: usize) {
            let gate = self.gates.lock().get_mut(call).and_then(Option::take);
            gate.expect("no held response at this index").send(()).unwrap();
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn answer(
            &self,
            call: Call,
            query: impl FnOnce(&QueryEngine) -> rutpoint_transit::Result<Vec<Arc<Rank>>>,
        ) -> Pin<Box<dyn Future<Output = FetchResult<Vec<Arc<Rank>>>> + Send + 'static>> {
            self.calls.lock().push(call);
            let gate = if self.holding.load(Ordering::SeqCst) {
                let (tx, rx) = oneshot::channel();
                self.gates.lock().push(Some(tx));
                Some(rx)
            } else {
                self.gates.lock().push(None);
                None
            };

            let result = if self.failing.load(Ordering::SeqCst) {
                Err(FetchError::new(FetchErrorKind::Timeout, "deadline elapsed"))
            } else {
                query(&self.engine)
                    .map_err(|e| FetchError::new(FetchErrorKind::Upstream, e.to_string()))
            };
            Box::pin(async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            })
        }
    }

    impl RankClient for FakeClient {
        fn ranks_within_bounds<'a>(
            &'a self,
            bounds: &'a MapBounds,
        ) -> Pin<Box<dyn Future<Output = FetchResult<Vec<Arc<Rank>>>> + Send + 'a>> {
            self.answer(Call::Bounds(*bounds), |engine| engine.find_within_bounds(bounds))
        }

        fn ranks_near<'a>(
            &'a self,
            center: Coordinate,
            radius_m: f64,
        ) -> Pin<Box<dyn Future<Output = FetchResult<Vec<Arc<Rank>>>> + Send + 'a>> {
            self.answer(Call::Near(radius_m), |engine| engine.find_nearby(center, radius_m))
        }
    }

    struct FixedLocation(Result<Coordinate, LocationError>);

    impl LocationProvider for FixedLocation {
        fn current_location<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = Result<Coordinate, LocationError>> + Send + 'a>> {
            let fix = self.0;
            Box::pin(async move { fix })
        }
    }

    const ALEXANDRA: Coordinate = Coordinate::new(-26.1067, 28.1067);

    fn controller(client: &Arc<FakeClient>, fix: Result<Coordinate, LocationError>) -> MapController {
        MapController::new(
            Arc::clone(client) as Arc<dyn RankClient>,
            Arc::new(FixedLocation(fix)),
            ControllerConfig::default(),
            Handle::current(),
        )
    }

    fn visible_ids(controller: &MapController) -> Vec<String> {
        let mut ids: Vec<String> = controller
            .visible_ranks()
            .iter()
            .map(|rank| rank.id.to_string())
            .collect();
        ids.sort();
        ids
    }

    /// A viewport over both reference ranks.
    fn wide_view() -> Viewport {
        Viewport::centered(Coordinate::new(-26.1, 28.05), 0.2, 0.2)
    }

    async fn advance_ms(ms: u64) {
        tokio::time::advance(Duration::from_millis(ms)).await;
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_loads_ranks_around_the_fix() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));

        controller.mount().await.unwrap();

        assert_eq!(controller.phase(), Phase::Ready);
        assert_eq!(visible_ids(&controller), vec!["1"]);
        assert_eq!(controller.user_location(), Some(ALEXANDRA));
        assert_eq!(
            client.calls(),
            vec![Call::Bounds(
                Viewport::centered(ALEXANDRA, 0.0922, 0.0421).to_bounds()
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_location_failures() {
        let client = FakeClient::new();

        let denied = controller(&client, Err(LocationError::PermissionDenied));
        assert_eq!(denied.mount().await, Err(ControllerError::LocationDenied));
        assert_eq!(denied.phase(), Phase::Error(ControllerError::LocationDenied));

        let unavailable = controller(&client, Err(LocationError::Unavailable));
        assert_eq!(unavailable.mount().await, Err(ControllerError::LocationUnavailable));
        assert_eq!(
            unavailable.error().unwrap().to_string(),
            "Unable to get your location. Please check your device settings."
        );

        assert!(client.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_location_failure_stays_final() {
        let client = FakeClient::new();
        let controller = controller(&client, Err(LocationError::PermissionDenied));
        let _ = controller.mount().await;

        controller.on_viewport_change(wide_view());
        advance_ms(1_000).await;
        controller.on_search_text("");
        advance_ms(0).await;

        assert!(client.calls().is_empty());
        assert_eq!(controller.phase(), Phase::Error(ControllerError::LocationDenied));
        assert_eq!(controller.viewport(), Some(wide_view()));
        assert!(!controller.retry());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_gesture_fetches_once() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();

        controller.on_viewport_change(wide_view());
        advance_ms(300).await;
        controller.on_viewport_change(Viewport {
            latitude: -26.09,
            ..wide_view()
        });
        advance_ms(300).await;
        assert_eq!(client.calls().len(), 1);

        advance_ms(200).await;
        assert_eq!(client.calls().len(), 2);
        assert_eq!(visible_ids(&controller), vec!["1", "2"]);
        assert_eq!(controller.phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_moves_do_not_fetch() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();

        let nudged = Viewport::centered(Coordinate::new(-26.1, 28.1), 0.0922, 0.0421);
        controller.on_viewport_change(nudged);
        advance_ms(1_000).await;

        assert_eq!(client.calls().len(), 1);
        assert_eq!(controller.viewport(), Some(nudged));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_before_settle_drops_pending_fetch() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();

        let home = Viewport::centered(ALEXANDRA, 0.0922, 0.0421);
        controller.on_viewport_change(Viewport::centered(Coordinate::new(-26.5, 28.5), 0.0922, 0.0421));
        advance_ms(200).await;
        controller.on_viewport_change(home);
        advance_ms(1_000).await;

        assert_eq!(client.calls(), vec![Call::Bounds(home.to_bounds())]);
        assert_eq!(controller.viewport(), Some(home));
        assert_eq!(controller.phase(), Phase::Ready);

        // The next significance check is still measured from home.
        controller.on_viewport_change(Viewport::centered(Coordinate::new(-26.1, 28.1), 0.0922, 0.0421));
        advance_ms(1_000).await;
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_pending_fetch() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();

        controller.on_viewport_change(wide_view());
        controller.on_search_text("Sandton");
        advance_ms(100).await;
        controller.unmount();
        advance_ms(1_000).await;

        assert_eq!(client.calls().len(), 1);
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.visible_ranks().is_empty());
        assert!(controller.viewport().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_visible_ranks() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();

        client.failing.store(true, Ordering::SeqCst);
        controller.on_viewport_change(wide_view());
        advance_ms(500).await;

        assert_eq!(visible_ids(&controller), vec!["1"]);
        assert_eq!(
            controller.error().unwrap().to_string(),
            "Request timed out. Please check your internet connection and try again."
        );

        client.failing.store(false, Ordering::SeqCst);
        assert!(controller.retry());
        advance_ms(0).await;

        assert_eq!(controller.phase(), Phase::Ready);
        assert_eq!(visible_ids(&controller), vec!["1", "2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_replaces_visible_ranks() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();
        controller.on_viewport_change(wide_view());
        advance_ms(500).await;
        assert_eq!(visible_ids(&controller), vec!["1", "2"]);

        controller.on_search_text("pretoria");
        advance_ms(500).await;
        assert_eq!(visible_ids(&controller), vec!["1"]);
        assert_eq!(client.calls().last(), Some(&Call::Near(5_000_000.0)));

        controller.on_search_text("Soweto");
        advance_ms(500).await;
        assert!(controller.visible_ranks().is_empty());
        assert_eq!(controller.search_text(), "Soweto");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_search_reloads_viewport() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();
        controller.on_search_text("Soweto");
        advance_ms(500).await;
        assert!(controller.visible_ranks().is_empty());

        controller.on_search_text("Rose");
        advance_ms(200).await;
        controller.on_search_text("  ");
        advance_ms(0).await;

        assert_eq!(visible_ids(&controller), vec!["1"]);
        let calls = client.calls();
        assert!(matches!(calls.last(), Some(Call::Bounds(_))));

        // The pending "Rose" search never fires.
        advance_ms(1_000).await;
        assert_eq!(client.calls().len(), calls.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_without_location_is_ignored() {
        let client = FakeClient::new();
        let controller = controller(&client, Err(LocationError::Unavailable));
        let _ = controller.mount().await;

        controller.on_search_text("Sandton");
        advance_ms(1_000).await;
        assert!(client.calls().is_empty());
        assert!(!controller.retry());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_rank_from_both_queries_is_shown_once() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();

        controller.on_viewport_change(wide_view());
        advance_ms(500).await;
        controller.on_viewport_change(Viewport::centered(ALEXANDRA, 0.5, 0.5));
        advance_ms(500).await;

        let ranks = controller.visible_ranks();
        assert_eq!(ranks.len(), 2);
        assert!(ranks.iter().any(|rank| rank.id == RankIdentifier::new("2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_viewport_before_mount_is_only_recorded() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));

        controller.on_viewport_change(wide_view());
        advance_ms(1_000).await;
        controller.on_search_text("Rose");
        controller.on_search_text("");
        advance_ms(1_000).await;

        assert!(client.calls().is_empty());
        assert_eq!(controller.viewport(), Some(wide_view()));
        assert_eq!(controller.phase(), Phase::Idle);

        // Mounting afterwards still behaves normally.
        controller.mount().await.unwrap();
        controller.on_viewport_change(wide_view());
        advance_ms(500).await;
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_fetches_settle_in_completion_order() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();
        client.holding.store(true, Ordering::SeqCst);

        controller.on_viewport_change(wide_view());
        advance_ms(500).await;
        controller.on_search_text("Soweto");
        advance_ms(500).await;
        assert_eq!(client.calls().len(), 3);
        assert_eq!(controller.phase(), Phase::Loading);

        // The search answers first and empties the list; the merge is still out.
        client.release(2);
        advance_ms(0).await;
        assert!(controller.visible_ranks().is_empty());
        assert_eq!(controller.phase(), Phase::Loading);

        client.release(1);
        advance_ms(0).await;
        assert_eq!(visible_ids(&controller), vec!["1", "2"]);
        assert_eq!(controller.phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_success_clears_overlapping_failure() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();
        client.holding.store(true, Ordering::SeqCst);

        client.failing.store(true, Ordering::SeqCst);
        controller.on_viewport_change(wide_view());
        advance_ms(500).await;
        client.failing.store(false, Ordering::SeqCst);
        controller.on_viewport_change(Viewport::centered(ALEXANDRA, 0.5, 0.5));
        advance_ms(500).await;
        assert_eq!(client.calls().len(), 3);

        client.release(1);
        advance_ms(0).await;
        assert!(matches!(controller.phase(), Phase::Error(ControllerError::Fetch(_))));
        assert_eq!(visible_ids(&controller), vec!["1"]);

        client.release(2);
        advance_ms(0).await;
        assert_eq!(controller.phase(), Phase::Ready);
        assert_eq!(visible_ids(&controller), vec!["1", "2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_overlapping_success_is_reported() {
        let client = FakeClient::new();
        let controller = controller(&client, Ok(ALEXANDRA));
        controller.mount().await.unwrap();
        client.holding.store(true, Ordering::SeqCst);

        client.failing.store(true, Ordering::SeqCst);
        controller.on_viewport_change(wide_view());
        advance_ms(500).await;
        client.failing.store(false, Ordering::SeqCst);
        controller.on_viewport_change(Viewport::centered(ALEXANDRA, 0.5, 0.5));
        advance_ms(500).await;

        client.release(2);
        advance_ms(0).await;
        assert_eq!(controller.phase(), Phase::Loading);
        assert_eq!(visible_ids(&controller), vec!["1", "2"]);

        client.release(1);
        advance_ms(0).await;
        assert!(controller.error().is_some());
        assert_eq!(visible_ids(&controller), vec!["1", "2"]);
    }
}
