//! Per-session refresh coalescing

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::orchestrator::DataSourceOrchestrator;
use crate::domain::{DashboardResponse, DataMode, RefreshRequest};

/// Session used when a caller does not identify itself
pub const ANONYMOUS_SESSION: &str = "anonymous";

type SharedRefresh = Shared<BoxFuture<'static, Arc<DashboardResponse>>>;
type InFlightMap = Arc<Mutex<HashMap<RefreshKey, InFlight>>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RefreshKey {
    session: String,
    mode: DataMode,
}

struct InFlight {
    id: u64,
    refresh: SharedRefresh,
}

/// Ensures one caller context never has two refreshes in flight.
///
/// A non-forced request that arrives while a refresh for the same session and
/// mode is running waits on that refresh instead of starting another fetch.
/// Forced requests always run on their own.
///
/// Each shared refresh is driven by a spawned task that removes its entry when
/// the refresh finishes, whether or not any caller is still waiting.
pub struct RefreshCoordinator {
    orchestrator: Arc<DataSourceOrchestrator>,
    in_flight: InFlightMap,
    next_id: AtomicU64,
}

fn remove_entry(in_flight: &InFlightMap, key: &RefreshKey, id: u64) {
    let mut in_flight = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
    if in_flight.get(key).is_some_and(|entry| entry.id == id) {
        in_flight.remove(key);
    }
}

impl RefreshCoordinator {
    pub fn new(orchestrator: Arc<DataSourceOrchestrator>) -> Self {
        Self {
            orchestrator,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn orchestrator(&self) -> &Arc<DataSourceOrchestrator> {
        &self.orchestrator
    }

    #[tracing::instrument(skip(self, request), fields(session = %request.session, force = request.force))]
    pub async fn refresh(&self, request: RefreshRequest) -> Arc<DashboardResponse> {
        if request.force {
            return Arc::new(self.orchestrator.dashboard(request.mode, true).await);
        }

        let key = RefreshKey {
            session: request.session,
            mode: request.mode,
        };
        let (id, refresh) = self.join_or_start(&key);
        let response = refresh.await;

        // The driver task may not have been scheduled yet
        remove_entry(&self.in_flight, &key, id);

        response
    }

    /// Number of refreshes currently in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn join_or_start(&self, key: &RefreshKey) -> (u64, SharedRefresh) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = in_flight.get(key) {
            // A finished entry is stale; its owner has not cleaned up yet.
            if entry.refresh.peek().is_none() {
                tracing::debug!("Coalescing onto in-flight refresh");
                return (entry.id, entry.refresh.clone());
            }
        }

        let orchestrator = self.orchestrator.clone();
        let mode = key.mode;
        let refresh = async move { Arc::new(orchestrator.dashboard(mode, false).await) }
            .boxed()
            .shared();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let driver = refresh.clone();
        let registry = self.in_flight.clone();
        let driver_key = key.clone();
        tokio::spawn(async move {
            driver.await;
            remove_entry(&registry, &driver_key, id);
        });

        in_flight.insert(
            key.clone(),
            InFlight {
                id,
                refresh: refresh.clone(),
            },
        );
        (id, refresh)
    }
}
