use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use tracing::{debug, info, warn};

use crate::config::Settings;

/// Libraries requested from the maps runtime.
pub const MAPS_LIBRARIES: [&str; 3] = ["places", "drawing", "geometry"];

/// Errors from initializing the maps runtime.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapsInitError {
    #[error("no maps API key configured (set GOOGLE_MAPS_API_KEY)")]
    MissingApiKey,

    #[error("maps runtime failed to initialize: {0}")]
    Failed(String),
}

/// A loaded maps runtime, shared by every map surface in the process.
#[derive(Debug, Clone, PartialEq)]
pub struct MapsRuntime {
    pub api_key: String,
    pub libraries: Vec<String>,
    pub version: String,
    pub static_maps_url: String,
}

impl MapsRuntime {
    /// Validate settings and build the runtime description.
    pub fn initialize(settings: &Settings) -> Result<Self, MapsInitError> {
        let api_key = settings.google_maps_api_key.clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(MapsInitError::MissingApiKey)?;
        if !settings.static_maps_url.starts_with("http") {
            return Err(MapsInitError::Failed(format!("invalid imagery url {:?}", settings.static_maps_url)));
        }
        Ok(Self {
            api_key,
            libraries: MAPS_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            version: "weekly".to_string(),
            static_maps_url: settings.static_maps_url.clone(),
        })
    }
}

/// Process-wide memo around [`MapsRuntime::initialize`].
///
/// Concurrent first calls are collapsed into a single initialization: one
/// caller runs it while the others wait for its outcome. A successful runtime
/// is cached for the lifetime of the loader. A failure is handed to every
/// caller that waited on that attempt but is not cached, so the next call
/// after it retries.
pub struct MapsLoader {
    state: Mutex<LoaderState>,
    settled: Condvar,
    loads: AtomicUsize,
}

enum Slot {
    Empty,
    Loading,
    Ready(Arc<MapsRuntime>),
}

struct LoaderState {
    slot: Slot,
    /// Number of the latest attempt.
    attempt: u64,
    /// Outcome of the latest failed attempt, kept for its waiters.
    failure: Option<(u64, MapsInitError)>,
}

fn poisoned<T>(_: T) -> MapsInitError {
    MapsInitError::Failed("maps loader lock poisoned".to_string())
}

impl Default for MapsLoader {
    fn default() -> Self { Self::new() }
}

impl MapsLoader {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(LoaderState { slot: Slot::Empty, attempt: 0, failure: None }),
            settled: Condvar::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Return the cached runtime, or run `init` once to produce it.
    ///
    /// Callers arriving while another caller's `init` is running block until it
    /// finishes and share its result.
    pub fn load_with<F>(&self, init: F) -> Result<Arc<MapsRuntime>, MapsInitError>
    where F: FnOnce() -> Result<MapsRuntime, MapsInitError> {
        let mut state = self.state.lock().map_err(poisoned)?;
        loop {
            let awaited = match &state.slot {
                Slot::Ready(runtime) => return Ok(Arc::clone(runtime)),
                Slot::Empty => break,
                Slot::Loading => state.attempt,
            };
            debug!("[maps] waiting for attempt {awaited}");
            state = self.settled
                .wait_while(state, |s| matches!(s.slot, Slot::Loading) && s.attempt == awaited)
                .map_err(poisoned)?;
            if let Some((attempt, e)) = &state.failure {
                if *attempt == awaited {
                    return Err(e.clone());
                }
            }
        }

        state.slot = Slot::Loading;
        state.attempt += 1;
        let attempt = state.attempt;
        drop(state);

        self.loads.fetch_add(1, Ordering::SeqCst);
        debug!("[maps] initializing runtime (attempt {attempt})");
        let result = init().map(Arc::new);

        let mut state = self.state.lock().map_err(poisoned)?;
        match &result {
            Ok(runtime) => {
                state.slot = Slot::Ready(Arc::clone(runtime));
                info!("[maps] runtime ready ({} libraries)", runtime.libraries.len());
            }
            Err(e) => {
                state.slot = Slot::Empty;
                state.failure = Some((attempt, e.clone()));
                warn!("[maps] {e}");
            }
        }
        drop(state);
        self.settled.notify_all();
        result
    }

    /// Load the runtime described by `settings`.
    #[inline]
    pub fn load(&self, settings: &Settings) -> Result<Arc<MapsRuntime>, MapsInitError> {
        self.load_with(|| MapsRuntime::initialize(settings))
    }

    /// How many times an initialization actually ran.
    #[inline] pub fn load_count(&self) -> usize { self.loads.load(Ordering::SeqCst) }

    pub fn is_loaded(&self) -> bool {
        self.state.lock().map(|s| matches!(s.slot, Slot::Ready(_))).unwrap_or(false)
    }
}

static GLOBAL_LOADER: MapsLoader = MapsLoader::new();

/// Load the process-wide maps runtime, initializing it at most once on success.
pub fn load_maps(settings: &Settings) -> Result<Arc<MapsRuntime>, MapsInitError> {
    GLOBAL_LOADER.load(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed() -> Settings {
        Settings { google_maps_api_key: Some("test-key".into()), ..Settings::default() }
    }

    #[test]
    fn initialize_requires_key() {
        assert_eq!(MapsRuntime::initialize(&Settings::default()), Err(MapsInitError::MissingApiKey));
        let runtime = MapsRuntime::initialize(&keyed()).unwrap();
        assert_eq!(runtime.libraries, vec!["places", "drawing", "geometry"]);
    }

    #[test]
    fn concurrent_loads_initialize_once() {
        let loader = MapsLoader::new();
        let settings = keyed();
        let runtimes: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| loader.load(&settings))).collect();
            handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
        });

        assert_eq!(loader.load_count(), 1);
        assert!(runtimes.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn concurrent_failing_loads_share_one_attempt() {
        use std::sync::Barrier;
        use std::time::Duration;

        let loader = MapsLoader::new();
        let start = Barrier::new(8);
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| {
                    start.wait();
                    loader.load_with(|| {
                        std::thread::sleep(Duration::from_millis(200));
                        Err(MapsInitError::Failed("network".into()))
                    })
                }))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(loader.load_count(), 1);
        assert!(results.iter().all(|r| *r == Err(MapsInitError::Failed("network".into()))));
        assert!(!loader.is_loaded());

        // the next call after the failed attempt retries
        assert!(loader.load(&keyed()).is_ok());
        assert_eq!(loader.load_count(), 2);
    }

    #[test]
    fn failure_is_not_cached() {
        let loader = MapsLoader::new();
        assert_eq!(loader.load(&Settings::default()), Err(MapsInitError::MissingApiKey));
        assert!(!loader.is_loaded());

        assert!(loader.load(&keyed()).is_ok());
        assert!(loader.is_loaded());
        assert_eq!(loader.load_count(), 2);

        // cached runtime wins over later settings
        assert!(loader.load(&Settings::default()).is_ok());
        assert_eq!(loader.load_count(), 2);
    }
}
