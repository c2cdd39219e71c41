//! Document loading capabilities.
//!
//! File and network transport are injected through [`FileLoader`] and
//! [`Fetcher`]. Remote documents go through a [`RemoteCache`] so concurrent
//! requests for the same URL share one in-flight fetch.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{BuildError, FetchFailure};

/// Loads a schema document from a local path.
pub trait FileLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns `BuildError::FileNotFound` if the file doesn't exist, or
    /// `BuildError::MalformedSchema` if it can't be read as JSON.
    fn load(&self, path: &Path) -> Result<Value, BuildError>;
}

/// Fetches the raw bytes of a remote document.
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the reason the document could not be obtained: timeout,
    /// non-success status or transport failure.
    fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchFailure>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl FileLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<Value, BuildError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                BuildError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                BuildError::malformed(path.display(), format!("cannot read file: {}", source))
            }
        })?;

        parse_document(&content, &path.display().to_string())
    }
}

/// Parse a JSON schema document held in memory.
///
/// # Errors
///
/// Returns `BuildError::MalformedSchema` if the text isn't valid JSON.
pub fn parse_document(content: &str, origin: &str) -> Result<Value, BuildError> {
    serde_json::from_str(content)
        .map_err(|e| BuildError::malformed(origin, format!("invalid JSON: {}", e)))
}

/// Fetches over HTTP(S) with a blocking client.
///
/// Requires the `remote` feature (enabled by default).
#[cfg(feature = "remote")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

#[cfg(feature = "remote")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchFailure> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_failure)?;

        let response = client.get(url.clone()).send().map_err(transport_failure)?;

        // Check for HTTP errors before reading the body
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response
            .bytes()
            .map(|body| body.to_vec())
            .map_err(transport_failure)
    }
}

#[cfg(feature = "remote")]
fn transport_failure(err: reqwest::Error) -> FetchFailure {
    if err.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Transport(err.to_string())
    }
}

/// Refuses every fetch. Used when the `remote` feature is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFetcher;

impl Fetcher for NoFetcher {
    fn fetch(&self, _url: &Url, _timeout: Duration) -> Result<Vec<u8>, FetchFailure> {
        Err(FetchFailure::Disabled)
    }
}

/// The fetcher used when none is injected.
pub fn default_fetcher() -> Arc<dyn Fetcher> {
    #[cfg(feature = "remote")]
    {
        Arc::new(HttpFetcher)
    }
    #[cfg(not(feature = "remote"))]
    {
        Arc::new(NoFetcher)
    }
}

/// Remote documents fetched so far, with single-flight deduplication.
///
/// Only successful fetches are stored; a failure is handed to the callers
/// waiting on that fetch and then forgotten, so the next request fetches
/// again. A cache may be shared between sessions; each URL is written only by
/// the caller that performed its fetch.
#[derive(Debug, Default)]
pub struct RemoteCache {
    documents: Mutex<HashMap<Url, Value>>,
    inflight: Mutex<HashMap<Url, Arc<Flight>>>,
}

#[derive(Debug, Default)]
struct Flight {
    state: Mutex<FlightState>,
    ready: Condvar,
}

#[derive(Debug, Default)]
enum FlightState {
    #[default]
    Pending,
    Done(Result<Value, FetchFailure>),
    /// The fetching caller unwound before producing an outcome.
    Abandoned,
}

/// Publishes the flight outcome and unregisters it, even on unwind.
struct FlightGuard<'a> {
    cache: &'a RemoteCache,
    url: &'a Url,
    flight: Arc<Flight>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        {
            let mut state = lock(&self.flight.state);
            if matches!(*state, FlightState::Pending) {
                *state = FlightState::Abandoned;
            }
        }
        self.flight.ready.notify_all();
        lock(&self.cache.inflight).remove(self.url);
    }
}

impl RemoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached document for `url` without fetching.
    pub fn get(&self, url: &Url) -> Option<Value> {
        lock(&self.documents).get(url).cloned()
    }

    /// Returns the document for `url`, fetching it if needed.
    ///
    /// If another caller is already fetching `url`, waits for that fetch and
    /// returns its outcome instead of issuing a second request.
    ///
    /// # Errors
    ///
    /// Returns the `FetchFailure` of the fetch this call performed or waited on.
    /// Content that isn't valid JSON is `FetchFailure::Malformed`.
    pub fn get_or_fetch(
        &self,
        url: &Url,
        fetcher: &dyn Fetcher,
        timeout: Duration,
    ) -> Result<Value, FetchFailure> {
        if let Some(document) = self.get(url) {
            return Ok(document);
        }

        let (flight, leader) = {
            let mut inflight = lock(&self.inflight);
            // The leader stores the document before leaving the in-flight table.
            if let Some(document) = self.get(url) {
                return Ok(document);
            }
            match inflight.get(url) {
                Some(flight) => (Arc::clone(flight), false),
                None => {
                    let flight = Arc::new(Flight::default());
                    inflight.insert(url.clone(), Arc::clone(&flight));
                    (flight, true)
                }
            }
        };

        if !leader {
            debug!(%url, "waiting on in-flight fetch");
            return self.wait(url, &flight, fetcher, timeout);
        }

        let guard = FlightGuard {
            cache: self,
            url,
            flight,
        };

        debug!(%url, ?timeout, "fetching remote schema");
        let outcome = fetcher.fetch(url, timeout).and_then(|bytes| {
            serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| FetchFailure::Malformed(e.to_string()))
        });

        match &outcome {
            Ok(document) => {
                lock(&self.documents).insert(url.clone(), document.clone());
            }
            Err(reason) => warn!(%url, %reason, "remote fetch failed"),
        }
        *lock(&guard.flight.state) = FlightState::Done(outcome.clone());
        drop(guard);

        outcome
    }

    fn wait(
        &self,
        url: &Url,
        flight: &Flight,
        fetcher: &dyn Fetcher,
        timeout: Duration,
    ) -> Result<Value, FetchFailure> {
        let mut state = lock(&flight.state);
        while matches!(*state, FlightState::Pending) {
            state = flight
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if let FlightState::Done(outcome) = &*state {
            return outcome.clone();
        }
        drop(state);
        self.get_or_fetch(url, fetcher, timeout)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
